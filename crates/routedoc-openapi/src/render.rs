//! Markdown rendering of the plain document.
//!
//! The enrichment phase needs the document as reference markdown with one
//! `## {verb}__{path}` section per operation and fenced code samples under
//! it. [`ReferenceRenderer`] produces that in-process; [`CommandRenderer`]
//! delegates to an external tool speaking the same format.

use std::fmt::{self, Write as _};
use std::io::Write as _;
use std::process::{Command, Stdio};

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::config::RendererOptions;
use crate::error::{Error, Result};
use crate::helpers::{is_operation_key, SCHEMA_REF_PREFIX};
use crate::MEDIA_TYPE;

/// Environment variable carrying the renderer options for [`CommandRenderer`].
pub const OPTIONS_ENV: &str = "ROUTEDOC_RENDER_OPTIONS";

/// Nesting depth after which `$ref` expansion in examples stops.
const MAX_EXAMPLE_DEPTH: usize = 8;

/// Turns an `OpenAPI` document into reference markdown.
pub trait MarkdownRenderer {
    /// Render `doc`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Renderer`] if rendering fails.
    fn render(&self, doc: &Value, options: &RendererOptions) -> Result<String>;
}

/// In-process renderer producing slate-style reference markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceRenderer;

impl MarkdownRenderer for ReferenceRenderer {
    fn render(&self, doc: &Value, options: &RendererOptions) -> Result<String> {
        let mut out = String::new();
        write_document(&mut out, doc, options)
            .map_err(|e| Error::Renderer(format!("formatting failed: {e}")))?;
        Ok(out)
    }
}

/// Runs an external renderer.
///
/// The document is written to the program's stdin as JSON, the options are
/// passed as camelCase JSON in [`OPTIONS_ENV`], and stdout is the markdown.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Renderer running `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Renderer from a command line: the first element is the program.
    ///
    /// Returns `None` for an empty command line.
    #[must_use]
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.iter().cloned()))
    }
}

impl MarkdownRenderer for CommandRenderer {
    fn render(&self, doc: &Value, options: &RendererOptions) -> Result<String> {
        let input = serde_json::to_vec(doc)?;
        let options = serde_json::to_string(options)?;

        tracing::debug!(program = %self.program, "running external renderer");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(OPTIONS_ENV, options)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Renderer(format!("cannot start '{}': {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Renderer("renderer stdin is not available".to_string()))?;
        let writer = std::thread::spawn(move || stdin.write_all(&input));
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(Error::Renderer(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        writer
            .join()
            .map_err(|_| Error::Renderer("writing renderer input panicked".to_string()))??;

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Renderer(format!("renderer output is not UTF-8: {e}")))
    }
}

fn write_document(out: &mut String, doc: &Value, options: &RendererOptions) -> fmt::Result {
    let title = str_at(doc, "/info/title").unwrap_or("API");
    let version = str_at(doc, "/info/version").unwrap_or_default();
    let server = str_at(doc, "/servers/0/url").unwrap_or_default();
    let schemas = doc
        .pointer("/components/schemas")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let examples = Examples {
        schemas: &schemas,
        shallow: options.shallow_schemas,
    };

    write_front_matter(out, title, version, options)?;
    write_introduction(out, doc, title, version, server)?;

    let grouped = operations_by_tag(doc);
    if options.toc_summary {
        write_summary_table(out, &grouped)?;
    }

    let global_security = doc
        .get("security")
        .and_then(Value::as_array)
        .is_some_and(|s| !s.is_empty());

    for (tag, operations) in &grouped {
        writeln!(out, "<h1 id=\"{}\">{tag}</h1>\n", slug(&format!("{title}-{tag}")))?;
        for (path, method, op) in operations {
            let secured = op
                .get("security")
                .and_then(Value::as_array)
                .map_or(global_security, |s| !s.is_empty());
            let operation = Operation {
                path,
                method,
                op,
                secured,
                server,
            };
            write_operation(out, &operation, &examples, options)?;
        }
    }
    Ok(())
}

fn write_front_matter(
    out: &mut String,
    title: &str,
    version: &str,
    options: &RendererOptions,
) -> fmt::Result {
    writeln!(out, "---")?;
    writeln!(out, "title: {title} v{version}")?;
    writeln!(out, "language_tabs:")?;
    for lang in &options.language_tabs {
        writeln!(out, "  - {lang}: {}", language_label(lang))?;
    }
    writeln!(out, "toc_footers: []")?;
    writeln!(out, "includes: []")?;
    writeln!(out, "search: {}", options.search)?;
    writeln!(out, "highlight_theme: {}", options.theme)?;
    writeln!(out, "headingLevel: {}", options.headings)?;
    writeln!(out, "\n---\n")
}

fn write_introduction(
    out: &mut String,
    doc: &Value,
    title: &str,
    version: &str,
    server: &str,
) -> fmt::Result {
    writeln!(out, "<h1 id=\"{}\">{title} v{version}</h1>\n", slug(title))?;
    writeln!(
        out,
        "> Scroll down for code samples, example requests and responses. \
         Select a language for code samples from the tabs above or the mobile navigation menu.\n"
    )?;
    if let Some(description) = str_at(doc, "/info/description") {
        writeln!(out, "{description}\n")?;
    }
    if !server.is_empty() {
        writeln!(out, "Base URLs:\n\n* <a href=\"{server}\">{server}</a>\n")?;
    }
    if let Some(email) = str_at(doc, "/info/contact/email") {
        writeln!(out, "Email: <a href=\"mailto:{email}\">Support</a>\n")?;
    }

    let Some(schemes) = doc
        .pointer("/components/securitySchemes")
        .and_then(Value::as_object)
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };
    writeln!(out, "# Authentication\n")?;
    for (name, scheme) in schemes {
        let kind = scheme.get("type").and_then(Value::as_str).unwrap_or_default();
        let description = scheme
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        match scheme.get("scheme").and_then(Value::as_str) {
            Some(http_scheme) if kind == "http" => writeln!(
                out,
                "- HTTP Authentication, scheme: {http_scheme} {description}\n"
            )?,
            _ => writeln!(out, "- {name} ({kind}) {description}\n")?,
        }
    }
    Ok(())
}

type TaggedOperations<'a> = IndexMap<String, Vec<(String, String, &'a Map<String, Value>)>>;

/// Operations grouped under their first tag, declared tags first.
fn operations_by_tag(doc: &Value) -> TaggedOperations<'_> {
    let mut grouped: TaggedOperations<'_> = doc
        .get("tags")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|t| t.get("name").and_then(Value::as_str))
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    let Some(paths) = doc.get("paths").and_then(Value::as_object) else {
        return grouped;
    };
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        for (method, op) in item {
            let Some(op) = op.as_object().filter(|_| is_operation_key(method))
            else {
                continue;
            };
            let tag = op
                .get("tags")
                .and_then(|t| t.get(0))
                .and_then(Value::as_str)
                .unwrap_or("default");
            grouped
                .entry(tag.to_string())
                .or_default()
                .push((path.clone(), method.clone(), op));
        }
    }
    grouped.retain(|_, ops| !ops.is_empty());
    grouped
}

fn write_summary_table(out: &mut String, grouped: &TaggedOperations<'_>) -> fmt::Result {
    writeln!(out, "# Summary\n")?;
    writeln!(out, "|Tag|Method|Path|Summary|")?;
    writeln!(out, "|---|---|---|---|")?;
    for (tag, operations) in grouped {
        for (path, method, op) in operations {
            let summary = op.get("summary").and_then(Value::as_str).unwrap_or_default();
            writeln!(out, "|{tag}|{}|{path}|{summary}|", method.to_uppercase())?;
        }
    }
    writeln!(out)
}

struct Operation<'a> {
    path: &'a str,
    method: &'a str,
    op: &'a Map<String, Value>,
    secured: bool,
    server: &'a str,
}

impl Operation<'_> {
    /// Section header the sample harvester keys on.
    fn header(&self) -> String {
        format!(
            "{}__{}",
            self.method,
            self.path.trim_start_matches('/').replace('/', "_")
        )
    }

    fn parameters(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.op
            .get("parameters")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }

    fn body_schema(&self) -> Option<&Value> {
        self.op
            .get("requestBody")?
            .get("content")?
            .get(MEDIA_TYPE)?
            .get("schema")
    }

    fn has_response_content(&self) -> bool {
        self.op
            .get("responses")
            .and_then(Value::as_object)
            .is_some_and(|r| r.values().any(|resp| resp.get("content").is_some()))
    }
}

fn write_operation(
    out: &mut String,
    operation: &Operation<'_>,
    examples: &Examples<'_>,
    options: &RendererOptions,
) -> fmt::Result {
    let verb = operation.method.to_uppercase();
    let body = operation
        .body_schema()
        .map(|schema| examples.example(schema, 0));

    writeln!(out, "## {}\n", operation.header())?;

    if options.code_samples {
        let request = SampleRequest::new(operation, examples, body.as_ref());
        writeln!(out, "> Code samples\n")?;
        for lang in &options.language_tabs {
            match request.sample(lang, options.http_snippet) {
                Some(source) => writeln!(out, "```{lang}\n{source}\n```\n")?,
                None => tracing::debug!(language = %lang, "no sample generator for language tab"),
            }
        }
    }

    writeln!(out, "`{verb} {}`\n", operation.path)?;
    if let Some(summary) = operation.op.get("summary").and_then(Value::as_str) {
        writeln!(out, "*{summary}*\n")?;
    }
    if let Some(description) = operation
        .op
        .get("description")
        .and_then(Value::as_str)
        .filter(|d| !d.trim().is_empty())
    {
        writeln!(out, "{}\n", description.trim())?;
    }

    if options.sample {
        if let Some(body) = &body {
            writeln!(out, "> Body parameter\n")?;
            writeln!(out, "```json\n{}\n```\n", pretty(body))?;
        }
    }

    let anchor = slug(&operation.header());
    let parameters: Vec<&Map<String, Value>> = operation.parameters().collect();
    if !parameters.is_empty() || operation.body_schema().is_some() {
        writeln!(out, "<h3 id=\"{anchor}-parameters\">Parameters</h3>\n")?;
        writeln!(out, "|Name|In|Type|Required|Description|")?;
        writeln!(out, "|---|---|---|---|---|")?;
        for param in parameters {
            let schema = param.get("schema").unwrap_or(&Value::Null);
            writeln!(
                out,
                "|{}|{}|{}|{}|{}|",
                param.get("name").and_then(Value::as_str).unwrap_or_default(),
                param.get("in").and_then(Value::as_str).unwrap_or_default(),
                type_label(schema),
                param.get("required").and_then(Value::as_bool).unwrap_or(false),
                schema
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("none"),
            )?;
        }
        if let Some(schema) = operation.body_schema() {
            writeln!(out, "|body|body|{}|true|none|", type_label(schema))?;
        }
        writeln!(out)?;
    }

    let responses = operation
        .op
        .get("responses")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    if options.sample {
        let samples: Vec<(&String, Value)> = responses
            .iter()
            .filter_map(|(status, response)| {
                let schema = response.get("content")?.get(MEDIA_TYPE)?.get("schema")?;
                Some((status, examples.example(schema, 0)))
            })
            .collect();
        if !samples.is_empty() {
            writeln!(out, "> Example responses\n")?;
            for (status, example) in samples {
                writeln!(out, "> {status} Response\n")?;
                writeln!(out, "```json\n{}\n```\n", pretty(&example))?;
            }
        }
    }

    writeln!(out, "<h3 id=\"{anchor}-responses\">Responses</h3>\n")?;
    writeln!(out, "|Status|Meaning|Description|Schema|")?;
    writeln!(out, "|---|---|---|---|")?;
    for (status, response) in &responses {
        let schema = response
            .get("content")
            .and_then(|c| c.get(MEDIA_TYPE))
            .and_then(|m| m.get("schema"))
            .map_or_else(|| "None".to_string(), type_label);
        writeln!(
            out,
            "|{status}|{}|{}|{schema}|",
            status_meaning(status),
            response
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        )?;
    }
    writeln!(out)?;

    if operation.secured {
        writeln!(
            out,
            "<aside class=\"warning\">\nTo perform this operation, you must be authenticated by means of a bearer token.\n</aside>\n"
        )?;
    } else {
        writeln!(out, "<aside class=\"success\">\nThis operation does not require authentication\n</aside>\n")?;
    }
    Ok(())
}

/// Example payloads generated from schemas.
struct Examples<'a> {
    schemas: &'a Map<String, Value>,
    shallow: bool,
}

impl Examples<'_> {
    fn example(&self, schema: &Value, depth: usize) -> Value {
        if depth > MAX_EXAMPLE_DEPTH {
            return Value::Null;
        }
        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            if self.shallow {
                return Value::Object(Map::new());
            }
            return reference
                .strip_prefix(SCHEMA_REF_PREFIX)
                .and_then(|name| self.schemas.get(name))
                .map_or(Value::Null, |target| self.example(target, depth + 1));
        }
        if let Some(example) = schema.get("example").or_else(|| schema.get("default")) {
            return example.clone();
        }
        if let Some(first) = schema
            .get("enum")
            .and_then(Value::as_array)
            .and_then(|values| values.first())
        {
            return first.clone();
        }
        if let Some(first) = ["anyOf", "oneOf", "allOf"]
            .iter()
            .find_map(|key| schema.get(*key)?.as_array()?.first())
        {
            return self.example(first, depth + 1);
        }

        match schema.get("type").and_then(Value::as_str) {
            Some("object") => Value::Object(
                schema
                    .get("properties")
                    .and_then(Value::as_object)
                    .into_iter()
                    .flatten()
                    .map(|(name, prop)| (name.clone(), self.example(prop, depth + 1)))
                    .collect(),
            ),
            Some("array") => {
                let item = schema
                    .get("items")
                    .map_or(Value::Null, |items| self.example(items, depth + 1));
                Value::Array(vec![item])
            }
            Some("string") => match schema.get("format").and_then(Value::as_str) {
                Some("date-time") => json!("2019-08-24T14:15:22Z"),
                Some("date") => json!("2019-08-24"),
                _ => json!("string"),
            },
            Some("integer" | "number") => json!(0),
            Some("boolean") => json!(true),
            _ => Value::Null,
        }
    }
}

/// The request every code sample describes.
struct SampleRequest {
    verb: String,
    url: String,
    host: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl SampleRequest {
    fn new(operation: &Operation<'_>, examples: &Examples<'_>, body: Option<&Value>) -> Self {
        let mut headers = Vec::new();
        if body.is_some() {
            headers.push(("Content-Type".to_string(), MEDIA_TYPE.to_string()));
        }
        if operation.has_response_content() {
            headers.push(("Accept".to_string(), MEDIA_TYPE.to_string()));
        }
        for param in operation.parameters() {
            if param.get("in").and_then(Value::as_str) != Some("header") {
                continue;
            }
            let Some(name) = param.get("name").and_then(Value::as_str) else {
                continue;
            };
            let value = param
                .get("schema")
                .map_or(Value::Null, |schema| examples.example(schema, 0));
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            headers.push((name.to_string(), value));
        }
        if operation.secured {
            headers.push(("Authorization".to_string(), "Bearer {access-token}".to_string()));
        }

        let server = operation.server.trim_end_matches('/');
        let host = server
            .split_once("://")
            .map_or(server, |(_, rest)| rest)
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            verb: operation.method.to_uppercase(),
            url: format!("{server}{}", operation.path),
            host,
            headers,
            body: body.map(pretty),
        }
    }

    fn sample(&self, lang: &str, http_snippet: bool) -> Option<String> {
        let source = match lang {
            "shell" if http_snippet => self.curl_long(),
            "shell" => self.curl(),
            "http" => self.http(),
            "javascript" => self.javascript(),
            "ruby" => self.ruby(),
            "python" => self.python(),
            "php" => self.php(),
            "java" => self.java(),
            "go" => self.go(),
            _ => return None,
        };
        Some(source)
    }

    fn curl(&self) -> String {
        let mut lines = vec![format!("curl -X {} {}", self.verb, self.url)];
        lines.extend(
            self.headers
                .iter()
                .map(|(name, value)| format!("  -H '{name}: {}'", shell_quote(value))),
        );
        if let Some(body) = &self.body {
            lines.push(format!("  -d '{}'", shell_quote(body)));
        }
        format!("# You can also use wget\n{}\n", lines.join(" \\\n"))
    }

    fn curl_long(&self) -> String {
        let mut lines = vec![
            format!("curl --request {}", self.verb),
            format!("  --url {}", self.url),
        ];
        lines.extend(
            self.headers
                .iter()
                .map(|(name, value)| format!("  --header '{name}: {}'", shell_quote(value))),
        );
        if let Some(body) = &self.body {
            lines.push(format!("  --data '{}'", shell_quote(body)));
        }
        format!("{}\n", lines.join(" \\\n"))
    }

    fn http(&self) -> String {
        let mut out = format!("{} {} HTTP/1.1\nHost: {}\n", self.verb, self.url, self.host);
        for (name, value) in &self.headers {
            let _ = writeln!(out, "{name}: {value}");
        }
        if let Some(body) = &self.body {
            let _ = write!(out, "\n{body}\n");
        }
        out
    }

    fn javascript(&self) -> String {
        let mut out = String::new();
        if let Some(body) = &self.body {
            let _ = writeln!(out, "const inputBody = '{}';", body.replace('\'', "\\'"));
        }
        out.push_str("const headers = {\n");
        let entries: Vec<String> = self
            .headers
            .iter()
            .map(|(name, value)| format!("  '{name}':'{value}'"))
            .collect();
        let _ = writeln!(out, "{}\n}};\n", entries.join(",\n"));
        let _ = writeln!(out, "fetch('{}',\n{{\n  method: '{}',", self.url, self.verb);
        if self.body.is_some() {
            out.push_str("  body: inputBody,\n");
        }
        out.push_str(
            "  headers: headers\n})\n.then(function(res) {\n    return res.json();\n\
             }).then(function(body) {\n    console.log(body);\n});\n",
        );
        out
    }

    fn ruby(&self) -> String {
        let mut out = String::from("require 'rest-client'\nrequire 'json'\n\nheaders = {\n");
        for (name, value) in &self.headers {
            let _ = writeln!(out, "  '{name}' => '{value}',");
        }
        let _ = write!(
            out,
            "}}\n\nresult = RestClient.{} '{}',\n  params: {{\n  }}, headers: headers\n\np JSON.parse(result)\n",
            self.verb.to_lowercase(),
            self.url
        );
        out
    }

    fn python(&self) -> String {
        let mut out = String::from("import requests\nheaders = {\n");
        for (name, value) in &self.headers {
            let _ = writeln!(out, "  '{name}': '{value}',");
        }
        out.push_str("}\n\n");
        let data = if self.body.is_some() { ", json = input_body" } else { "" };
        if let Some(body) = &self.body {
            let _ = write!(out, "input_body = {body}\n\n");
        }
        let _ = write!(
            out,
            "r = requests.{}('{}', headers = headers{data})\n\nprint(r.json())\n",
            self.verb.to_lowercase(),
            self.url
        );
        out
    }

    fn php(&self) -> String {
        let mut out = String::from("<?php\n\nrequire 'vendor/autoload.php';\n\n$headers = array(\n");
        for (name, value) in &self.headers {
            let _ = writeln!(out, "    '{name}' => '{value}',");
        }
        out.push_str(");\n\n$client = new \\GuzzleHttp\\Client();\n\n");
        if let Some(body) = &self.body {
            let _ = write!(out, "$request_body = '{}';\n\n", body.replace('\'', "\\'"));
        }
        let _ = writeln!(
            out,
            "try {{\n    $response = $client->request('{}', '{}', array(\n        'headers' => $headers,",
            self.verb, self.url
        );
        if self.body.is_some() {
            out.push_str("        'body' => $request_body,\n");
        }
        out.push_str(
            "    ));\n    print_r($response->getBody()->getContents());\n}\n\
             catch (\\GuzzleHttp\\Exception\\BadResponseException $e) {\n    print_r($e->getMessage());\n}\n",
        );
        out
    }

    fn java(&self) -> String {
        let mut out = format!(
            "URL obj = new URL(\"{}\");\nHttpURLConnection con = (HttpURLConnection) obj.openConnection();\n\
             con.setRequestMethod(\"{}\");\n",
            self.url, self.verb
        );
        for (name, value) in &self.headers {
            let _ = writeln!(out, "con.setRequestProperty(\"{name}\", \"{value}\");");
        }
        out.push_str(
            "int responseCode = con.getResponseCode();\nBufferedReader in = new BufferedReader(\n    \
             new InputStreamReader(con.getInputStream()));\nString inputLine;\n\
             StringBuffer response = new StringBuffer();\nwhile ((inputLine = in.readLine()) != null) {\n    \
             response.append(inputLine);\n}\nin.close();\nSystem.out.println(response.toString());\n",
        );
        out
    }

    fn go(&self) -> String {
        let mut out =
            String::from("package main\n\nimport (\n       \"bytes\"\n       \"net/http\"\n)\n\nfunc main() {\n\n    headers := map[string][]string{\n");
        for (name, value) in &self.headers {
            let _ = writeln!(out, "        \"{name}\": []string{{\"{value}\"}},");
        }
        out.push_str("    }\n\n");
        match &self.body {
            Some(body) => {
                let _ = writeln!(out, "    data := bytes.NewBuffer([]byte(`{body}`))");
            }
            None => out.push_str("    data := bytes.NewBuffer(nil)\n"),
        }
        let _ = write!(
            out,
            "    req, err := http.NewRequest(\"{}\", \"{}\", data)\n    req.Header = headers\n\n    \
             client := &http.Client{{}}\n    resp, err := client.Do(req)\n    // ...\n}}\n",
            self.verb, self.url
        );
        out
    }
}

fn str_at<'a>(doc: &'a Value, pointer: &str) -> Option<&'a str> {
    doc.pointer(pointer).and_then(Value::as_str)
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn shell_quote(text: &str) -> String {
    text.replace('\'', r"'\''")
}

fn slug(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

fn type_label(schema: &Value) -> String {
    if let Some(name) = schema
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.strip_prefix(SCHEMA_REF_PREFIX))
    {
        return format!("[{name}](#schema{})", name.to_lowercase());
    }
    match schema.get("type").and_then(Value::as_str) {
        Some("array") => {
            let items = schema.get("items").map_or_else(|| "any".to_string(), type_label);
            format!("[{items}]")
        }
        Some(kind) => match schema.get("format").and_then(Value::as_str) {
            Some(format) => format!("{kind}({format})"),
            None => kind.to_string(),
        },
        None => "any".to_string(),
    }
}

fn status_meaning(status: &str) -> &'static str {
    match status {
        "200" => "[OK](https://tools.ietf.org/html/rfc7231#section-6.3.1)",
        "201" => "[Created](https://tools.ietf.org/html/rfc7231#section-6.3.2)",
        "204" => "[No Content](https://tools.ietf.org/html/rfc7231#section-6.3.5)",
        "400" => "[Bad Request](https://tools.ietf.org/html/rfc7231#section-6.5.1)",
        "404" => "[Not Found](https://tools.ietf.org/html/rfc7231#section-6.5.4)",
        _ => "Unknown",
    }
}

fn language_label(lang: &str) -> &str {
    match lang {
        "shell" => "Shell",
        "http" => "HTTP",
        "javascript" => "JavaScript",
        "ruby" => "Ruby",
        "python" => "Python",
        "php" => "PHP",
        "java" => "Java",
        "go" => "Go",
        other => other,
    }
}
