//! Code-sample harvesting from rendered reference markdown.
//!
//! The renderer emits one `## {verb}__{path}` header per operation, with the
//! path's slashes written as underscores, followed by fenced sample blocks.
//! [`MarkdownSampleExtractor`] recovers `(verb, path, samples)` triples from
//! that text and [`attach_samples`] splices them into the document as
//! `x-code-samples`.
//!
//! Only the first [`MAX_INSPECTED_BLOCKS`] fenced blocks of each operation
//! are looked at, whatever their language; blocks in other languages count
//! toward that cap but are not kept.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Languages whose blocks become code samples.
pub const SAMPLE_LANGUAGES: [&str; 2] = ["shell", "javascript"];

/// Fenced blocks inspected per operation.
pub const MAX_INSPECTED_BLOCKS: usize = 8;

static OPERATION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?R)## (get|post|delete|put)__(.*)").expect("valid regex"));

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(shell|http|javascript|ruby|python|php|java|go)((?:.*(?:\n|\r\n))+?)```")
        .expect("valid regex")
});

/// One `x-code-samples` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSample {
    /// Fence language tag.
    pub lang: String,
    /// Tab label; same as `lang`.
    pub label: String,
    /// Block body, including its leading newline.
    pub source: String,
}

/// Samples found for one rendered operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedOperation {
    /// Lower-case HTTP verb from the header.
    pub method: String,
    /// Document path key rebuilt from the header.
    pub path: String,
    /// Kept samples in order of appearance. May be empty.
    pub samples: Vec<CodeSample>,
}

/// Recovers per-operation code samples from rendered documentation.
pub trait SampleExtractor {
    /// Every operation found in `rendered`, in order of appearance.
    fn extract(&self, rendered: &str) -> Vec<HarvestedOperation>;
}

/// Extractor for the markdown emitted by the reference renderers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSampleExtractor;

impl SampleExtractor for MarkdownSampleExtractor {
    fn extract(&self, rendered: &str) -> Vec<HarvestedOperation> {
        let headers: Vec<_> = OPERATION_HEADER.captures_iter(rendered).collect();

        headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let start = header.get(0).map_or(0, |m| m.end());
                let end = headers
                    .get(i + 1)
                    .and_then(|next| next.get(0))
                    .map_or(rendered.len(), |m| m.start());
                let window = &rendered[start..end];

                let samples = FENCED_BLOCK
                    .captures_iter(window)
                    .take(MAX_INSPECTED_BLOCKS)
                    .filter(|block| SAMPLE_LANGUAGES.contains(&&block[1]))
                    .map(|block| CodeSample {
                        lang: block[1].to_string(),
                        label: block[1].to_string(),
                        source: block[2].to_string(),
                    })
                    .collect();

                HarvestedOperation {
                    method: header[1].to_string(),
                    path: format!("/{}", header[2].replace('_', "/")),
                    samples,
                }
            })
            .collect()
    }
}

/// Set `x-code-samples` on each harvested operation of `doc`.
///
/// Operations with no kept samples get an empty array.
///
/// # Errors
///
/// Returns [`Error::HarvestTarget`] if a harvested path or verb does not exist
/// in `doc.paths`.
pub fn attach_samples(doc: &mut Value, harvested: Vec<HarvestedOperation>) -> Result<()> {
    for op in harvested {
        let target = doc
            .get_mut("paths")
            .and_then(|paths| paths.get_mut(&op.path))
            .and_then(|item| item.get_mut(&op.method))
            .and_then(Value::as_object_mut);
        let Some(target) = target else {
            return Err(Error::HarvestTarget {
                method: op.method,
                path: op.path,
            });
        };

        tracing::debug!(
            method = %op.method,
            path = %op.path,
            samples = op.samples.len(),
            "attached code samples"
        );
        target.insert("x-code-samples".into(), serde_json::to_value(&op.samples)?);
    }
    Ok(())
}

/// Enriched clone of `doc` with samples harvested from `rendered`.
///
/// # Errors
///
/// See [`attach_samples`].
pub fn harvest(extractor: &dyn SampleExtractor, rendered: &str, doc: &Value) -> Result<Value> {
    let mut enriched = doc.clone();
    attach_samples(&mut enriched, extractor.extract(rendered))?;
    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fence(lang: &str, body: &str) -> String {
        format!("```{lang}\n{body}\n```\n\n")
    }

    #[test]
    fn extracts_shell_and_javascript_only() {
        let rendered = indoc! {r#"
            ## get__device_

            > Code samples

            ```shell
            curl -X GET /device/
            ```

            ```http
            GET /device/ HTTP/1.1
            ```

            ```javascript
            fetch('/device/');
            ```

            `GET /device/`
        "#};

        let ops = MarkdownSampleExtractor.extract(rendered);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].method, "get");
        assert_eq!(ops[0].path, "/device/");
        assert_eq!(
            ops[0].samples,
            vec![
                CodeSample {
                    lang: "shell".into(),
                    label: "shell".into(),
                    source: "\ncurl -X GET /device/\n".into(),
                },
                CodeSample {
                    lang: "javascript".into(),
                    label: "javascript".into(),
                    source: "\nfetch('/device/');\n".into(),
                },
            ]
        );
    }

    #[test]
    fn path_underscores_become_slashes() {
        let rendered = "## post__device_{hashId}_link\n\n```shell\nx\n```\n";
        let ops = MarkdownSampleExtractor.extract(rendered);
        assert_eq!(ops[0].method, "post");
        assert_eq!(ops[0].path, "/device/{hashId}/link");
    }

    #[test]
    fn cap_counts_inspected_blocks() {
        let mut rendered = String::from("## get__device_\n\n");
        for _ in 0..MAX_INSPECTED_BLOCKS {
            rendered.push_str(&fence("ruby", "puts 1"));
        }
        rendered.push_str(&fence("shell", "curl"));

        let ops = MarkdownSampleExtractor.extract(&rendered);
        assert_eq!(ops.len(), 1);
        assert!(ops[0].samples.is_empty());
    }

    #[test]
    fn qualifying_block_within_cap_is_kept() {
        let mut rendered = String::from("## get__device_\n\n");
        for _ in 0..MAX_INSPECTED_BLOCKS - 1 {
            rendered.push_str(&fence("python", "print(1)"));
        }
        rendered.push_str(&fence("javascript", "fetch()"));

        let ops = MarkdownSampleExtractor.extract(&rendered);
        assert_eq!(ops[0].samples.len(), 1);
        assert_eq!(ops[0].samples[0].lang, "javascript");
    }

    #[test]
    fn window_stops_at_next_header() {
        let rendered = format!(
            "## get__device_\n\n{}## post__device_\n\n{}{}",
            fence("python", "first"),
            fence("shell", "second"),
            fence("javascript", "third"),
        );
        let ops = MarkdownSampleExtractor.extract(&rendered);
        assert_eq!(ops.len(), 2);
        assert!(ops[0].samples.is_empty());
        let langs: Vec<&str> = ops[1].samples.iter().map(|s| s.lang.as_str()).collect();
        assert_eq!(langs, vec!["shell", "javascript"]);
    }

    #[test]
    fn crlf_blocks_are_recognised() {
        let rendered = "## get__device_\r\n\r\n```shell\r\ncurl\r\n```\r\n";
        let ops = MarkdownSampleExtractor.extract(rendered);
        assert_eq!(ops[0].path, "/device/");
        assert_eq!(ops[0].samples[0].source, "\r\ncurl\r\n");
    }

    #[test]
    fn harvest_attaches_to_clone() {
        let doc = json!({
            "paths": {
                "/device/": {"get": {"summary": "find"}, "post": {"summary": "add"}}
            }
        });
        let rendered = format!("## get__device_\n\n{}## post__device_\n\n", fence("shell", "curl"));

        let enriched = harvest(&MarkdownSampleExtractor, &rendered, &doc).unwrap();
        assert!(doc["paths"]["/device/"]["get"].get("x-code-samples").is_none());
        assert_eq!(
            enriched["paths"]["/device/"]["get"]["x-code-samples"],
            json!([{"lang": "shell", "label": "shell", "source": "\ncurl\n"}])
        );
        assert_eq!(enriched["paths"]["/device/"]["post"]["x-code-samples"], json!([]));
    }

    #[test]
    fn unknown_target_fails() {
        let doc = json!({"paths": {"/device/": {"get": {}}}});

        let err = harvest(&MarkdownSampleExtractor, "## get__graph_\n", &doc).unwrap_err();
        assert!(matches!(err, Error::HarvestTarget { ref path, .. } if path == "/graph/"));

        let err = harvest(&MarkdownSampleExtractor, "## delete__device_\n", &doc).unwrap_err();
        assert!(matches!(err, Error::HarvestTarget { ref method, .. } if method == "delete"));
    }
}
