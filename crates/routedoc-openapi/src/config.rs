//! Project-level generator configuration loaded from YAML.
//!
//! Externalizes project-specific knobs (API version, document info, public
//! routers, presentation metadata, renderer options, output locations) so
//! they live next to the route catalogue instead of being hardcoded.
//!
//! # File format
//!
//! ```yaml
//! # api/openapi.yaml
//! api_version: 5
//!
//! info:
//!   title: platform-sdk
//!   description: How to access the platform programmatically.
//!   contact:
//!     name: API support
//!     email: info@example.com
//!     url: https://example.com/
//!
//! server_url: https://api.example.com
//!
//! # Routers whose operations need no bearer token.
//! public_tags:
//!   - authentication
//!
//! # Display names shown in the reference docs (default: capitalized tag).
//! tag_display_names:
//!   authentication: Login
//!
//! logo:
//!   url: https://example.com/logo.png
//!   alt_text: example
//!
//! # Markdown placed in `info.description` of the enriched document.
//! general_information_file: docs/general-information.md
//!
//! renderer:
//!   code_samples: true
//!   theme: darkula
//!   headings: 2
//!
//! outputs:
//!   plain: docs/open-api.json
//!   enriched: docs/redoc.json
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Project-level generator config.
///
/// Loaded from a YAML file via [`ProjectConfig::load`]; every section falls
/// back to its default when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Current API version; selects versioned schemas and fills `info.version`.
    pub api_version: u32,

    /// Document `info` block.
    pub info: InfoConfig,

    /// The single `servers` entry.
    pub server_url: String,

    /// Bearer token security scheme.
    pub security: SecurityConfig,

    /// Router tags whose operations override security with `[]`.
    pub public_tags: Vec<String>,

    /// Tag → display name overrides for the enriched document.
    pub tag_display_names: IndexMap<String, String>,

    /// Logo shown by the reference docs.
    pub logo: Option<LogoConfig>,

    /// Inline markdown for the enriched `info.description`.
    pub general_information: Option<String>,

    /// Markdown file for the enriched `info.description`.
    /// Takes precedence over `general_information`.
    pub general_information_file: Option<PathBuf>,

    /// Markdown renderer options.
    pub renderer: RendererOptions,

    /// Where the two documents are written.
    pub outputs: OutputPaths,
}

/// `info` block settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    /// Document title.
    pub title: String,
    /// Short description for the plain document.
    pub description: String,
    /// Support contact.
    pub contact: Option<ContactConfig>,
}

/// Support contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Contact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact e-mail address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Bearer token security scheme settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Key under `components.securitySchemes`.
    pub scheme_name: String,
    /// Scheme description.
    pub description: String,
}

/// Logo for the reference docs (`info.x-logo`).
#[derive(Debug, Clone, Deserialize)]
pub struct LogoConfig {
    /// Image URL.
    pub url: String,
    /// Alternative text.
    pub alt_text: String,
}

/// Options handed to the [`MarkdownRenderer`](crate::MarkdownRenderer).
///
/// Serialized as camelCase JSON when passed to an external renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
#[allow(clippy::struct_excessive_bools)]
pub struct RendererOptions {
    /// Emit per-language code samples.
    #[serde(alias = "codeSamples")]
    pub code_samples: bool,

    /// Use httpsnippet-style long-form `curl` samples.
    #[serde(alias = "httpSnippet")]
    pub http_snippet: bool,

    /// Syntax highlighting theme.
    pub theme: String,

    /// Enable search in the rendered output.
    pub search: bool,

    /// Generate example payloads from schemas.
    pub sample: bool,

    /// Do not expand `$ref` schemas in examples.
    #[serde(alias = "shallowSchemas")]
    pub shallow_schemas: bool,

    /// Emit an operation summary table before the tag sections.
    #[serde(alias = "tocSummary")]
    pub toc_summary: bool,

    /// Heading depth listed in the table of contents.
    pub headings: u8,

    /// Template directory for renderers that support custom templates.
    #[serde(alias = "userTemplates")]
    pub user_templates: Option<PathBuf>,

    /// Sample languages, in tab order.
    #[serde(alias = "languageTabs")]
    pub language_tabs: Vec<String>,
}

/// Output document locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    /// Plain structural document.
    pub plain: PathBuf,
    /// Enriched reference-docs document.
    pub enriched: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            api_version: 1,
            info: InfoConfig::default(),
            server_url: "http://localhost".to_string(),
            security: SecurityConfig::default(),
            public_tags: vec!["authentication".to_string()],
            tag_display_names: IndexMap::from([(
                "authentication".to_string(),
                "Login".to_string(),
            )]),
            logo: None,
            general_information: None,
            general_information_file: None,
            renderer: RendererOptions::default(),
            outputs: OutputPaths::default(),
        }
    }
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            description: "This document provides information on how to access the API programmatically."
                .to_string(),
            contact: None,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            scheme_name: "jwt-token".to_string(),
            description: "On login you get a token to access all other url's".to_string(),
        }
    }
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            code_samples: true,
            http_snippet: false,
            theme: "darkula".to_string(),
            search: true,
            sample: true,
            shallow_schemas: false,
            toc_summary: false,
            headings: 2,
            user_templates: None,
            language_tabs: ["shell", "http", "javascript", "ruby", "python", "php", "java", "go"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            plain: PathBuf::from("open-api.json"),
            enriched: PathBuf::from("redoc.json"),
        }
    }
}

impl ProjectConfig {
    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Whether operations tagged `tag` are public (no bearer token).
    #[must_use]
    pub fn is_public(&self, tag: &str) -> bool {
        self.public_tags.iter().any(|t| t == tag)
    }

    /// The markdown that replaces `info.description` in the enriched document.
    ///
    /// # Errors
    ///
    /// Returns an error if `general_information_file` cannot be read.
    pub fn general_information(&self) -> crate::error::Result<Option<String>> {
        if let Some(path) = &self.general_information_file {
            return Ok(Some(std::fs::read_to_string(path)?));
        }
        Ok(self.general_information.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_defaults() {
        let config: ProjectConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config.api_version, 1);
        assert_eq!(config.info.title, "API");
        assert_eq!(config.security.scheme_name, "jwt-token");
        assert_eq!(config.public_tags, vec!["authentication"]);
        assert_eq!(config.tag_display_names["authentication"], "Login");
        assert!(config.logo.is_none());
        assert!(config.renderer.code_samples);
        assert_eq!(config.renderer.headings, 2);
        assert_eq!(config.renderer.language_tabs.len(), 8);
        assert_eq!(config.outputs.plain, PathBuf::from("open-api.json"));
        assert_eq!(config.outputs.enriched, PathBuf::from("redoc.json"));
    }

    #[test]
    fn deserialize_full() {
        let yaml = r"
api_version: 5
info:
  title: platform-sdk
  contact:
    name: API support
    email: info@example.com
server_url: https://api.example.com
security:
  scheme_name: bearer
public_tags:
  - authentication
  - status
tag_display_names:
  status: Health
logo:
  url: https://example.com/logo.png
  alt_text: example
general_information: '# Hello'
renderer:
  theme: monokai
  language_tabs: [shell, javascript]
outputs:
  plain: out/plain.json
";
        let config: ProjectConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.api_version, 5);
        assert_eq!(config.info.title, "platform-sdk");
        // Omitted fields inside a section keep defaults
        assert!(config.info.description.starts_with("This document"));
        let contact = config.info.contact.as_ref().unwrap();
        assert_eq!(contact.email.as_deref(), Some("info@example.com"));
        assert!(contact.url.is_none());
        assert_eq!(config.server_url, "https://api.example.com");
        assert_eq!(config.security.scheme_name, "bearer");
        assert!(config.security.description.starts_with("On login"));
        assert!(config.is_public("status"));
        assert!(!config.is_public("device"));
        // An explicit map replaces the default overrides
        assert!(!config.tag_display_names.contains_key("authentication"));
        assert_eq!(config.logo.as_ref().unwrap().alt_text, "example");
        assert_eq!(config.general_information().unwrap().as_deref(), Some("# Hello"));
        assert_eq!(config.renderer.theme, "monokai");
        assert!(config.renderer.search);
        assert_eq!(config.renderer.language_tabs, vec!["shell", "javascript"]);
        assert_eq!(config.outputs.plain, PathBuf::from("out/plain.json"));
        assert_eq!(config.outputs.enriched, PathBuf::from("redoc.json"));
    }

    #[test]
    fn renderer_options_accept_camel_case_aliases() {
        let options: RendererOptions =
            serde_yaml_ng::from_str("codeSamples: false\ntocSummary: true\n").unwrap();
        assert!(!options.code_samples);
        assert!(options.toc_summary);
    }

    #[test]
    fn general_information_file_takes_precedence() {
        let dir = std::env::temp_dir().join("routedoc-openapi-general-info");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("general.md");
        std::fs::write(&path, "# From file\n").unwrap();

        let config = ProjectConfig {
            general_information: Some("inline".to_string()),
            general_information_file: Some(path),
            ..ProjectConfig::default()
        };
        assert_eq!(
            config.general_information().unwrap().as_deref(),
            Some("# From file\n")
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join("routedoc-openapi-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, "api_version: 7\nserver_url: https://api.test\n").unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.api_version, 7);
        assert_eq!(config.server_url, "https://api.test");
        // Defaults still apply
        assert_eq!(config.public_tags, vec!["authentication"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_nonexistent_file_returns_error() {
        let result = ProjectConfig::load(Path::new("/nonexistent/config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_invalid_yaml_returns_error() {
        let dir = std::env::temp_dir().join("routedoc-openapi-config-invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.yaml");
        std::fs::write(&path, "public_tags: [[[invalid").unwrap();

        let result = ProjectConfig::load(&path);
        assert!(result.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
