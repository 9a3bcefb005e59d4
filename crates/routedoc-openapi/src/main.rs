//! CLI for `routedoc-openapi`.
//!
//! # Subcommands
//!
//! ```text
//! # Plain + enriched documents from a route catalogue
//! routedoc-openapi generate \
//!   --catalogue api/routes.yaml \
//!   --config api/openapi.yaml
//!
//! # Reference markdown for an existing plain document
//! routedoc-openapi render --input docs/open-api.json
//!
//! # Check a written document
//! routedoc-openapi validate docs/redoc.json
//! ```

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use routedoc_openapi::{
    validate_file, CommandRenderer, Generator, MarkdownRenderer, ProjectConfig, ReferenceRenderer,
    RouteCatalogue, StructuralValidator,
};
use serde_json::Value;

/// `OpenAPI` 3.0 document generator for declarative route catalogues.
#[derive(Parser)]
#[command(name = "routedoc-openapi", version, about)]
enum Cli {
    /// Build the plain document, enrich it with code samples, and validate.
    Generate(GenerateArgs),

    /// Print the reference markdown of a plain document.
    Render(RenderArgs),

    /// Validate a written document and print its title and version.
    Validate(ValidateArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    /// Route catalogue file (YAML, or JSON with a `.json` extension).
    #[arg(long)]
    catalogue: PathBuf,

    /// Project config YAML. CLI flags override values from it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Current API version. Overrides `api_version` from the config file.
    #[arg(long)]
    api_version: Option<u32>,

    /// Where to write the plain document. Overrides `outputs.plain`.
    #[arg(long)]
    plain: Option<PathBuf>,

    /// Where to write the enriched document. Overrides `outputs.enriched`.
    #[arg(long)]
    enriched: Option<PathBuf>,

    /// External renderer command line, e.g. `"widdershins --environment env.json"`.
    /// Defaults to the built-in renderer.
    #[arg(long)]
    render_command: Option<String>,
}

#[derive(Parser)]
struct RenderArgs {
    /// Plain `OpenAPI` JSON document.
    #[arg(short, long)]
    input: PathBuf,

    /// Project config YAML (renderer options).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the markdown here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// External renderer command line. Defaults to the built-in renderer.
    #[arg(long)]
    render_command: Option<String>,
}

#[derive(Parser)]
struct ValidateArgs {
    /// `OpenAPI` JSON document to validate.
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli {
        Cli::Generate(args) => run_generate(&args),
        Cli::Render(args) => run_render(&args),
        Cli::Validate(args) => run_validate(&args),
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(version) = args.api_version {
        config.api_version = version;
    }
    if let Some(path) = &args.plain {
        config.outputs.plain.clone_from(path);
    }
    if let Some(path) = &args.enriched {
        config.outputs.enriched.clone_from(path);
    }

    let catalogue = RouteCatalogue::load(&args.catalogue)
        .with_context(|| format!("Failed to load catalogue: {}", args.catalogue.display()))?;
    tracing::info!(
        routes = catalogue.route_count(),
        api_version = config.api_version,
        "generating OpenAPI documents"
    );

    let mut generator = Generator::new(&config);
    if let Some(command) = &args.render_command {
        generator = generator.renderer(command_renderer(command)?);
    }

    let summary = generator
        .run(&catalogue, &config.outputs)
        .context("Document generation failed")?;

    eprintln!(
        "API name: {}, Version: {}",
        summary.title, summary.version
    );
    Ok(())
}

fn run_render(args: &RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let doc: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let markdown = match &args.render_command {
        Some(command) => command_renderer(command)?.render(&doc, &config.renderer),
        None => ReferenceRenderer.render(&doc, &config.renderer),
    }
    .context("Rendering failed")?;

    match &args.output {
        Some(path) => fs::write(path, markdown)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{markdown}"),
    }
    Ok(())
}

fn run_validate(args: &ValidateArgs) -> anyhow::Result<()> {
    let summary = validate_file(&StructuralValidator, &args.file)
        .with_context(|| format!("Validation failed: {}", args.file.display()))?;
    println!("API name: {}, Version: {}", summary.title, summary.version);
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ProjectConfig> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            ProjectConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => Ok(ProjectConfig::default()),
    }
}

/// Split a renderer command line on whitespace.
fn command_renderer(command: &str) -> anyhow::Result<CommandRenderer> {
    let words: Vec<String> = command.split_whitespace().map(str::to_string).collect();
    let Some(renderer) = CommandRenderer::from_command_line(&words) else {
        bail!("Empty --render-command");
    };
    Ok(renderer)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write content to a temporary file and return its path.
    fn write_temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("routedoc_cli_test_{name}"));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn cli_parses_generate_overrides() {
        let cli = Cli::try_parse_from([
            "routedoc-openapi",
            "generate",
            "--catalogue",
            "routes.yaml",
            "--api-version",
            "5",
            "--plain",
            "out/plain.json",
        ])
        .unwrap();
        let Cli::Generate(args) = cli else {
            panic!("expected generate");
        };
        assert_eq!(args.catalogue, PathBuf::from("routes.yaml"));
        assert_eq!(args.api_version, Some(5));
        assert_eq!(args.plain, Some(PathBuf::from("out/plain.json")));
        assert!(args.enriched.is_none());
    }

    #[test]
    fn generate_requires_catalogue() {
        assert!(Cli::try_parse_from(["routedoc-openapi", "generate"]).is_err());
    }

    #[test]
    fn command_renderer_rejects_blank_command() {
        let err = command_renderer("   ").unwrap_err();
        assert!(err.to_string().contains("Empty --render-command"));
        assert!(command_renderer("widdershins --search false").is_ok());
    }

    #[test]
    fn load_config_defaults_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config.api_version, 1);
    }

    #[test]
    fn load_config_reads_file() {
        let path = write_temp_file("config.yaml", "api_version: 9\n");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.api_version, 9);
    }

    #[test]
    fn load_config_missing_file_has_context() {
        let err = load_config(Some(Path::new("/nonexistent/routedoc.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
