//! CLI for `apidog-swagger`.
//!
//! # Subcommands
//!
//! ```text
//! # Build the document from a route manifest and write it
//! apidog-swagger generate \
//!   --manifest routes.yaml \
//!   --config config/swagger.yaml \
//!   --cargo-toml Cargo.toml
//!
//! # Inspect individual building blocks
//! apidog-swagger base-path 'App\Controller\UserController'
//! apidog-swagger infer --payload sample.json --name UserIdGetResponse200
//! apidog-swagger rule-type 'required|int|between:1,100'
//! ```

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use apidog_swagger::{CollisionPolicy, DocumentStore, ExampleValue, Manifest, ProjectConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Swagger 2.0 document generator for annotated route handlers.
#[derive(Parser)]
#[command(name = "apidog-swagger", version, about)]
enum Cli {
    /// Build the Swagger document from a route manifest.
    Generate(GenerateArgs),

    /// Print the default path prefix derived from a handler type name.
    BasePath(BasePathArgs),

    /// Infer definitions from an example payload and print them.
    Infer(InferArgs),

    /// Print the type a validation rule string is documented as.
    RuleType(RuleTypeArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    /// Route manifest (YAML, or JSON with a `.json` extension).
    #[arg(short, long)]
    manifest: PathBuf,

    /// Project config with the document skeleton and output path.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file. Overrides `output_file` from the config.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Collision policy. Overrides `collisions` from the config.
    #[arg(long)]
    collisions: Option<CollisionPolicy>,

    /// Version string for `info.version`. Mutually exclusive with `--cargo-toml`.
    #[arg(long = "api-version", conflicts_with = "cargo_toml")]
    api_version: Option<String>,

    /// Read `info.version` from this `Cargo.toml`.
    #[arg(long)]
    cargo_toml: Option<PathBuf>,

    /// Print the document to stdout as well.
    #[arg(long)]
    stdout: bool,
}

#[derive(Parser)]
struct BasePathArgs {
    /// Fully qualified handler type name.
    type_name: String,
}

#[derive(Parser)]
struct InferArgs {
    /// Example payload file (JSON, or YAML with a non-`.json` extension).
    #[arg(short, long)]
    payload: PathBuf,

    /// Name of the top-level definition.
    #[arg(short, long, default_value = "Root")]
    name: String,
}

#[derive(Parser)]
struct RuleTypeArgs {
    /// Pipe-delimited rule string.
    rule: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli {
        Cli::Generate(args) => run_generate(&args),
        Cli::BasePath(args) => {
            println!("{}", apidog_swagger::base_path(&args.type_name));
            Ok(())
        }
        Cli::Infer(args) => run_infer(&args),
        Cli::RuleType(args) => {
            println!("{}", apidog_swagger::rule_type(&args.rule));
            Ok(())
        }
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let mut project = match &args.config {
        Some(path) => {
            eprintln!("Loading config: {}", path.display());
            ProjectConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
        None => ProjectConfig::default(),
    };
    if let Some(output) = &args.output {
        project.output_file = Some(output.clone());
    }
    if let Some(policy) = args.collisions {
        project.collisions = policy;
    }

    let manifest = Manifest::load(&args.manifest)
        .with_context(|| format!("Failed to load manifest: {}", args.manifest.display()))?;
    eprintln!(
        "Loaded {} controllers, {} routes",
        manifest.controllers.len(),
        manifest.route_count(),
    );

    let mut doc = DocumentStore::from_config(&project).context("Failed to seed document")?;
    if let Some(version) = resolve_version(args.api_version.as_ref(), args.cargo_toml.as_ref())? {
        doc.set_version(&version);
    }

    let summary = manifest
        .apply(&mut doc)
        .context("Failed to register routes")?;
    eprintln!(
        "Registered {} routes ({} skipped), {} definitions, {} collisions",
        summary.registered,
        summary.skipped,
        doc.definitions().len(),
        doc.collisions().len(),
    );

    if args.stdout {
        println!("{}", doc.to_json_string()?);
    }

    if doc.save().context("Failed to write document")? {
        if let Some(path) = doc.output_file() {
            eprintln!("Swagger document ready: {}", path.display());
        }
    } else if !args.stdout {
        eprintln!("No output file configured; use --output or --stdout");
    }

    Ok(())
}

fn run_infer(args: &InferArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.payload)
        .with_context(|| format!("Failed to read payload: {}", args.payload.display()))?;
    let payload: ExampleValue = if args.payload.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content).context("Failed to parse payload JSON")?
    } else {
        serde_yaml_ng::from_str(&content).context("Failed to parse payload YAML")?
    };

    let mut doc = DocumentStore::new();
    if apidog_swagger::infer_definition(&mut doc, &payload, &args.name, 0)?.is_none() {
        bail!("Payload is empty or not an object/array; nothing to infer");
    }

    println!("{}", serde_json::to_string_pretty(doc.definitions())?);
    Ok(())
}

/// Resolve version from explicit flag or a Cargo.toml path.
fn resolve_version(
    explicit: Option<&String>,
    cargo_toml: Option<&PathBuf>,
) -> anyhow::Result<Option<String>> {
    match (explicit, cargo_toml) {
        (Some(v), _) => Ok(Some(v.clone())),
        (_, Some(path)) => read_cargo_version(path).map(Some),
        (None, None) => Ok(None),
    }
}

/// Read `version` from a Cargo.toml.
///
/// `[package].version` wins. A package inheriting its version
/// (`version.workspace = true`) or a bare workspace manifest falls back to
/// `[workspace.package].version`.
fn read_cargo_version(path: &Path) -> anyhow::Result<String> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest: toml::Table =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    let workspace_package = manifest.get("workspace").and_then(|w| w.get("package"));
    [manifest.get("package"), workspace_package]
        .into_iter()
        .flatten()
        .find_map(|package| package.get("version").and_then(toml::Value::as_str))
        .map(str::to_string)
        .with_context(|| format!("No version found in {}", path.display()))
}
