//! Proposal Generator CLI entry point.
//!
//! Provides `init`, `generate` and `validate` subcommands.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use proposal_generator::assembler::{self, ProposalDocument};
use proposal_generator::config::{load_config, runtime_paths, Config};
use proposal_generator::drafting::{Drafter, DraftingConfig};
use proposal_generator::layout::Skeleton;
use proposal_generator::render::Fragment;
use proposal_generator::{credentials, logging, metadata, providers, scaffold};

/// Proposal Generator: branded marketing proposals from client metadata.
#[derive(Parser)]
#[command(name = "proposal-generator", version, about)]
struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Scaffold a project directory with a starter metadata.json.
    Init {
        /// Client name, e.g. "Acme Corp".
        client_name: String,
        /// Parent directory for the project (default: configured root, else ~/AI).
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Config file (default: ~/.proposal-generator/config.toml).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Render a project's metadata.json into a proposal HTML file.
    Generate {
        /// Project directory containing metadata.json.
        input_dir: PathBuf,
        /// Output HTML file.
        output_file: PathBuf,
        /// Draft section prose with the configured text-generation model.
        #[arg(long)]
        draft: bool,
        /// Config file (default: ~/.proposal-generator/config.toml).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check that a project's metadata.json loads and has the required fields.
    Validate {
        /// Project directory containing metadata.json.
        input_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    match cli.command {
        Command::Init {
            client_name,
            dir,
            config,
        } => handle_init(&client_name, dir, config.as_deref()),
        Command::Generate {
            input_dir,
            output_file,
            draft,
            config,
        } => handle_generate(&input_dir, &output_file, draft, config.as_deref()).await,
        Command::Validate { input_dir } => handle_validate(&input_dir),
    }
}

/// Load the config from `path`, or from the runtime directory.
fn resolve_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => {
            let paths = runtime_paths()?;
            load_config(&paths.config_toml)
        }
    }
}

fn handle_init(client_name: &str, dir: Option<PathBuf>, config: Option<&Path>) -> anyhow::Result<()> {
    let base_dir = match dir {
        Some(dir) => dir,
        None => resolve_config(config)?.projects.resolve_root()?,
    };
    let today = chrono::Local::now().date_naive();
    let project_dir = scaffold::init_project(client_name, &base_dir, today)
        .with_context(|| format!("failed to initialize project for {client_name:?}"))?;

    let metadata_path = project_dir.join(metadata::METADATA_FILE_NAME);
    println!("Created proposal project for: {client_name}");
    println!("Location: {}", project_dir.display());
    println!();
    println!("Next steps:");
    println!("1. Edit: {}", metadata_path.display());
    println!(
        "2. Run:  proposal-generator generate {} {}",
        project_dir.display(),
        project_dir.join("Proposal.html").display()
    );
    Ok(())
}

async fn handle_generate(
    input_dir: &Path,
    output_file: &Path,
    draft: bool,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = resolve_config(config)?;
    let metadata = metadata::load_project(input_dir)
        .with_context(|| format!("failed to load project {}", input_dir.display()))?;
    metadata.validate()?;
    let skeleton = Skeleton::embedded()?;

    let fragments = if draft {
        draft_fragments(&config, &metadata, output_file).await?
    } else {
        assembler::render_fragments(&metadata)?
    };

    let document: ProposalDocument =
        assembler::assemble_document(&metadata, &fragments, &skeleton, &config.branding)?;
    assembler::write_document(&document, output_file)?;

    println!("Proposal generated: {}", output_file.display());
    println!("Size: {} bytes", document.len());
    Ok(())
}

async fn draft_fragments(
    config: &Config,
    metadata: &metadata::ClientMetadata,
    output_file: &Path,
) -> anyhow::Result<Vec<Fragment>> {
    let credentials = credentials::load_default_credentials()
        .context("failed to load credentials")?;
    let provider = providers::provider_from_spec(&config.drafting.model, &credentials)
        .with_context(|| format!("cannot draft with model {:?}", config.drafting.model))?;
    let drafter = Drafter::new(provider, DraftingConfig::from(&config.drafting));

    info!(model = %config.drafting.model, "drafting sections");
    let outcome = drafter.draft_all(metadata).await?;
    if !outcome.fallbacks.is_empty() {
        warn!(
            sections = ?outcome.fallbacks,
            "some sections use template text"
        );
    }

    let data_path = drafted_data_path(output_file);
    let data: serde_json::Map<String, serde_json::Value> = outcome
        .fragments
        .iter()
        .map(|fragment| {
            (
                fragment.section.key().to_owned(),
                serde_json::Value::String(fragment.html.as_str().to_owned()),
            )
        })
        .collect();
    let json = serde_json::to_string_pretty(&data).context("failed to encode drafted sections")?;
    if let Some(parent) = data_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&data_path, json)
        .with_context(|| format!("failed to write {}", data_path.display()))?;
    println!("Drafted sections saved: {}", data_path.display());

    Ok(outcome.fragments)
}

/// `<dir>/<stem>_data.json` next to the output file.
fn drafted_data_path(output_file: &Path) -> PathBuf {
    let stem = output_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "proposal".to_owned());
    output_file.with_file_name(format!("{stem}_data.json"))
}

fn handle_validate(input_dir: &Path) -> anyhow::Result<()> {
    let metadata = metadata::load_project(input_dir)
        .with_context(|| format!("failed to load project {}", input_dir.display()))?;
    metadata.validate()?;

    let enabled: Vec<&str> = metadata
        .strategy
        .enabled_pillars()
        .map(|(key, _)| key)
        .collect();
    println!("metadata OK: {}", metadata.client_name()?);
    println!("  enabled pillars: {}", if enabled.is_empty() { "none".to_owned() } else { enabled.join(", ") });
    println!("  packages: {}", metadata.investment.packages.len());
    Ok(())
}
