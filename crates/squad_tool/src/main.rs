//! Squad Tool CLI
//!
//! Squad export + tactic file → per-slot rankings, coverage and recruitment targets

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use squad_core::{load_catalog, rank_slots_for_player, AnalysisContext, LoadedCatalog, PlayerSnapshot};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "squad_tool")]
#[command(about = "Score a Football Manager squad against a tactic", long_about = None)]
struct Cli {
    /// Requirement catalog (YAML/JSON). Falls back to SQUAD_CATALOG_PATH, then the embedded catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Rank the squad for every slot of a tactic
    Analyze {
        /// Squad export (.csv or .json)
        #[arg(long)]
        squad: PathBuf,

        /// Tactic definition (.yaml or .json)
        #[arg(long)]
        tactic: PathBuf,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show how one player fits each slot of a tactic
    Player {
        #[arg(long)]
        squad: PathBuf,

        #[arg(long)]
        tactic: PathBuf,

        /// Player id (row number when the export has no id column)
        #[arg(long)]
        id: u32,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List role codes and names known to the catalog
    Roles,

    /// Load the catalog and report data problems
    ValidateCatalog,
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let LoadedCatalog { catalog, source } =
        load_catalog(cli.catalog.as_deref()).context("Failed to load attribute catalog")?;

    match cli.command {
        Commands::Analyze {
            squad,
            tactic,
            format,
            out,
        } => {
            let players = load_players(&squad)?;

            let mut context = AnalysisContext::new();
            context.activate(squad_tool::load_tactic(&tactic)?);
            let analysis = context.analyze_active(&catalog, &players)?;

            let rendered = match format {
                OutputFormat::Text => squad_tool::render_tactic_analysis(&analysis),
                OutputFormat::Json => serde_json::to_string_pretty(&squad_tool::AnalysisReport::new(
                    analysis,
                    source.to_string(),
                ))?,
            };
            emit(&rendered, out.as_deref())?;
        }

        Commands::Player {
            squad,
            tactic,
            id,
            format,
        } => {
            let players = load_players(&squad)?;
            let tactic = squad_tool::load_tactic(&tactic)?;
            let player = players
                .iter()
                .find(|p| p.id == id)
                .with_context(|| format!("No player with id {} in {}", id, squad.display()))?;

            let fits = rank_slots_for_player(&catalog, &tactic, player);
            match format {
                OutputFormat::Text => print!("{}", squad_tool::render_player_fits(&player.name, &fits)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fits)?),
            }
        }

        Commands::Roles => {
            print!("{}", squad_tool::render_roles(catalog.roles()));
        }

        Commands::ValidateCatalog => {
            let issues = catalog.diagnostics();
            println!("Catalog: {}", source);
            println!("   Entries: {}", catalog.len());
            println!("   Roles:   {}", catalog.roles().len());
            if issues.is_empty() {
                println!("✅ No issues found");
            } else {
                println!("⚠️  {} issue(s):", issues.len());
                print!("{}", squad_tool::render_catalog_issues(&issues));
            }
        }
    }

    Ok(())
}

/// Load a squad file, warning when rows had to be skipped.
#[cfg(feature = "cli")]
fn load_players(path: &Path) -> Result<Vec<PlayerSnapshot>> {
    let (players, stats) = squad_tool::load_squad(path)?;
    if stats.failed > 0 {
        tracing::warn!(
            path = %path.display(),
            failed = stats.failed,
            parsed = stats.parsed,
            "some squad rows were skipped"
        );
    }
    Ok(players)
}

#[cfg(feature = "cli")]
fn emit(rendered: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("squad_tool CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
