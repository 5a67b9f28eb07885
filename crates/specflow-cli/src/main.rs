mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{check::CheckArgs, feature::FeatureSubcommand, Session};
use specflow_core::{config::Config, history::HistoryWriter, paths, types::ArtifactKind};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "specflow",
    about = "Spec-driven development for AI coding agents — resolve the current feature and check its artifacts",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .specflow/ or .git/)
    #[arg(long, global = true, env = "SPECFLOW_ROOT")]
    root: Option<PathBuf>,

    /// Feature to act on (directory name or number); overrides detection
    #[arg(long, global = true, env = "SPECFLOW_FEATURE")]
    feature: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize specflow in the current project
    Init,

    /// Create the next numbered feature and scaffold its spec.yaml
    Specify {
        slug: String,
        #[arg(long)]
        title: Option<String>,
    },

    /// Scaffold plan.yaml for the current feature (requires spec.yaml)
    Plan,

    /// Scaffold tasks.yaml for the current feature (requires plan.yaml)
    Tasks,

    /// Resolve the current feature and check its prerequisites
    Check(CheckArgs),

    /// Inspect features
    Feature {
        #[command(subcommand)]
        subcommand: FeatureSubcommand,
    },

    /// Show recent command history
    History {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init => "init",
            Commands::Specify { .. } => "specify",
            Commands::Plan => "plan",
            Commands::Tasks => "tasks",
            Commands::Check(_) => "check",
            Commands::Feature { subcommand } => subcommand.name(),
            Commands::History { .. } => "history",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cwd = root::current_dir();
    let root = root::resolve_root(cli.root.as_deref(), &cwd);

    let config = match Config::load(&root) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: failed to load {}: {e}", paths::CONFIG_FILE);
            std::process::exit(1);
        }
    };

    let session = Session {
        root,
        cwd,
        config,
        feature_override: cli.feature,
        json: cli.json,
    };

    let started = Instant::now();
    let result = match &cli.command {
        Commands::Init => cmd::init::run(&session),
        Commands::Specify { slug, title } => cmd::specify::run(&session, slug, title.clone()),
        Commands::Plan => cmd::artifact::run(&session, ArtifactKind::Plan),
        Commands::Tasks => cmd::artifact::run(&session, ArtifactKind::Tasks),
        Commands::Check(args) => cmd::check::run(&session, args),
        Commands::Feature { subcommand } => cmd::feature::run(&session, subcommand),
        Commands::History { limit } => cmd::history::run(&session, *limit),
    };
    let elapsed = started.elapsed();

    let exit_code = match &result {
        Ok(_) => 0,
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            1
        }
    };

    // Only initialized projects keep history.
    let record = session.config.history.enabled
        && paths::state_dir(&session.root).is_dir()
        && !matches!(cli.command, Commands::History { .. });
    if record {
        let spec = match &result {
            Ok(Some(name)) => name.clone(),
            _ => session.feature_override.clone().unwrap_or_else(|| "-".to_string()),
        };
        let writer = HistoryWriter::new(
            paths::history_path(&session.root),
            session.config.history.max_entries,
        );
        let outcome = writer.record(cli.command.name(), &spec, exit_code, elapsed);
        tracing::debug!("history: {outcome:?}");
    }

    std::process::exit(exit_code);
}
