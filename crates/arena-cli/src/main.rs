//! Arena CLI - behavior tree agent driver.
//!
//! - `arena validate <TREE>` - check that a tree document builds
//! - `arena conditions` - list the conditions trees can refer to
//! - `arena run` - replay JSON-lines game info through an agent

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arena_bt::{AgentConfig, BtAgent, Loader};
use arena_core::{ConditionRegistry, GameInfo};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Behavior tree fighting agent", version)]
struct Cli {
    /// Project directory containing arena.yaml
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Explicit config file (overrides --project lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tree document and report its size
    Validate {
        /// Tree document to check
        tree: PathBuf,
    },

    /// List registered condition names
    Conditions,

    /// Feed game info through an agent, one JSON object per line
    Run {
        /// Input file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Tree document (overrides the configured one)
        #[arg(long)]
        tree: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `run` output stays machine-readable.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let project_root = match cli.project {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config = load_config(&project_root, cli.config.as_deref())?;
    let conditions = ConditionRegistry::builtin();

    match cli.command {
        Commands::Validate { tree } => validate(&config, &conditions, &tree),
        Commands::Conditions => {
            for name in conditions.names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Run { input, tree } => {
            let mut config = config;
            if let Some(tree) = tree {
                config.tree = tree;
            }
            run(&config, &conditions, input.as_deref())
        }
    }
}

fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<AgentConfig> {
    // Tree paths are relative to the directory holding the config.
    let (mut config, root) = match explicit {
        Some(path) => (
            AgentConfig::load(path)?,
            path.parent().unwrap_or(Path::new(".")),
        ),
        None => (AgentConfig::load_from_dir(project_root)?, project_root),
    };
    config.resolve_paths(root);
    Ok(config)
}

fn validate(config: &AgentConfig, conditions: &ConditionRegistry, tree: &Path) -> Result<()> {
    let root = Loader::new(conditions, &config.actions)
        .load_file(tree)
        .with_context(|| format!("Invalid behavior tree {}", tree.display()))?;

    println!(
        "{}: ok ({} nodes, root {} {:?})",
        tree.display(),
        root.node_count(),
        root.kind(),
        root.name().unwrap_or_default()
    );
    Ok(())
}

fn run(config: &AgentConfig, conditions: &ConditionRegistry, input: Option<&Path>) -> Result<()> {
    tracing::info!(tree = %config.tree.display(), "Starting agent");

    let mut agent = BtAgent::from_config(config, conditions)
        .with_context(|| format!("Failed to load behavior tree {}", config.tree.display()))?;

    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let info: GameInfo = serde_json::from_str(&line)
            .with_context(|| format!("Invalid game info on line {}", line_no + 1))?;
        let decision = agent.tick(&info);
        writeln!(out, "{}", serde_json::to_string(&decision)?)?;
    }

    tracing::info!(frames = agent.frames(), last = ?agent.last_status(), "Agent finished");
    Ok(())
}
