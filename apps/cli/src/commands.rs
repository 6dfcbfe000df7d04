//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use docnav_core::{AnnotateOptions, AnnotateReport, build_navigation};
use docnav_shared::{AppConfig, NavNode, NavTree, init_config, init_config_at, load_config, load_config_from};
use docnav_sources::SourceSet;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// DocNav — navigation trees for multi-source documentation.
#[derive(Parser)]
#[command(
    name = "docnav",
    version,
    about = "Build ordered navigation trees from documentation sources.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.docnav/docnav.toml).
    #[arg(short, long, global = true, env = "DOCNAV_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build, flag and order the navigation tree, then print it.
    Tree {
        /// Print the annotated tree as JSON.
        #[arg(long)]
        json: bool,

        /// Include nodes hidden by order files.
        #[arg(long)]
        all: bool,
    },

    /// Run both passes and report content and ordering diagnostics.
    Check,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docnav=info",
        1 => "docnav=debug",
        _ => "docnav=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Tree { json, all } => cmd_tree(config_path, json, all).await,
        Command::Check => cmd_check(config_path).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path).await,
            ConfigAction::Show => cmd_config_show(config_path).await,
        },
    }
}

fn resolve_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(&p)?,
        None => load_config()?,
    };
    config.validate()?;
    Ok(config)
}

/// Build and annotate the tree for every configured source.
async fn navigation(config_path: Option<PathBuf>) -> Result<(NavTree, AnnotateReport)> {
    let config = resolve_config(config_path)?;
    if config.sources.is_empty() {
        return Err(eyre!(
            "no sources configured: add a [[sources]] entry to the config file"
        ));
    }

    let sources = SourceSet::from_config(&config.sources);
    let options = AnnotateOptions::from_config(&config.navigation)?;

    info!(sources = sources.len(), "building navigation tree");
    Ok(build_navigation(&sources, &options).await?)
}

async fn cmd_tree(config_path: Option<PathBuf>, json: bool, all: bool) -> Result<()> {
    let (tree, _report) = navigation(config_path).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    let roots: Vec<&NavNode> = if all {
        sorted_all(tree.roots().values())
    } else {
        tree.visible_roots()
    };
    for node in roots {
        print_node(node, 0, all);
    }
    Ok(())
}

fn sorted_all<'a>(nodes: impl Iterator<Item = &'a NavNode>) -> Vec<&'a NavNode> {
    let mut nodes: Vec<&NavNode> = nodes.collect();
    nodes.sort_by_key(|n| (n.is_hidden(), n.order));
    nodes
}

fn print_node(node: &NavNode, depth: usize, all: bool) {
    let indent = "  ".repeat(depth);
    let mut line = format!("{indent}{}", node.file_name);
    if !node.is_leaf() {
        line.push('/');
    }
    if !node.has_content {
        line.push_str("  (no content)");
    }
    if node.is_hidden() {
        line.push_str("  (hidden)");
    }
    println!("{line}");

    let children = if all {
        sorted_all(node.children().into_iter().flat_map(|c| c.values()))
    } else {
        node.visible_children()
    };
    for child in children {
        print_node(child, depth + 1, all);
    }
}

async fn cmd_check(config_path: Option<PathBuf>) -> Result<()> {
    let (tree, report) = navigation(config_path).await?;

    println!();
    println!("  Navigation tree OK");
    println!("  Nodes:      {}", tree.node_count());
    println!("  Content:    {}", report.flags.content_nodes);
    println!("  Structural: {}", report.flags.structural_nodes);
    println!("  Overrides:  {}", report.order.scopes_overridden);
    println!("  Hidden:     {}", report.order.hidden_count());
    for location in report.order.hidden() {
        println!("    - {location}");
    }
    println!(
        "  Time:       {:.1}ms",
        report.elapsed.as_secs_f64() * 1000.0
    );
    println!();

    Ok(())
}

async fn cmd_config_init(config_path: Option<PathBuf>) -> Result<()> {
    let path = match config_path {
        Some(p) => init_config_at(&p)?,
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
