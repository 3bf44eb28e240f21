use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::graph::{build_graph, build_store};
use crate::models::Diagnostic;
use crate::render::{write_dot, write_json};

/// Environment variable holding a `tracing` filter directive, e.g. `msn_social_graph=debug`
pub const LOG_ENV: &str = "MSN_GRAPH_LOG";

#[derive(Parser)]
#[command(name = "msn-social-graph")]
#[command(version = "0.1.0")]
#[command(about = "Generate an introduction graph from MSN Messenger XML chat logs", long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Location of the MSN chat logs (in XML format)
    #[arg(short = 'i', long = "in-dir", visible_alias = "inDir", required = true)]
    pub in_dir: Option<PathBuf>,

    /// The main user's email
    #[arg(
        short = 'm',
        long = "main-users-email",
        visible_alias = "mainUsersEmail",
        required = true
    )]
    pub main_users_email: Option<String>,

    /// Write the graph to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dot)]
    pub format: OutputFormat,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the chat logs
    Stats {
        /// Location of the MSN chat logs (in XML format)
        #[arg(short = 'i', long = "in-dir", visible_alias = "inDir")]
        in_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Graphviz digraph
    Dot,
    /// Edges and diagnostics as JSON
    Json,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match &cli.command {
        Some(Commands::Stats { in_dir }) => show_stats(in_dir),
        None => {
            let in_dir = cli.in_dir.as_deref().context("--in-dir is required")?;
            let main_email =
                cli.main_users_email.as_deref().context("--main-users-email is required")?;
            write_graph(in_dir, main_email, cli.output.as_deref(), cli.format)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn write_graph(
    in_dir: &Path,
    main_email: &str,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let report = build_graph(in_dir, main_email)?;

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Dot => write_dot(&mut out, &report.edges).context("Failed to write graph")?,
        OutputFormat::Json => write_json(&mut out, &report)?,
    }
    out.flush().context("Failed to write graph")?;

    Ok(())
}

fn show_stats(in_dir: &Path) -> Result<()> {
    let store = build_store(in_dir)?;

    let non_monotonic =
        count(store.diagnostics(), |d| matches!(d, Diagnostic::NonMonotonicPost { .. }));
    let missing_first =
        count(store.diagnostics(), |d| matches!(d, Diagnostic::MissingFirstSession { .. }));

    println!("MSN Chat Log Statistics");
    println!("=======================");
    println!("Contacts: {}", store.contact_count());
    println!("Sessions: {}", store.session_count());
    println!("Marker posts: {}", store.marker_count());
    println!("  Dropped non-monotonic posts: {}", non_monotonic);
    println!("  Missing first sessions: {}", missing_first);
    println!();
    println!("Chat log directory: {}", in_dir.display());

    let real_posts = || {
        store
            .contacts()
            .flat_map(|(_, c)| c.sessions())
            .flat_map(|s| s.posts())
            .filter(|p| !p.is_placeholder())
    };
    if let Some(oldest) = real_posts().min() {
        println!("Oldest post: {}", oldest);
    }
    if let Some(newest) = real_posts().max() {
        println!("Newest post: {}", newest);
    }

    Ok(())
}

fn count(diagnostics: &[Diagnostic], pred: impl Fn(&Diagnostic) -> bool) -> usize {
    diagnostics.iter().filter(|d| pred(d)).count()
}
