//! compkit - pull design-system components and their dependencies
//! from a remote registry into a local theme tree.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing_subscriber::EnvFilter;

use compkit_core::registry::{
    ContentSource, DirSink, FileSink, GithubSource, Materializer, RegistryIndex,
    DEFAULT_REGISTRY_REPO, STARTER_COMPONENTS,
};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "compkit",
    about = "Pull design-system components and their dependencies from a remote registry",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Destination root the registry's path structure is mirrored under
    #[clap(long, default_value = ".", global = true)]
    dest: PathBuf,

    /// Component registry repository on GitHub (owner/name)
    #[clap(long, default_value = DEFAULT_REGISTRY_REPO, global = true)]
    repo: String,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a component and everything it needs
    Add {
        /// Component name (a bare leaf name like "card", or a more
        /// qualified partial path)
        name: String,
    },

    /// Add the well-known starter components
    Starter,

    /// List registry paths, optionally filtered
    List {
        /// Substring to filter paths by
        query: Option<String>,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Download the base stylesheets
    Styles,
}

/// Configure logging to stderr so command output on stdout stays clean.
fn initialize_tracing(log_level: &LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let source = GithubSource::new(&cli.repo)?;
    let sink = DirSink::new(&cli.dest);

    match cli.command {
        Command::Add { name } => add_command(source, sink, &name).await,
        Command::Starter => starter_command(source, sink).await,
        Command::List { query, json } => list_command(&source, query.as_deref(), json).await,
        Command::Styles => styles_command(&source, &sink).await,
    }
}

async fn add_command(source: GithubSource, sink: DirSink, name: &str) -> Result<()> {
    let materializer = Materializer::connect(source, sink).await?;
    materializer.add(name).await?;

    println!("Added component: {name}");
    Ok(())
}

async fn starter_command(source: GithubSource, sink: DirSink) -> Result<()> {
    let materializer = Materializer::connect(source, sink).await?;
    materializer.add_starter().await?;

    println!("Added {} starter component(s):", STARTER_COMPONENTS.len());
    for name in STARTER_COMPONENTS {
        println!("  - {name}");
    }
    Ok(())
}

/// Table row for registry listings
#[derive(Tabled)]
struct IndexRow {
    #[tabled(rename = "Path")]
    path: String,
}

async fn list_command(source: &GithubSource, query: Option<&str>, json_output: bool) -> Result<()> {
    println!("Fetching registry index...");
    let index = RegistryIndex::new(source.fetch_index().await?);

    let paths: Vec<&str> = match query {
        Some(q) => index.search(q).iter().map(|e| e.path.as_str()).collect(),
        None => index.entries().iter().map(|e| e.path.as_str()).collect(),
    };

    if paths.is_empty() {
        println!("\nNo matching registry paths.");
        return Ok(());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        println!("\nFound {} path(s):\n", paths.len());

        let rows: Vec<IndexRow> = paths
            .iter()
            .map(|path| IndexRow {
                path: path.to_string(),
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();

        println!("{table}");
    }

    Ok(())
}

/// Stylesheet directories fetched by the styles command
const BASE_CSS_DIRS: &[&str] = &["01-base/global/css", "01-base/global/css/general"];

/// Presence of this file means the base stylesheets are already in place
const BASE_CSS_INDEX: &str = "01-base/global/css/index.pcss.css";

async fn styles_command(source: &GithubSource, sink: &DirSink) -> Result<()> {
    if sink.exists(&format!("source/{BASE_CSS_INDEX}")) {
        println!("Base stylesheet already exists, nothing to do.");
        return Ok(());
    }

    for dir in BASE_CSS_DIRS {
        let files = source
            .list_component(dir)
            .await
            .with_context(|| format!("could not reach stylesheets under '{dir}'"))?;

        for file in &files {
            // Contents listings include subdirectories; only entries
            // with a download URL are files.
            if file.download_url.is_none() {
                continue;
            }

            let bytes = source.fetch_file(file).await?;
            sink.write(&format!("source/{dir}/{}", file.name), &bytes)?;
        }
    }

    println!(
        "Downloaded base stylesheets to {}",
        sink.root().join("source").join(BASE_CSS_DIRS[0]).display()
    );
    Ok(())
}
