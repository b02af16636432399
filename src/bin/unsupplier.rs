//! CLI for the log-unsupplier tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log_unsupplier::prelude::*;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "unsupplier")]
#[command(author, version, about = "Inline supplier arguments of SLF4J fluent log chains", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite supplier chains in a file or directory tree
    Rewrite {
        /// File or directory to process
        path: PathBuf,

        /// Preview changes without applying
        #[arg(long)]
        dry_run: bool,

        /// Print a unified diff of every change
        #[arg(long)]
        diff: bool,

        /// File extension to process (repeatable, e.g. "java")
        #[arg(short, long)]
        extension: Vec<String>,

        /// Glob pattern to include
        #[arg(short, long)]
        include: Option<String>,

        /// Glob pattern to exclude
        #[arg(long)]
        exclude: Option<String>,

        /// YAML or JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the rewritten text of a single file
    Show {
        /// Source file
        file: PathBuf,
    },

    /// Write the default configuration
    InitConfig {
        /// Destination (".json" selects JSON, anything else YAML)
        #[arg(default_value = "unsupplier.yaml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Rewrite {
            path,
            dry_run,
            diff,
            extension,
            include,
            exclude,
            config,
        } => cmd_rewrite(path, dry_run, diff, extension, include, exclude, config),
        Commands::Show { file } => cmd_show(file),
        Commands::InitConfig { path } => cmd_init_config(path),
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {err}"))
}

fn cmd_rewrite(
    path: PathBuf,
    dry_run: bool,
    diff: bool,
    extension: Vec<String>,
    include: Option<String>,
    exclude: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = match config {
        Some(ref file) => RefactorConfig::load(file)
            .with_context(|| format!("Failed to load config {}", file.display()))?,
        None => RefactorConfig::default(),
    };

    let mut refactor = Refactor::in_repo(&path).config(config);
    if !extension.is_empty() {
        refactor = refactor.extensions(extension);
    }
    if let Some(inc) = include {
        refactor = refactor.include(inc);
    }
    if let Some(exc) = exclude {
        refactor = refactor.exclude(exc);
    }
    if dry_run {
        refactor = refactor.dry_run();
    }

    let result = refactor.apply().context("Rewrite failed")?;

    let prefix = if dry_run { "[DRY] " } else { "" };
    for change in result.changes.iter().filter(|c| c.is_modified()) {
        println!("{prefix}Transformed: {}", change.path.display());
    }

    if diff && result.files_modified() > 0 {
        let style = if std::io::stdout().is_terminal() {
            DiffStyle::Colorized
        } else {
            DiffStyle::Plain
        };
        println!("\n{}", result.diff(style));
        println!("{}", result.summary);
    }

    println!("\n{}", result.report());
    if !result.failures.is_empty() {
        eprintln!("{} file(s) could not be processed", result.failures.len());
    }

    Ok(())
}

fn cmd_show(file: PathBuf) -> Result<()> {
    let bytes =
        std::fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
    let source = String::from_utf8_lossy(&bytes);
    let rewritten = SupplierTransform::new()
        .rewrite(&source, &file)
        .into_text(&source);
    print!("{rewritten}");
    Ok(())
}

fn cmd_init_config(path: PathBuf) -> Result<()> {
    let config = RefactorConfig::default();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        config.to_json(&path)
    } else {
        config.to_yaml(&path)
    }
    .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
