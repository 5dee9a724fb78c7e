use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use motif_locator::helper_functions::{data_dir, read_config_json, LocatorConfig};
use motif_locator::session::{OutputFormat, Session};
use motif_locator::OrganismLoader;

#[derive(Parser)]
#[command(name = "motif-locator")]
#[command(about = "Locate a nucleotide motif and report the genes around it", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding <organism>.ptt and <organism>.fna files
    #[arg(short = 'd', long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON settings file
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Organism to load; without it the locator runs interactively
    #[arg(short = 'o', long, value_name = "NAME")]
    organism: Option<String>,

    /// Motif to look up, may be given more than once
    #[arg(short = 'm', long = "motif", value_name = "MOTIF", requires = "organism")]
    motifs: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print the first N genes after loading
    #[arg(long, value_name = "N")]
    show_genes: Option<usize>,

    /// Print the first N bases after loading
    #[arg(long, value_name = "N")]
    head: Option<usize>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => read_config_json(path)?,
        None => LocatorConfig::default(),
    };
    let data_dir = data_dir(cli.data_dir.as_deref(), &config);
    info!("Reading organisms from {}", data_dir.display());

    let mut session = Session::new(OrganismLoader::from_config(data_dir, &config));
    session.format = if cli.json { OutputFormat::Json } else { OutputFormat::Text };
    session.show_genes = cli.show_genes;
    session.head = cli.head;

    let stdout = io::stdout();
    let Some(organism) = cli.organism else {
        return session
            .run_interactive(io::stdin().lock(), stdout.lock())
            .context("interactive session failed");
    };

    let mut out = stdout.lock();
    let genome = session
        .open(&organism)
        .with_context(|| format!("could not load organism {organism}"))?;
    session.preview(&genome, &mut out)?;
    for motif in &cli.motifs {
        session.query(&genome, motif, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
