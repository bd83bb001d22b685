//! Competitive position report: market positioning and quality /
//! reputation chart families.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ci_report::charts::{
    g51_metrics_comparison, g52_positioning_matrix, g61_rating_distribution, g62_quality_score,
};
use ci_report::data::load_cafes;
use ci_report::ReportError;

#[derive(Parser, Debug)]
#[command(
    name = "competitive-position",
    version,
    about = "Render the competitive position chart family from the derived store"
)]
struct Cli {
    /// Derived store to read
    #[arg(
        short,
        long,
        env = "REPORT_STORE",
        default_value = "data-private/derived/competition-intel.sqlite"
    )]
    store: PathBuf,

    /// Directory the chart prints are written into
    #[arg(short, long, default_value = "analysis/competitive-position/prints")]
    prints: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!(error = %e, "competitive position failed");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    let cafes = load_cafes(&cli.store)?;
    info!(cafes = cafes.len(), "loaded derived store");

    g51_metrics_comparison(&cafes, &cli.prints)?;
    g52_positioning_matrix(&cafes, &cli.prints)?;
    g61_rating_distribution(&cafes, &cli.prints)?;
    g62_quality_score(&cafes, &cli.prints)?;

    info!(prints = %cli.prints.display(), "competitive position complete");
    Ok(())
}
