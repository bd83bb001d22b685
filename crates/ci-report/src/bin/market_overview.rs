//! Market overview report: geographic distribution, pricing landscape,
//! and market segmentation chart families.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ci_report::charts::{
    g21_cafe_concentration, g22_geographic_map, g23_location_zones, g31_price_distribution,
    g32_price_categories, g41_cafe_type_distribution,
};
use ci_report::data::load_cafes;
use ci_report::ReportError;

#[derive(Parser, Debug)]
#[command(
    name = "market-overview",
    version,
    about = "Render the market overview chart family from the derived store"
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
    #[arg(short, long, default_value = "analysis/market-overview/prints")]
    prints: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!(error = %e, "market overview failed");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    let cafes = load_cafes(&cli.store)?;
    let soc = cafes.iter().filter(|c| c.is_soc).count();
    info!(
        cafes = cafes.len(),
        soc,
        competitors = cafes.len() - soc,
        "loaded derived store"
    );

    g21_cafe_concentration(&cafes, &cli.prints)?;
    g22_geographic_map(&cafes, &cli.prints)?;
    g23_location_zones(&cafes, &cli.prints)?;
    g31_price_distribution(&cafes, &cli.prints)?;
    g32_price_categories(&cafes, &cli.prints)?;
    g41_cafe_type_distribution(&cafes, &cli.prints)?;

    info!(prints = %cli.prints.display(), "market overview complete");
    Ok(())
}
