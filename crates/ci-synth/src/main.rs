//! Synthetic data generator CLI.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ci_synth::{generate_raw_store, GeneratorOptions};

#[derive(Parser, Debug)]
#[command(
    name = "synth-cafes",
    version,
    about = "Generate a synthetic Edmonton cafe raw store"
)]
struct Cli {
    /// Raw store to create or append to
    #[arg(
        short,
        long,
        env = "SYNTH_OUTPUT",
        default_value = "data-private/raw/edmonton_cafes.sqlite"
    )]
    output: PathBuf,

    /// Number of competitor cafes to generate
    #[arg(long, default_value_t = 24)]
    competitors: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = GeneratorOptions {
        competitors: cli.competitors,
        seed: cli.seed,
    };

    match generate_raw_store(&cli.output, &options) {
        Ok(summary) => {
            info!(
                database = %cli.output.display(),
                total = summary.total,
                soc = summary.soc,
                competitors = summary.competitors,
                neighborhoods = summary.neighborhoods,
                "synthetic data generated successfully"
            );
        }
        Err(e) => {
            error!(error = %e, "generation failed");
            process::exit(1);
        }
    }
}
