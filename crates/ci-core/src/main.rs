//! Ferry CLI: raw store in, derived store out.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ci_config::FerryConfig;
use ci_core::{run_ferry, ExitCode, FerryOptions, FerrySummary};

#[derive(Parser, Debug)]
#[command(
    name = "ferry",
    version,
    about = "Transform the raw cafe table into the derived competition-intel store"
)]
struct Cli {
    /// Raw store to read
    #[arg(
        short,
        long,
        env = "FERRY_INPUT",
        default_value = "data-private/raw/edmonton_cafes.sqlite"
    )]
    input: PathBuf,

    /// Derived store to write (replaced wholesale)
    #[arg(
        short,
        long,
        env = "FERRY_OUTPUT",
        default_value = "data-private/derived/competition-intel.sqlite"
    )]
    output: PathBuf,

    /// Ferry configuration file (JSON); embedded defaults when omitted
    #[arg(long, env = "FERRY_CONFIG")]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    process::exit(run(cli).as_i32());
}

fn run(cli: Cli) -> ExitCode {
    let config = match &cli.config {
        Some(path) => match FerryConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, path = %path.display(), "failed to load config");
                return ExitCode::ConfigError;
            }
        },
        None => FerryConfig::default(),
    };

    let opts = FerryOptions {
        input: cli.input,
        output: cli.output,
        config,
    };

    info!(input = %opts.input.display(), output = %opts.output.display(), "ferry starting");
    match run_ferry(&opts) {
        Ok(summary) => {
            log_summary(&summary);
            info!(run_id = %summary.run_id, "ferry completed successfully");
            ExitCode::Clean
        }
        Err(e) => {
            error!(error = %e, code = e.code(), "ferry failed");
            ExitCode::from_error(&e)
        }
    }
}

fn log_summary(summary: &FerrySummary) {
    info!(
        input_records = summary.input_records,
        output_records = summary.output_records,
        dropped = summary.input_records - summary.output_records,
        "ferry validation report"
    );
    info!(
        warnings = summary.validation_warnings,
        out_of_bounds = summary.location_warnings,
        suspicious_price = summary.price_warnings,
        invalid_rating = summary.rating_warnings,
        negative_review_count = summary.review_count_warnings,
        "warning-level issues"
    );
    info!(
        avg_completeness = %format!("{:.1}%", summary.avg_completeness),
        low_fields = %summary.low_completeness_fields.join(", "),
        "completeness"
    );
    for tier in &summary.quality_distribution {
        info!(
            tier = %tier.quality_tier,
            count = tier.count,
            percentage = tier.percentage,
            "quality tier"
        );
    }
    info!(
        locations = summary.soc_count,
        avg_quality = %summary
            .soc_mean_quality
            .map(|q| format!("{q:.2}"))
            .unwrap_or_else(|| "n/a".to_string()),
        "square one coffee"
    );
    info!(
        count = summary.competitor_count,
        avg_quality = %summary
            .competitor_mean_quality
            .map(|q| format!("{q:.2}"))
            .unwrap_or_else(|| "n/a".to_string()),
        "competitors"
    );
}
