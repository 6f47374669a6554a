use anyhow::Context;
use clap::Parser;
use daylight_extract::BatchProcessor;
use daylight_extract::cli::{Args, metric_selection};
use std::io;
use std::process;
use tracing::{debug, warn};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Logging goes to stderr so stdout stays readable for the summary
    if let Err(error) = setup_logging(&args) {
        eprintln!("Failed to initialise logging: {:#}", error);
    }

    match run(args).await {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let processor = BatchProcessor::new(args.folder.clone())
        .context("Cannot open results folder")?
        .with_config(args.to_config());

    // Metric labels come from the filename suffixes in the folder
    let metrics = processor
        .discover_metrics()
        .context("Failed to scan results folder")?;
    debug!(
        "Discovered metrics in {}: {:?}",
        processor.folder().display(),
        metrics
    );

    if args.list_metrics {
        metric_selection::print_metrics(&metrics, &mut io::stdout())?;
        return Ok(());
    }

    // Prompt for a metric when none was given on the command line
    let metric = match args.metric {
        Some(metric) => metric,
        None => {
            let stdin = io::stdin();
            metric_selection::select_metric(&metrics, &mut stdin.lock(), &mut io::stdout())?
        }
    };

    // Run the extraction, abandoning it on CTRL+C
    processor
        .run_until(&metric, args.area, args.output, shutdown_signal())
        .await
        .with_context(|| format!("Extraction failed for metric '{}'", metric))?;

    Ok(())
}

/// Resolves on CTRL+C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!("Failed to install CTRL+C signal handler: {}", error);
        std::future::pending::<()>().await;
    }
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("daylight_extract={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
