//! Log Merger: merge timestamped log files into one annotated document.
//!
//! Prints the path of the merged document on stdout; diagnostics go to
//! stderr through `tracing`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lm_cli::app;
use lm_cli::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "log-merger starting");

    let now = chrono::Local::now().naive_local();
    let outcome = app::run(&args, now).await?;

    println!("{}", outcome.output_path.display());
    if let Some(path) = &outcome.line_map_path {
        println!("{}", path.display());
    }

    if let Some(line) = args.describe_line {
        match outcome.report.describe_line(line) {
            Some(desc) => println!(
                "line {}: {} ({}) - {} entries",
                desc.line, desc.file, desc.color, desc.entry_count
            ),
            None => println!("line {line}: not mapped to a source file"),
        }
    }

    Ok(())
}
