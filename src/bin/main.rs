// * Morning Edition CLI
// * Reads a stored briefing, prints the takeaway digest as JSON on stdout.

use clap::Parser;
use morning_edition::config::constants::DEFAULT_MAX_TAKEAWAYS;
use morning_edition::ops::telemetry;
use morning_edition::{load_briefing, short_sender, BriefingError, DigestConfig, TakeawaySelector};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

/// Morning Edition - newsletter takeaway digest
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Briefing JSON file (stored envelope or bare payload)
    briefing: PathBuf,

    /// Maximum number of takeaways to emit
    #[arg(short, long, default_value_t = DEFAULT_MAX_TAKEAWAYS)]
    max_takeaways: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Dump Prometheus metrics to stderr after the run
    #[arg(long)]
    metrics: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn run(args: &Args) -> Result<(), BriefingError> {
    let newsletters = load_briefing(&args.briefing).await?;

    let selector = TakeawaySelector::with_config(DigestConfig::with_max_takeaways(args.max_takeaways));
    let started = Instant::now();
    let report = selector.digest(&newsletters);
    telemetry::record_digest(&report.stats, started.elapsed().as_secs_f64());

    for takeaway in &report.takeaways {
        let senders: Vec<String> = takeaway
            .sources
            .iter()
            .map(|s| short_sender(s.sender.as_deref()))
            .collect();
        info!(
            title = %takeaway.title,
            bullets = takeaway.bullets.len(),
            sources = ?senders,
            "Takeaway"
        );
    }

    info!(
        newsletters = report.stats.newsletters_total,
        skipped = report.stats.newsletters_skipped,
        candidates = report.stats.candidate_count,
        topics = report.stats.topic_count,
        takeaways = report.stats.takeaway_count,
        words = report.stats.candidate_word_count,
        "Digest complete"
    );

    let output = if args.pretty {
        report.to_json_pretty()
    } else {
        report.to_json()
    };
    println!("{}", output);

    if args.metrics {
        eprintln!("{}", telemetry::get_metrics_string());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    telemetry::init_tracing_with_level(&args.log_level);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, path = %args.briefing.display(), "Digest failed");
            ExitCode::FAILURE
        }
    }
}
