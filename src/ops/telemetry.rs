// * Telemetry - JSON Logging and Prometheus Metrics
// * Structured logs for every run, counters and a duration histogram per digest.

use crate::digest::DigestStats;
use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_histogram, Counter,
    CounterVec, Encoder, Gauge, Histogram, TextEncoder,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    // * Newsletters seen, split by whether they yielded any candidate chunk
    pub static ref NEWSLETTERS_PROCESSED_TOTAL: CounterVec = register_counter_vec!(
        "morning_newsletters_processed_total",
        "Newsletters processed by outcome",
        &["status"]
    ).expect("Invalid newsletters metric");

    // * Candidate chunks that survived the length filter
    pub static ref CANDIDATES_TOTAL: CounterVec = register_counter_vec!(
        "morning_candidates_total",
        "Candidate chunks produced",
        &["kind"]
    ).expect("Invalid candidates metric");

    // * Takeaways emitted across all digests
    pub static ref TAKEAWAYS_TOTAL: Counter = register_counter!(
        "morning_takeaways_total",
        "Takeaways built"
    ).expect("Invalid takeaways metric");

    // * Takeaways emitted by the last digest
    pub static ref TAKEAWAYS_LAST: Gauge = register_gauge!(
        "morning_takeaways_last",
        "Number of takeaways in the most recent digest"
    ).expect("Invalid takeaways metric");

    // * Distinct topics among the last digest's candidates
    pub static ref TOPICS_LAST: Gauge = register_gauge!(
        "morning_topics_last",
        "Number of distinct topics in the most recent digest"
    ).expect("Invalid topics metric");

    // * Wall time of one digest run
    pub static ref DIGEST_DURATION_SECONDS: Histogram = register_histogram!(
        "morning_digest_duration_seconds",
        "Digest duration in seconds",
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    ).expect("Invalid duration metric");
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initializes the tracing subscriber with JSON formatting
///
/// Logs go to stderr so stdout stays reserved for the digest itself.
///
/// # Example
/// ```ignore
/// use morning_edition::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(newsletters = 12, "Loaded briefing");
/// ```
pub fn init_tracing() {
    init_tracing_with_level("info");
}

/// Initializes tracing with custom log level
pub fn init_tracing_with_level(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty() {
    tracing_subscriber::registry()
        .with(env_filter("debug"))
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .init();
}

/// Records the outcome of one digest run
pub fn record_digest(stats: &DigestStats, seconds: f64) {
    let used = stats.newsletters_total.saturating_sub(stats.newsletters_skipped);

    NEWSLETTERS_PROCESSED_TOTAL
        .with_label_values(&["used"])
        .inc_by(used as f64);
    NEWSLETTERS_PROCESSED_TOTAL
        .with_label_values(&["skipped"])
        .inc_by(stats.newsletters_skipped as f64);
    CANDIDATES_TOTAL
        .with_label_values(&["chunk"])
        .inc_by(stats.candidate_count as f64);
    CANDIDATES_TOTAL
        .with_label_values(&["word"])
        .inc_by(stats.candidate_word_count as f64);
    TAKEAWAYS_TOTAL.inc_by(stats.takeaway_count as f64);
    TAKEAWAYS_LAST.set(stats.takeaway_count as f64);
    TOPICS_LAST.set(stats.topic_count as f64);
    DIGEST_DURATION_SECONDS.observe(seconds);
}

/// Returns the current metrics in Prometheus text format
pub fn get_metrics_string() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
