// * Operations
// * Goal: Observability for digest runs: structured logs and Prometheus metrics.

pub mod telemetry;

// * Re-exports for convenient access
pub use telemetry::{
    get_metrics_string, init_tracing, init_tracing_pretty, init_tracing_with_level, record_digest,
};
