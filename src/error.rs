use thiserror::Error;

// * Unified Error type for the fallible outer layers (ingestion, rule tables, CLI).
// * The takeaway engine itself never fails.
#[derive(Error, Debug)]
pub enum BriefingError {
    #[error("Failed to read briefing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed briefing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern for topic '{topic}': {source}")]
    InvalidPattern {
        topic: String,
        #[source]
        source: regex::Error,
    },

    #[error("Briefing has no newsletter section")]
    MissingNewsletters,
}
