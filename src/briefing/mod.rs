// * Briefing Loader
// * Reads a stored briefing document from disk and turns its newsletter
// * section into records the digest can consume.

pub mod normalize;

pub use normalize::{newsletters_from_briefing, short_sender};

use crate::digest::NewsletterRecord;
use crate::error::BriefingError;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Parses briefing JSON text into newsletter records
///
/// Unlike `newsletters_from_briefing`, a document without any newsletter
/// section is an error here, since the caller asked for this file explicitly.
pub fn parse_briefing(json: &str) -> Result<Vec<NewsletterRecord>, BriefingError> {
    let doc: Value = serde_json::from_str(json)?;

    if normalize::newsletter_section(normalize::briefing_payload(&doc)).is_none() {
        return Err(BriefingError::MissingNewsletters);
    }

    let records = newsletters_from_briefing(&doc);
    debug!(count = records.len(), "Parsed briefing newsletters");
    Ok(records)
}

/// Loads and parses a briefing file
pub async fn load_briefing(path: impl AsRef<Path>) -> Result<Vec<NewsletterRecord>, BriefingError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await?;
    let records = parse_briefing(&raw)?;

    info!(
        path = %path.display(),
        newsletters = records.len(),
        "Loaded briefing"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_briefing_ok() {
        let records = parse_briefing(r#"{"newsletters": [{"subject": "Hi"}]}"#).unwrap();
        assert_eq!(records, vec![NewsletterRecord::new("Hi")]);
    }

    #[test]
    fn test_parse_briefing_empty_section_is_ok() {
        let records = parse_briefing(r#"{"newsletterHighlights": []}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_briefing_missing_section() {
        let err = parse_briefing(r#"{"weather": "sunny"}"#).unwrap_err();
        assert!(matches!(err, BriefingError::MissingNewsletters));
    }

    #[test]
    fn test_parse_briefing_invalid_json() {
        let err = parse_briefing("{not json").unwrap_err();
        assert!(matches!(err, BriefingError::Json(_)));
    }

    #[tokio::test]
    async fn test_load_briefing_missing_file() {
        let err = load_briefing("/definitely/not/here/briefing.json")
            .await
            .unwrap_err();
        assert!(matches!(err, BriefingError::Io(_)));
    }
}
