// * Digest data model: newsletter input, scored chunks, takeaway output

use crate::refinery::normalize_body;
use serde::{Deserialize, Serialize};

/// One newsletter message as supplied by the ingestion layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterRecord {
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Full body, may contain markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Short summary, used when the body is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

impl NewsletterRecord {
    /// Creates a record with only a subject
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_received_at(mut self, received_at: impl Into<String>) -> Self {
        self.received_at = Some(received_at.into());
        self
    }

    /// Normalized body text, or `None` if the newsletter has nothing usable
    ///
    /// A non-empty body wins even if it is only whitespace, in which case the
    /// newsletter has no usable text. An empty body falls back to the summary.
    pub fn body_text(&self) -> Option<String> {
        let raw = self
            .body
            .as_deref()
            .filter(|b| !b.is_empty())
            .or(self.summary.as_deref())?;
        normalize_body(raw)
    }

    /// Attribution key: the url when present, else the subject, lowercased
    pub fn source_key(&self) -> String {
        self.url.as_deref().unwrap_or(&self.subject).to_lowercase()
    }
}

/// A scored candidate passage tied to its newsletter
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk<'a> {
    pub newsletter: &'a NewsletterRecord,
    pub text: String,
    pub score: i32,
    pub topic_id: String,
    pub topic_label: String,
}

/// One topic summary with supporting bullets and attributions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Takeaway<'a> {
    pub title: String,
    pub bullets: Vec<String>,
    pub sources: Vec<&'a NewsletterRecord>,
}

/// Counters gathered while building a digest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestStats {
    pub newsletters_total: usize,
    pub newsletters_skipped: usize,
    pub candidate_count: usize,
    pub topic_count: usize,
    pub takeaway_count: usize,
    pub candidate_word_count: usize,
}

/// Takeaways plus the statistics of the run that produced them
#[derive(Debug, Clone, Default, Serialize)]
pub struct DigestReport<'a> {
    pub takeaways: Vec<Takeaway<'a>>,
    pub stats: DigestStats,
}

impl DigestReport<'_> {
    /// Converts report to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Converts report to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
