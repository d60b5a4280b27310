// * The Refinery (Newsletter Text Pipeline)
// * Goal: Turn raw, possibly HTML, newsletter bodies into clean candidate passages.
// * Normalize -> split into chunks -> clean each chunk -> length filter.

pub mod chunker;
pub mod content_cleaner;
pub mod sentences;

// * Re-exports for convenient access
pub use chunker::split_into_chunks;
pub use content_cleaner::{clean_whitespace, normalize_body, strip_html, truncate_footer};
pub use sentences::{dedupe_case_insensitive, split_sentences};

use crate::config::constants::MIN_CHUNK_CHARS;

/// Configuration for the refinery pipeline
#[derive(Debug, Clone)]
pub struct RefineryConfig {
    /// Minimum characters a cleaned chunk needs to become a candidate
    pub min_chunk_chars: usize,
}

impl Default for RefineryConfig {
    fn default() -> Self {
        Self {
            min_chunk_chars: MIN_CHUNK_CHARS,
        }
    }
}

/// Produces candidate chunks from raw newsletter text
#[derive(Debug, Clone, Default)]
pub struct Refinery {
    config: RefineryConfig,
}

impl Refinery {
    /// Creates a new refinery with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new refinery with custom configuration
    pub fn with_config(config: RefineryConfig) -> Self {
        Self { config }
    }

    /// Runs the full text pipeline over one raw body
    ///
    /// # Pipeline Steps:
    /// 1. Normalize (strip markup, collapse whitespace, cut footer)
    /// 2. Split into paragraph / bullet-list chunks
    /// 3. Re-clean each chunk and keep those of at least `min_chunk_chars`
    pub fn candidate_chunks(&self, raw: &str) -> Vec<String> {
        match normalize_body(raw) {
            Some(body) => self.chunks_of(&body),
            None => Vec::new(),
        }
    }

    /// Steps 2-3 over already-normalized text
    pub fn chunks_of(&self, body: &str) -> Vec<String> {
        split_into_chunks(body)
            .iter()
            .map(|chunk| clean_whitespace(chunk))
            .filter(|chunk| chunk.chars().count() >= self.config.min_chunk_chars)
            .collect()
    }

    /// Returns the current configuration
    pub fn config(&self) -> &RefineryConfig {
        &self.config
    }
}
