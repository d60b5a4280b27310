// * Chunk Desirability Scorer
// * Topic relevance plus specificity, boilerplate and length shaping.

use super::topics::TopicTable;
use crate::config::constants::{
    LONG_CHUNK_CHARS, SHORT_CHUNK_CHARS, SWEET_SPOT_MAX_CHARS, SWEET_SPOT_MIN_CHARS,
};
use regex::Regex;
use std::sync::LazyLock;

// * Score adjustments
const SCORE_NUMBER: i32 = 1; // * +1 for a run of 2+ digits
const SCORE_MONEY_OR_PERCENT: i32 = 1; // * +1 for $ or %
const SCORE_FISCAL_PERIOD: i32 = 1; // * +1 for Q1-Q4 / FYxx
const PENALTY_UNSUBSCRIBE: i32 = -4;
const PENALTY_SPONSORED: i32 = -2;
const PENALTY_ADVERTISEMENT: i32 = -2;
const SCORE_SWEET_SPOT: i32 = 2;
const PENALTY_TOO_SHORT: i32 = -2;
const PENALTY_TOO_LONG: i32 = -2;

static PATTERN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2,}").expect("Invalid number regex"));

static PATTERN_MONEY_OR_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$%]").expect("Invalid money regex"));

static PATTERN_FISCAL_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?-u:\b)(q[1-4]|fy[0-9]{2,4})(?-u:\b)").expect("Invalid fiscal period regex")
});

/// Breakdown of score components for debugging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub topic_score: i32,
    pub specificity_bonus: i32,
    pub boilerplate_penalty: i32,
    pub length_adjustment: i32,
    pub final_score: i32,
}

/// Scores candidate chunks against a topic table
#[derive(Debug, Clone, Copy)]
pub struct ChunkScorer<'t> {
    topics: &'t TopicTable,
}

impl<'t> ChunkScorer<'t> {
    pub fn new(topics: &'t TopicTable) -> Self {
        Self { topics }
    }

    /// Total desirability of a chunk; may be negative
    pub fn score(&self, text: &str) -> i32 {
        self.breakdown(text).final_score
    }

    /// Scores a chunk, classifying it first
    pub fn breakdown(&self, text: &str) -> ScoreBreakdown {
        let topic_score = self.topics.classify(text).score;
        Self::breakdown_with_topic(text, topic_score)
    }

    /// Scores a chunk whose topic score is already known
    pub fn breakdown_with_topic(text: &str, topic_score: i32) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown {
            topic_score,
            specificity_bonus: Self::score_specificity(text),
            boilerplate_penalty: Self::score_boilerplate(text),
            length_adjustment: Self::score_length(text),
            ..Default::default()
        };

        breakdown.final_score = breakdown.topic_score
            + breakdown.specificity_bonus
            + breakdown.boilerplate_penalty
            + breakdown.length_adjustment;
        breakdown
    }

    /// Numbers, money, and fiscal periods signal concrete content
    fn score_specificity(text: &str) -> i32 {
        let mut score = 0;

        if PATTERN_NUMBER.is_match(text) {
            score += SCORE_NUMBER;
        }
        if PATTERN_MONEY_OR_PERCENT.is_match(text) {
            score += SCORE_MONEY_OR_PERCENT;
        }
        if PATTERN_FISCAL_PERIOD.is_match(text) {
            score += SCORE_FISCAL_PERIOD;
        }

        score
    }

    fn score_boilerplate(text: &str) -> i32 {
        let lower = text.to_lowercase();
        let mut score = 0;

        if lower.contains("unsubscribe") {
            score += PENALTY_UNSUBSCRIBE;
        }
        if lower.contains("sponsored") {
            score += PENALTY_SPONSORED;
        }
        if lower.contains("advertisement") {
            score += PENALTY_ADVERTISEMENT;
        }

        score
    }

    /// Prefer medium chunks: dense but readable
    fn score_length(text: &str) -> i32 {
        let len = text.chars().count();
        let mut score = 0;

        if (SWEET_SPOT_MIN_CHARS..=SWEET_SPOT_MAX_CHARS).contains(&len) {
            score += SCORE_SWEET_SPOT;
        }
        if len < SHORT_CHUNK_CHARS {
            score += PENALTY_TOO_SHORT;
        }
        if len > LONG_CHUNK_CHARS {
            score += PENALTY_TOO_LONG;
        }

        score
    }
}
