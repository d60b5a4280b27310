// * Topic Classifier
// * Keyword-rule matching over a fixed, ordered rule table.

use crate::error::BriefingError;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

// * Standard rule table, highest weight first. Order is the tie-break.
// * Boundaries are ASCII-only, so an accented letter is not a word character.
const STANDARD_RULES: [(&str, &str, i32, &[&str]); 5] = [
    (
        "ai",
        "AI / models",
        4,
        &[
            r"(?-u:\b)openai(?-u:\b)",
            r"(?-u:\b)anthropic(?-u:\b)",
            r"(?-u:\b)gpt-?[0-9]*(?-u:\b)",
            r"(?-u:\b)llm(?-u:\b)",
            r"(?-u:\b)transformer(?-u:\b)",
            r"(?-u:\b)rag(?-u:\b)",
            r"(?-u:\b)agents?(?-u:\b)",
            r"(?-u:\b)model(?-u:\b)",
            r"(?-u:\b)fine-?tune(?-u:\b)",
            r"(?-u:\b)gemini(?-u:\b)",
            r"(?-u:\b)claude(?-u:\b)",
        ],
    ),
    (
        "startups",
        "Startups / product",
        3,
        &[
            r"(?-u:\b)startup(?-u:\b)",
            r"(?-u:\b)founder(?-u:\b)",
            r"(?-u:\b)seed(?-u:\b)",
            r"(?-u:\b)series [a-e](?-u:\b)",
            r"(?-u:\b)vc(?-u:\b)",
            r"(?-u:\b)venture(?-u:\b)",
            r"(?-u:\b)product(?-u:\b)",
            r"(?-u:\b)pmf(?-u:\b)",
            r"(?-u:\b)gtm(?-u:\b)",
            r"(?-u:\b)pricing(?-u:\b)",
        ],
    ),
    (
        "markets",
        "Markets / macro",
        3,
        &[
            r"(?-u:\b)fed(?-u:\b)",
            r"(?-u:\b)rates?(?-u:\b)",
            r"(?-u:\b)inflation(?-u:\b)",
            r"(?-u:\b)treasur(y|ies)(?-u:\b)",
            r"(?-u:\b)earnings(?-u:\b)",
            r"(?-u:\b)stocks?(?-u:\b)",
            r"(?-u:\b)markets?(?-u:\b)",
            r"(?-u:\b)index(?-u:\b)",
            r"(?-u:\b)gdp(?-u:\b)",
        ],
    ),
    (
        "bigtech",
        "Big tech",
        2,
        &[
            r"(?-u:\b)apple(?-u:\b)",
            r"(?-u:\b)google(?-u:\b)",
            r"(?-u:\b)microsoft(?-u:\b)",
            r"(?-u:\b)meta(?-u:\b)",
            r"(?-u:\b)amazon(?-u:\b)",
            r"(?-u:\b)aws(?-u:\b)",
            r"(?-u:\b)nvidia(?-u:\b)",
            r"(?-u:\b)tesla(?-u:\b)",
        ],
    ),
    (
        "security",
        "Security / privacy",
        2,
        &[
            r"(?-u:\b)security(?-u:\b)",
            r"(?-u:\b)vulnerability(?-u:\b)",
            r"(?-u:\b)cve-[0-9]+",
            r"(?-u:\b)breach(?-u:\b)",
            r"(?-u:\b)privacy(?-u:\b)",
            r"(?-u:\b)encrypt(?-u:\w)*(?-u:\b)",
        ],
    ),
];

static STANDARD_TABLE: LazyLock<TopicTable> = LazyLock::new(|| {
    let rules = STANDARD_RULES
        .iter()
        .map(|(id, label, weight, patterns)| TopicRule::new(*id, *label, *weight, patterns))
        .collect::<Result<Vec<_>, _>>()
        .expect("Invalid standard topic pattern");
    TopicTable::new(rules)
});

/// A topic: id, display label, weight and case-insensitive patterns
#[derive(Debug, Clone)]
pub struct TopicRule {
    id: String,
    label: String,
    weight: i32,
    patterns: Vec<Regex>,
}

impl TopicRule {
    /// Compiles a rule; every pattern matches case-insensitively
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        weight: i32,
        patterns: &[&str],
    ) -> Result<Self, BriefingError> {
        let id = id.into();
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| BriefingError::InvalidPattern {
                        topic: id.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            label: label.into(),
            weight,
            patterns,
        })
    }

    /// Catch-all rule used when a table has no rules at all
    pub fn fallback() -> Self {
        Self {
            id: "other".to_string(),
            label: "Other".to_string(),
            weight: 0,
            patterns: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Weight times the number of distinct patterns found in the text
    pub fn score(&self, text: &str) -> i32 {
        let hits = self.patterns.iter().filter(|p| p.is_match(text)).count() as i32;
        self.weight * hits
    }
}

/// Outcome of classifying one passage
#[derive(Debug, Clone, Copy)]
pub struct TopicMatch<'t> {
    pub rule: &'t TopicRule,
    pub score: i32,
}

impl TopicMatch<'_> {
    pub fn topic_id(&self) -> &str {
        self.rule.id()
    }

    pub fn topic_label(&self) -> &str {
        self.rule.label()
    }
}

/// Ordered, immutable rule table
#[derive(Debug, Clone)]
pub struct TopicTable {
    rules: Vec<TopicRule>,
    fallback: TopicRule,
}

impl TopicTable {
    /// Builds a table from rules in priority order
    pub fn new(rules: Vec<TopicRule>) -> Self {
        Self {
            rules,
            fallback: TopicRule::fallback(),
        }
    }

    /// The built-in five-topic table
    pub fn standard() -> Self {
        STANDARD_TABLE.clone()
    }

    /// Picks the best rule for a passage
    ///
    /// The first rule with the strictly highest score wins, so equal scores
    /// resolve in table order. A table whose rules all score zero still
    /// returns its first rule; an empty table returns the fallback rule.
    pub fn classify(&self, text: &str) -> TopicMatch<'_> {
        let mut best: Option<TopicMatch<'_>> = None;

        for rule in &self.rules {
            let score = rule.score(text);
            if best.map_or(true, |b| score > b.score) {
                best = Some(TopicMatch { rule, score });
            }
        }

        best.unwrap_or(TopicMatch {
            rule: &self.fallback,
            score: 0,
        })
    }

    pub fn rules(&self) -> &[TopicRule] {
        &self.rules
    }

    /// Looks up a rule by id
    pub fn get(&self, id: &str) -> Option<&TopicRule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for TopicTable {
    fn default() -> Self {
        Self::standard()
    }
}
