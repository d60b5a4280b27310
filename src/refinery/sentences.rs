// * Heuristic sentence splitting and bullet deduplication

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PATTERN_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

// * Terminal punctuation plus the gap that follows it
static PATTERN_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?](\s+)").expect("Invalid terminator regex"));

/// Characters that may open a new sentence after a terminator
fn opens_sentence(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '“' | '"' | '(')
}

/// Splits text into sentences
///
/// A boundary is a `.`, `!` or `?` followed by whitespace whose next character
/// is an ASCII capital, a digit, an opening quote or `(`. Abbreviations such
/// as "U.S. Treasury" are split as well; bullet counts downstream rely on this
/// granularity.
pub fn split_sentences(input: &str) -> Vec<String> {
    let cleaned = PATTERN_WHITESPACE.replace_all(input, " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;

    for caps in PATTERN_TERMINATOR.captures_iter(cleaned) {
        let Some(gap) = caps.get(1) else { continue };
        let next = cleaned[gap.end()..].chars().next();
        if next.is_some_and(opens_sentence) {
            sentences.push(&cleaned[start..gap.start()]);
            start = gap.end();
        }
    }
    sentences.push(&cleaned[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Removes case-insensitive duplicates, keeping the first spelling seen
pub fn dedupe_case_insensitive<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
