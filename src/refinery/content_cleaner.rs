// * Newsletter Text Normalizer
// * Strips markup, collapses whitespace, and cuts footer boilerplate from raw
// * newsletter bodies before they are chunked.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// * Markup detection: anything shaped like a tag
static PATTERN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));

static PATTERN_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").expect("Invalid script regex"));

static PATTERN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").expect("Invalid style regex"));

static PATTERN_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*br\s*/?>").expect("Invalid br regex"));

// * Closing tags of block-level elements become line breaks
static PATTERN_BLOCK_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/(p|div|li|tr|h1|h2|h3)\s*>").expect("Invalid block close regex")
});

static PATTERN_TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t ]+\n").expect("Invalid trailing space regex"));

static PATTERN_NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid newline run regex"));

static PATTERN_WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{3,}").expect("Invalid whitespace run regex"));

/// Footer markers; everything from the first hit onwards is dropped
pub const FOOTER_MARKERS: [&str; 8] = [
    "unsubscribe",
    "manage preferences",
    "update your preferences",
    "view in browser",
    "privacy policy",
    "terms of service",
    "sponsored",
    "advertisement",
];

// * Case-insensitive alternation; the leftmost match is the earliest marker.
// * Matching on the input text keeps the cut on a char boundary.
static PATTERN_FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = FOOTER_MARKERS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){}", alternation)).expect("Invalid footer regex")
});

// * Entities decoded by the stripper, in application order
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Returns true if the text contains anything resembling a markup tag
pub fn looks_like_html(text: &str) -> bool {
    PATTERN_TAG.is_match(text)
}

/// Best-effort markup removal
///
/// Script and style blocks are dropped, line breaks and block-level closing
/// tags become newlines, remaining tags become spaces, and the common entities
/// are decoded. Unbalanced markup is tolerated: unmatched fragments are left
/// as text.
pub fn strip_html(input: &str) -> String {
    let text = PATTERN_SCRIPT.replace_all(input, " ");
    let text = PATTERN_STYLE.replace_all(&text, " ");
    let text = PATTERN_LINE_BREAK.replace_all(&text, "\n");
    let text = PATTERN_BLOCK_CLOSE.replace_all(&text, "\n");
    let text = PATTERN_TAG.replace_all(&text, " ");

    let mut decoded = text.into_owned();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }
    decoded
}

/// Whitespace normalization pass
///
/// CRLF becomes LF, trailing blanks before a newline are removed, runs of
/// three or more newlines shrink to a paragraph break, then any remaining run
/// of three or more whitespace characters collapses to one space.
pub fn clean_whitespace(input: &str) -> String {
    let text: Cow<'_, str> = if input.contains("\r\n") {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    };
    let text = PATTERN_TRAILING_SPACE.replace_all(&text, "\n");
    let text = PATTERN_NEWLINE_RUN.replace_all(&text, "\n\n");
    let text = PATTERN_WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

/// Cuts the text at the earliest footer marker, if any
pub fn truncate_footer(text: &str) -> &str {
    match PATTERN_FOOTER.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Full normalization of a raw newsletter body
///
/// Returns `None` when nothing readable survives (empty input, markup only,
/// or a footer marker at the very start).
pub fn normalize_body(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let text = if looks_like_html(raw) {
        clean_whitespace(&strip_html(raw))
    } else {
        clean_whitespace(raw)
    };
    if text.is_empty() {
        return None;
    }

    let trimmed = clean_whitespace(truncate_footer(&text));
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
