// * Paragraph Chunker
// * Breaks normalized newsletter text into candidate passages along
// * paragraph and bullet-list boundaries.

use regex::Regex;
use std::sync::LazyLock;

static PATTERN_PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("Invalid paragraph break regex"));

// * A bullet line: -, * or • followed by whitespace
static PATTERN_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s+").expect("Invalid bullet regex"));

/// Minimum bullet lines for a block to be merged into a single list chunk
pub const MIN_BULLET_LINES: usize = 2;

/// Splits text into ordered chunks
///
/// Each blank-line separated block becomes one chunk. A block holding at least
/// two bullet lines is reduced to those bullet lines, markers stripped and
/// joined with single spaces.
pub fn split_into_chunks(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");

    PATTERN_PARAGRAPH_BREAK
        .split(&text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(chunk_block)
        .collect()
}

fn chunk_block(block: &str) -> String {
    let bullet_lines: Vec<&str> = block
        .split('\n')
        .map(str::trim)
        .filter(|line| PATTERN_BULLET.is_match(line))
        .collect();

    if bullet_lines.len() < MIN_BULLET_LINES {
        return block.to_string();
    }

    bullet_lines
        .iter()
        .map(|line| PATTERN_BULLET.replace(line, ""))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let text = "First paragraph.\n\nSecond paragraph.\n\n\n\nThird paragraph.";
        let chunks = split_into_chunks(text);

        assert_eq!(
            chunks,
            vec!["First paragraph.", "Second paragraph.", "Third paragraph."]
        );
    }

    #[test]
    fn test_single_newlines_stay_in_block() {
        let text = "Line one\nline two\n\nNext block";
        let chunks = split_into_chunks(text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "Line one\nline two");
    }

    #[test]
    fn test_bullet_block_merged() {
        let text = "- alpha item\n- beta item\n- gamma item";
        let chunks = split_into_chunks(text);

        assert_eq!(chunks, vec!["alpha item beta item gamma item"]);
    }

    #[test]
    fn test_mixed_bullet_markers() {
        let text = "* first\n•  second\n-\tthird";
        let chunks = split_into_chunks(text);

        assert_eq!(chunks, vec!["first second third"]);
    }

    #[test]
    fn test_single_bullet_kept_verbatim() {
        let text = "Intro line\n- only bullet";
        let chunks = split_into_chunks(text);

        assert_eq!(chunks, vec!["Intro line\n- only bullet"]);
    }

    #[test]
    fn test_non_bullet_lines_dropped_from_list_block() {
        let text = "Here are the links:\n- one\n- two";
        let chunks = split_into_chunks(text);

        assert_eq!(chunks, vec!["one two"]);
    }

    #[test]
    fn test_marker_without_space_is_not_bullet() {
        let text = "-not a bullet\n*also not";
        let chunks = split_into_chunks(text);

        assert_eq!(chunks, vec!["-not a bullet\n*also not"]);
    }

    #[test]
    fn test_crlf_and_empty_blocks() {
        let text = "\r\n\r\nA\r\n\r\n   \r\n\r\nB\r\n";
        let chunks = split_into_chunks(text);

        assert_eq!(chunks, vec!["A", "B"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_into_chunks("").is_empty());
        assert!(split_into_chunks("\n\n\n").is_empty());
    }
}
