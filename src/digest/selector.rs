// * Takeaway Selector
// * Groups scored chunks by topic, picks topic leaders, backfills to the
// * diversity floor, then builds bullets from up to two distinct sources.

use super::model::{Chunk, DigestReport, DigestStats, NewsletterRecord, Takeaway};
use super::scorer::ChunkScorer;
use super::topics::TopicTable;
use crate::config::constants::{
    DEFAULT_MAX_TAKEAWAYS, DIVERSITY_FLOOR, MAX_BULLETS, SENTENCES_PER_CHUNK,
    SOURCES_PER_TAKEAWAY,
};
use crate::refinery::{dedupe_case_insensitive, split_sentences, Refinery, RefineryConfig};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Configuration for takeaway selection
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Upper bound on returned takeaways
    pub max_takeaways: usize,
    /// Pick-list size to backfill to when fewer topics exist
    pub diversity_floor: usize,
    /// Distinct newsletters drawn on per takeaway
    pub sources_per_takeaway: usize,
    /// Leading sentences taken from each chosen chunk
    pub sentences_per_chunk: usize,
    /// Bullet cap per takeaway
    pub max_bullets: usize,
    /// Chunk extraction settings
    pub refinery: RefineryConfig,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            max_takeaways: DEFAULT_MAX_TAKEAWAYS,
            diversity_floor: DIVERSITY_FLOOR,
            sources_per_takeaway: SOURCES_PER_TAKEAWAY,
            sentences_per_chunk: SENTENCES_PER_CHUNK,
            max_bullets: MAX_BULLETS,
            refinery: RefineryConfig::default(),
        }
    }
}

impl DigestConfig {
    /// Default configuration with a custom takeaway count
    pub fn with_max_takeaways(max_takeaways: usize) -> Self {
        Self {
            max_takeaways,
            ..Default::default()
        }
    }
}

// * Candidates of one topic, indices sorted by descending score
struct TopicGroup {
    members: Vec<usize>,
}

/// Builds newsletter takeaways
///
/// # Example
/// ```ignore
/// use morning_edition::digest::TakeawaySelector;
///
/// let selector = TakeawaySelector::new();
/// for takeaway in selector.select(&newsletters) {
///     println!("{}: {:?}", takeaway.title, takeaway.bullets);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TakeawaySelector {
    config: DigestConfig,
    topics: TopicTable,
    refinery: Refinery,
}

impl TakeawaySelector {
    /// Creates a selector with default configuration and the standard topics
    pub fn new() -> Self {
        Self::with_config(DigestConfig::default())
    }

    /// Creates a selector with custom configuration and the standard topics
    pub fn with_config(config: DigestConfig) -> Self {
        Self::with_topics(config, TopicTable::standard())
    }

    /// Creates a selector with custom configuration and rule table
    pub fn with_topics(config: DigestConfig, topics: TopicTable) -> Self {
        Self {
            refinery: Refinery::with_config(config.refinery.clone()),
            config,
            topics,
        }
    }

    /// Selects takeaways from the newsletters
    pub fn select<'a>(&self, newsletters: &'a [NewsletterRecord]) -> Vec<Takeaway<'a>> {
        self.digest(newsletters).takeaways
    }

    /// Selects takeaways and reports statistics about the run
    pub fn digest<'a>(&self, newsletters: &'a [NewsletterRecord]) -> DigestReport<'a> {
        let mut stats = DigestStats {
            newsletters_total: newsletters.len(),
            ..Default::default()
        };

        let candidates = self.collect_candidates(newsletters, &mut stats);
        stats.candidate_count = candidates.len();
        stats.candidate_word_count = candidates
            .iter()
            .map(|c| c.text.unicode_words().count())
            .sum();

        if candidates.is_empty() {
            return DigestReport {
                takeaways: Vec::new(),
                stats,
            };
        }

        let (groups, group_of) = group_by_topic(&candidates);
        stats.topic_count = groups.len();

        let picked = self.pick(&candidates, &groups);
        let takeaways: Vec<Takeaway<'a>> = picked
            .iter()
            .map(|&p| {
                let group = &groups[group_of[candidates[p].topic_id.as_str()]];
                self.build_takeaway(&candidates, p, group)
            })
            .collect();

        stats.takeaway_count = takeaways.len();
        tracing::debug!(
            candidates = stats.candidate_count,
            topics = stats.topic_count,
            takeaways = stats.takeaway_count,
            "Digest built"
        );

        DigestReport { takeaways, stats }
    }

    /// Normalizes, chunks, classifies and scores every newsletter
    fn collect_candidates<'a>(
        &self,
        newsletters: &'a [NewsletterRecord],
        stats: &mut DigestStats,
    ) -> Vec<Chunk<'a>> {
        let mut candidates = Vec::new();

        for newsletter in newsletters {
            let Some(body) = newsletter.body_text() else {
                stats.newsletters_skipped += 1;
                tracing::trace!(subject = %newsletter.subject, "Newsletter has no usable text");
                continue;
            };

            for text in self.refinery.chunks_of(&body) {
                let topic = self.topics.classify(&text);
                let breakdown = ChunkScorer::breakdown_with_topic(&text, topic.score);
                candidates.push(Chunk {
                    newsletter,
                    score: breakdown.final_score,
                    topic_id: topic.topic_id().to_string(),
                    topic_label: topic.topic_label().to_string(),
                    text,
                });
            }
        }

        candidates
    }

    /// Topic leaders in score order, then diversity backfill
    fn pick(&self, candidates: &[Chunk<'_>], groups: &[TopicGroup]) -> Vec<usize> {
        let mut leaders: Vec<usize> = groups.iter().map(|g| g.members[0]).collect();
        sort_by_score_desc(&mut leaders, candidates);

        let mut picked: Vec<usize> = leaders
            .into_iter()
            .take(self.config.max_takeaways)
            .collect();

        if picked.len() < self.config.diversity_floor {
            let target = self.config.diversity_floor.min(self.config.max_takeaways);
            let mut remaining: Vec<usize> = (0..candidates.len()).collect();
            sort_by_score_desc(&mut remaining, candidates);

            for idx in remaining {
                if picked.len() >= target {
                    break;
                }
                if !picked.contains(&idx) {
                    tracing::trace!(score = candidates[idx].score, "Backfilling takeaway");
                    picked.push(idx);
                }
            }
        }

        picked
    }

    /// Distinct-source chunks, bullets and attribution for one pick
    fn build_takeaway<'a>(
        &self,
        candidates: &[Chunk<'a>],
        picked: usize,
        group: &TopicGroup,
    ) -> Takeaway<'a> {
        let source_limit = self.config.sources_per_takeaway.max(1);
        let mut chosen: Vec<&Chunk<'a>> = Vec::new();
        let mut seen_sources = HashSet::new();

        for &idx in &group.members {
            if chosen.len() >= source_limit {
                break;
            }
            let candidate = &candidates[idx];
            if seen_sources.insert(candidate.newsletter.source_key()) {
                chosen.push(candidate);
            }
        }

        let sentences = chosen.iter().flat_map(|c| {
            split_sentences(&c.text)
                .into_iter()
                .take(self.config.sentences_per_chunk)
        });
        let mut bullets = dedupe_case_insensitive(sentences);
        bullets.truncate(self.config.max_bullets);

        let winner = &candidates[picked];
        if bullets.is_empty() {
            bullets.push(winner.text.clone());
        }

        Takeaway {
            title: winner.topic_label.clone(),
            bullets,
            sources: chosen.iter().map(|c| c.newsletter).collect(),
        }
    }

    /// Returns the current configuration
    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// Returns the rule table in use
    pub fn topics(&self) -> &TopicTable {
        &self.topics
    }
}

impl Default for TakeawaySelector {
    fn default() -> Self {
        Self::new()
    }
}

// * Stable: equal scores keep encounter order
fn sort_by_score_desc(indices: &mut [usize], candidates: &[Chunk<'_>]) {
    indices.sort_by(|&a, &b| candidates[b].score.cmp(&candidates[a].score));
}

// * Groups in first-seen topic order, each sorted by descending score
fn group_by_topic<'c>(candidates: &'c [Chunk<'_>]) -> (Vec<TopicGroup>, HashMap<&'c str, usize>) {
    let mut groups: Vec<TopicGroup> = Vec::new();
    let mut group_of: HashMap<&'c str, usize> = HashMap::new();

    for (idx, candidate) in candidates.iter().enumerate() {
        let slot = *group_of
            .entry(candidate.topic_id.as_str())
            .or_insert_with(|| {
                groups.push(TopicGroup {
                    members: Vec::new(),
                });
                groups.len() - 1
            });
        groups[slot].members.push(idx);
    }

    for group in &mut groups {
        sort_by_score_desc(&mut group.members, candidates);
    }

    (groups, group_of)
}

/// Convenience function: standard topics, default settings, custom count
pub fn select_takeaways(newsletters: &[NewsletterRecord], max_takeaways: usize) -> Vec<Takeaway<'_>> {
    TakeawaySelector::with_config(DigestConfig::with_max_takeaways(max_takeaways)).select(newsletters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::topics::TopicRule;

    // * ~150 chars of markets prose, parameterized to keep chunks distinct
    fn markets_text(tag: &str) -> String {
        format!(
            "The Fed held rates steady while inflation cooled, and Treasury yields eased as stocks \
             climbed on strong earnings across the market for {} traders this week.",
            tag
        )
    }

    fn ai_text(tag: &str) -> String {
        format!(
            "OpenAI released a new GPT model with agent capabilities and an LLM toolkit, while \
             Anthropic shipped Claude updates aimed at {} developers building RAG apps.",
            tag
        )
    }

    fn record(subject: &str, body: String) -> NewsletterRecord {
        NewsletterRecord::new(subject).with_body(body)
    }

    #[test]
    fn test_empty_input() {
        let selector = TakeawaySelector::new();
        assert!(selector.select(&[]).is_empty());
    }

    #[test]
    fn test_no_qualifying_chunks() {
        let newsletters = vec![
            NewsletterRecord::new("no text"),
            record("short", "Too short to matter.".to_string()),
        ];
        let report = TakeawaySelector::new().digest(&newsletters);

        assert!(report.takeaways.is_empty());
        assert_eq!(report.stats.newsletters_total, 2);
        assert_eq!(report.stats.newsletters_skipped, 1);
        assert_eq!(report.stats.candidate_count, 0);
    }

    #[test]
    fn test_leaders_ordered_by_score() {
        let newsletters = vec![
            record("Macro", markets_text("bond")),
            record("AI", ai_text("enterprise")),
        ];
        let takeaways = TakeawaySelector::new().select(&newsletters);

        assert_eq!(takeaways.len(), 2);
        // * AI chunk scores higher (more weighted hits) and leads
        assert_eq!(takeaways[0].title, "AI / models");
        assert_eq!(takeaways[1].title, "Markets / macro");
    }

    #[test]
    fn test_single_topic_backfills_duplicate_takeaway() {
        let newsletters = vec![
            record("Macro A", markets_text("bond")),
            record("Macro B", markets_text("equity")),
        ];
        let takeaways = TakeawaySelector::new().select(&newsletters);

        // * Backfill reuses the topic group, so both takeaways share a title
        assert_eq!(takeaways.len(), 2);
        assert_eq!(takeaways[0].title, takeaways[1].title);
        assert_eq!(takeaways[0].sources.len(), 2);
        assert_eq!(takeaways[0], takeaways[1]);
    }

    #[test]
    fn test_max_takeaways_one_skips_backfill() {
        let newsletters = vec![
            record("Macro A", markets_text("bond")),
            record("Macro B", markets_text("equity")),
        ];
        let takeaways = select_takeaways(&newsletters, 1);
        assert_eq!(takeaways.len(), 1);
    }

    #[test]
    fn test_max_takeaways_zero() {
        let newsletters = vec![record("AI", ai_text("any"))];
        assert!(select_takeaways(&newsletters, 0).is_empty());
    }

    #[test]
    fn test_sources_distinct_by_key() {
        // * Same url twice: only one source despite two chunks
        let body = format!("{}\n\n{}", markets_text("first"), markets_text("second"));
        let newsletters = vec![
            record("Macro", body).with_url("https://mail.example/1"),
            record("Other", ai_text("x")),
        ];
        let takeaways = TakeawaySelector::new().select(&newsletters);
        let markets = takeaways
            .iter()
            .find(|t| t.title == "Markets / macro")
            .unwrap();

        assert_eq!(markets.sources.len(), 1);
        assert_eq!(markets.sources[0].subject, "Macro");
    }

    #[test]
    fn test_bullets_capped_and_non_empty() {
        let long = "Stocks rallied. Rates fell. Inflation eased. GDP grew. Earnings beat. \
                    Treasury yields dropped. The index rose. Markets cheered all day long today."
            .to_string();
        let newsletters = vec![
            record("A", long.clone()),
            record("B", long.replace("today", "again")),
            record("C", long.replace("today", "still")),
        ];
        let takeaways = TakeawaySelector::new().select(&newsletters);

        for takeaway in &takeaways {
            assert!(!takeaway.bullets.is_empty());
            assert!(takeaway.bullets.len() <= MAX_BULLETS);
            assert!(takeaway.sources.len() <= SOURCES_PER_TAKEAWAY);
        }
        // * Two chosen chunks share their first two sentences; dedup leaves two
        assert_eq!(takeaways[0].bullets, vec!["Stocks rallied.", "Rates fell."]);
    }

    #[test]
    fn test_unsplittable_chunk_becomes_single_bullet() {
        let text = markets_text("plain").replace('.', "");
        let newsletters = vec![record("Macro", text.clone())];
        let takeaways = TakeawaySelector::new().select(&newsletters);

        assert_eq!(takeaways[0].bullets, vec![text]);
    }

    #[test]
    fn test_no_sentences_falls_back_to_chunk_text() {
        let config = DigestConfig {
            sentences_per_chunk: 0,
            ..Default::default()
        };
        let newsletters = vec![record("AI", ai_text("fallback"))];
        let takeaways = TakeawaySelector::with_config(config).select(&newsletters);

        assert_eq!(takeaways[0].bullets, vec![ai_text("fallback")]);
        assert_eq!(takeaways[0].sources.len(), 1);
    }

    #[test]
    fn test_stats_populated() {
        let newsletters = vec![
            record("Macro", markets_text("bond")),
            record("AI", ai_text("enterprise")),
            NewsletterRecord::new("empty"),
        ];
        let report = TakeawaySelector::new().digest(&newsletters);

        assert_eq!(report.stats.newsletters_total, 3);
        assert_eq!(report.stats.newsletters_skipped, 1);
        assert_eq!(report.stats.candidate_count, 2);
        assert_eq!(report.stats.topic_count, 2);
        assert_eq!(report.stats.takeaway_count, 2);
        assert!(report.stats.candidate_word_count > 40);
    }

    #[test]
    fn test_custom_topic_table() {
        let rule = TopicRule::new("weather", "Weather", 5, &[r"\bstorm\b"]).unwrap();
        let table = TopicTable::new(vec![rule]);
        let selector = TakeawaySelector::with_topics(DigestConfig::default(), table);
        let newsletters = vec![record("Macro", markets_text("bond"))];
        let takeaways = selector.select(&newsletters);

        // * Only rule scores zero but still labels the chunk
        assert_eq!(takeaways[0].title, "Weather");
    }

    // * security: security, breach, privacy = 6; 162 chars, no specificity
    const SECURITY_TEXT: &str = "A security researcher disclosed a breach that exposed customer \
        privacy settings, and the vendor said the affected accounts were notified within days of discovery.";

    // * bigtech: apple, google, microsoft = 6; 162 chars, no specificity
    const BIGTECH_TEXT: &str = "Apple and Google both previewed new phones this week, while \
        Microsoft said the updated laptops will reach shelves in most regions well before the holidays arrive.";

    #[test]
    fn test_tied_leaders_keep_first_seen_topic_order() {
        let table = TopicTable::standard();
        let scorer = ChunkScorer::new(&table);
        assert_eq!(scorer.score(SECURITY_TEXT), scorer.score(BIGTECH_TEXT));

        let newsletters = vec![
            record("Shield", SECURITY_TEXT.to_string()),
            record("Valley", BIGTECH_TEXT.to_string()),
        ];
        let titles: Vec<String> = TakeawaySelector::new()
            .select(&newsletters)
            .into_iter()
            .map(|t| t.title)
            .collect();
        // * Encounter order wins over table order on equal scores
        assert_eq!(titles, vec!["Security / privacy", "Big tech"]);

        let reversed = vec![
            record("Valley", BIGTECH_TEXT.to_string()),
            record("Shield", SECURITY_TEXT.to_string()),
        ];
        let titles: Vec<String> = TakeawaySelector::new()
            .select(&reversed)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Big tech", "Security / privacy"]);
    }

    #[test]
    fn test_tied_group_members_keep_first_seen_source() {
        let table = TopicTable::standard();
        let scorer = ChunkScorer::new(&table);
        assert_eq!(
            scorer.score(&markets_text("bond")),
            scorer.score(&markets_text("swap"))
        );

        let newsletters = vec![
            record("Alpha", markets_text("bond")),
            record("Beta", markets_text("swap")),
        ];
        let takeaways = TakeawaySelector::new().select(&newsletters);
        let subjects: Vec<&str> = takeaways[0].sources.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Alpha", "Beta"]);

        let reversed = vec![
            record("Beta", markets_text("swap")),
            record("Alpha", markets_text("bond")),
        ];
        let takeaways = TakeawaySelector::new().select(&reversed);
        let subjects: Vec<&str> = takeaways[0].sources.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Beta", "Alpha"]);
    }
}
