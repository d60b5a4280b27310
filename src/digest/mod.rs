// * The Digest (Newsletter Takeaway Engine)
// * Goal: Condense a day's newsletters into a few topic takeaways with bullets and sources.
// * Pure computation over borrowed records: no I/O, no shared state.

pub mod model;
pub mod scorer;
pub mod selector;
pub mod topics;

// * Re-exports for convenient access
pub use model::{Chunk, DigestReport, DigestStats, NewsletterRecord, Takeaway};
pub use scorer::{ChunkScorer, ScoreBreakdown};
pub use selector::{select_takeaways, DigestConfig, TakeawaySelector};
pub use topics::{TopicMatch, TopicRule, TopicTable};
