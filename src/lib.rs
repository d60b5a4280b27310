// * Morning Edition
// * Turns a day's email newsletters into a short list of topic takeaways.

pub mod briefing;
pub mod config;
pub mod digest;
pub mod error;
pub mod ops;
pub mod refinery;

pub use briefing::{load_briefing, newsletters_from_briefing, parse_briefing, short_sender};
pub use digest::{
    select_takeaways, DigestConfig, DigestReport, DigestStats, NewsletterRecord, Takeaway,
    TakeawaySelector,
};
pub use error::BriefingError;
