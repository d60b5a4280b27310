// * Digest Configuration Constants
// * Central location for all thresholds used by the takeaway engine

// * Minimum characters (after cleanup) for a chunk to become a candidate
pub const MIN_CHUNK_CHARS: usize = 120;

// * Default number of takeaways per digest
pub const DEFAULT_MAX_TAKEAWAYS: usize = 3;

// * Pick-list size the selector backfills to when topics are scarce
pub const DIVERSITY_FLOOR: usize = 2;

// * Distinct newsletters quoted per takeaway
pub const SOURCES_PER_TAKEAWAY: usize = 2;

// * Leading sentences taken from each chosen chunk
pub const SENTENCES_PER_CHUNK: usize = 2;

// * Bullet cap per takeaway
pub const MAX_BULLETS: usize = 5;

// * Chunk length shaping bands (characters)
pub const SHORT_CHUNK_CHARS: usize = 140;
pub const SWEET_SPOT_MIN_CHARS: usize = 220;
pub const SWEET_SPOT_MAX_CHARS: usize = 900;
pub const LONG_CHUNK_CHARS: usize = 1400;
