pub mod content_hasher;
pub mod deduplicator;
