//! Hair-type image dataset tooling: collect images per category from an
//! image-search API, deduplicate them by content, and keep only images that
//! show exactly one person.

pub mod catalog;
pub mod collection;
pub mod dedup;
pub mod detection;
pub mod download;
pub mod filtering;
pub mod search;
pub mod shared;
