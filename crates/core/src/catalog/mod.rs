mod builtin;
pub mod query_catalog;
