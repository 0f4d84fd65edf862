use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::builtin::{FINE_MULTI_QUERY, MULTI_QUERY, SINGLE_QUERY};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog is empty")]
    Empty,
    #[error("category '{0}' has no queries")]
    NoQueries(String),
    #[error("category '{0}' contains a blank query")]
    BlankQuery(String),
    #[error("category name must be non-empty and contain no path separators, got '{0}'")]
    BadCategory(String),
}

/// Built-in catalog names accepted by [`QueryCatalog::resolve`].
pub const MULTI_QUERY_NAME: &str = "multi-query";
pub const SINGLE_QUERY_NAME: &str = "single-query";
pub const FINE_MULTI_QUERY_NAME: &str = "multi-query-fine";

/// Immutable mapping from hair-type category to its search queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCatalog {
    entries: BTreeMap<String, Vec<String>>,
}

impl QueryCatalog {
    /// Validates and wraps a category → queries map.
    pub fn from_map(entries: BTreeMap<String, Vec<String>>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (category, queries) in &entries {
            if category.trim().is_empty() || category.contains(['/', '\\']) || category == ".." {
                return Err(CatalogError::BadCategory(category.clone()));
            }
            if queries.is_empty() {
                return Err(CatalogError::NoQueries(category.clone()));
            }
            if queries.iter().any(|q| q.trim().is_empty()) {
                return Err(CatalogError::BlankQuery(category.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Many descriptive query variations per type, with a merged type "1".
    pub fn multi_query() -> Self {
        Self::from_static(MULTI_QUERY)
    }

    /// Exactly one query per fine-grained type, `1a` through `4c`.
    pub fn single_query() -> Self {
        Self::from_static(SINGLE_QUERY)
    }

    /// Several query variations per fine-grained type, `1a` through `4c`.
    pub fn fine_multi_query() -> Self {
        Self::from_static(FINE_MULTI_QUERY)
    }

    /// Loads a JSON object of the form `{"2a": ["query", ...], ...}`.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let entries: BTreeMap<String, Vec<String>> =
            serde_json::from_str(&json).map_err(|e| CatalogError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_map(entries)
    }

    /// Resolves a built-in catalog name or, failing that, a JSON file path.
    pub fn resolve(name_or_path: &str) -> Result<Self, CatalogError> {
        match name_or_path {
            MULTI_QUERY_NAME => Ok(Self::multi_query()),
            SINGLE_QUERY_NAME => Ok(Self::single_query()),
            FINE_MULTI_QUERY_NAME => Ok(Self::fine_multi_query()),
            path => Self::from_json_file(Path::new(path)),
        }
    }

    pub fn queries(&self, category: &str) -> Option<&[String]> {
        self.entries.get(category).map(|v| v.as_slice())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_static(table: &[(&str, &[&str])]) -> Self {
        let entries = table
            .iter()
            .map(|(category, queries)| {
                (
                    category.to_string(),
                    queries.iter().map(|q| q.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_multi_query_has_merged_type_one() {
        let catalog = QueryCatalog::multi_query();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.contains("1"));
        assert!(!catalog.contains("1a"));
        assert_eq!(catalog.queries("2a").unwrap()[0], "2a wavy hair");
        assert_eq!(catalog.queries("2a").unwrap().len(), 25);
    }

    #[test]
    fn test_single_query_one_per_subtype() {
        let catalog = QueryCatalog::single_query();
        assert_eq!(catalog.len(), 12);
        for category in catalog.categories() {
            assert_eq!(catalog.queries(category).unwrap().len(), 1);
        }
        assert_eq!(
            catalog.queries("4c").unwrap(),
            &["4c kinky coily hair".to_string()]
        );
    }

    #[test]
    fn test_fine_multi_query_covers_subtypes() {
        let catalog = QueryCatalog::fine_multi_query();
        assert!(catalog.contains("1a"));
        assert!(!catalog.contains("1"));
        for category in catalog.categories() {
            assert_eq!(catalog.queries(category).unwrap().len(), 5);
        }
        assert_eq!(catalog.queries("2b").unwrap()[2], "medium wavy hair 2b");
    }

    #[test]
    fn test_blank_query_rejected() {
        let mut entries = BTreeMap::new();
        entries.insert("2a".to_string(), vec!["wavy".to_string(), " ".to_string()]);
        assert!(matches!(
            QueryCatalog::from_map(entries),
            Err(CatalogError::BlankQuery(ref c)) if c == "2a"
        ));
    }

    #[test]
    fn test_builtin_catalogs_validate() {
        for catalog in [
            QueryCatalog::multi_query(),
            QueryCatalog::single_query(),
            QueryCatalog::fine_multi_query(),
        ] {
            let entries = catalog.entries.clone();
            assert!(QueryCatalog::from_map(entries).is_ok());
        }
    }

    #[test]
    fn test_unknown_category_is_none() {
        assert!(QueryCatalog::multi_query().queries("5z").is_none());
    }

    #[test]
    fn test_from_json_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, r#"{"2b": ["wavy hair", "s waves"], "3a": ["loose curls"]}"#).unwrap();

        let catalog = QueryCatalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["2b", "3a"]);
        assert_eq!(catalog.queries("2b").unwrap().len(), 2);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = QueryCatalog::from_json_file(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(err, Err(CatalogError::Read { .. })));
    }

    #[test]
    fn test_from_json_file_malformed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, r#"["not", "a", "map"]"#).unwrap();
        let err = QueryCatalog::from_json_file(&path);
        assert!(matches!(err, Err(CatalogError::Parse { .. })));
    }

    #[rstest]
    #[case(r#"{}"#)]
    #[case(r#"{"2a": []}"#)]
    #[case(r#"{"2a": ["  "]}"#)]
    #[case(r#"{"2a": ["wavy", ""]}"#)]
    #[case(r#"{"../etc": ["q"]}"#)]
    #[case(r#"{"": ["q"]}"#)]
    fn test_invalid_catalogs_rejected(#[case] json: &str) {
        let entries: BTreeMap<String, Vec<String>> = serde_json::from_str(json).unwrap();
        assert!(QueryCatalog::from_map(entries).is_err());
    }

    #[rstest]
    #[case(MULTI_QUERY_NAME, 10)]
    #[case(SINGLE_QUERY_NAME, 12)]
    #[case(FINE_MULTI_QUERY_NAME, 12)]
    fn test_resolve_builtin(#[case] name: &str, #[case] expected: usize) {
        assert_eq!(QueryCatalog::resolve(name).unwrap().len(), expected);
    }
}
