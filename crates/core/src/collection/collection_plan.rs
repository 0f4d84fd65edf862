use std::str::FromStr;

use thiserror::Error;

use crate::catalog::query_catalog::QueryCatalog;
use crate::shared::constants::{MULTI_QUERY_PAGES, RESULTS_PER_PAGE};

/// Extra pages tried past a page range when earlier pages came up short.
const PAGE_RANGE_SLACK: u32 = 2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("unknown category '{category}' (valid: {})", .known.join(", "))]
    UnknownCategory {
        category: String,
        known: Vec<String>,
    },
    #[error("no categories selected")]
    NoCategories,
    #[error("target image count must be positive")]
    ZeroTarget,
    #[error("invalid page range '{0}', expected <category>:<start_page>:<num_pages>")]
    BadRange(String),
}

/// Everything needed to collect one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryJob {
    pub category: String,
    pub queries: Vec<String>,
    pub pages: Vec<u32>,
    /// Number of new, unique images wanted.
    pub target: usize,
    /// End the current query at its first empty page instead of trying the next page.
    pub stop_on_empty_page: bool,
}

/// A contiguous block of result pages for one category, e.g. `1a:1:40`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pub category: String,
    pub start_page: u32,
    pub num_pages: u32,
}

impl FromStr for PageRange {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PlanError::BadRange(s.to_string());
        let mut parts = s.split(':');
        let (Some(category), Some(start), Some(count), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };
        let category = category.trim();
        if category.is_empty() {
            return Err(bad());
        }
        let start_page = start.trim().parse().map_err(|_| bad())?;
        let num_pages: u32 = count.trim().parse().map_err(|_| bad())?;
        if num_pages == 0 {
            return Err(bad());
        }
        Ok(Self {
            category: category.to_string(),
            start_page,
            num_pages,
        })
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.category, self.start_page, self.num_pages)
    }
}

/// Ordered list of category jobs for one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPlan {
    jobs: Vec<CategoryJob>,
}

impl CollectionPlan {
    pub fn from_jobs(jobs: Vec<CategoryJob>) -> Self {
        Self { jobs }
    }

    /// Every catalog query for each category, first two result pages each.
    pub fn multi_query(
        catalog: &QueryCatalog,
        categories: &[String],
        images_per_type: usize,
    ) -> Result<Self, PlanError> {
        if categories.is_empty() {
            return Err(PlanError::NoCategories);
        }
        if images_per_type == 0 {
            return Err(PlanError::ZeroTarget);
        }
        let jobs = categories
            .iter()
            .map(|category| -> Result<CategoryJob, PlanError> {
                Ok(CategoryJob {
                    category: category.clone(),
                    queries: lookup(catalog, category)?.to_vec(),
                    pages: MULTI_QUERY_PAGES.to_vec(),
                    target: images_per_type,
                    stop_on_empty_page: false,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { jobs })
    }

    /// Deep pagination of each category's first query over explicit page ranges.
    ///
    /// Targets roughly a full page of images per requested page and allows a
    /// couple of extra pages to make up for failed downloads.
    pub fn page_ranges(catalog: &QueryCatalog, ranges: &[PageRange]) -> Result<Self, PlanError> {
        if ranges.is_empty() {
            return Err(PlanError::NoCategories);
        }
        let jobs = ranges
            .iter()
            .map(|range| -> Result<CategoryJob, PlanError> {
                let query = lookup(catalog, &range.category)?[0].clone();
                let end = range
                    .start_page
                    .checked_add(range.num_pages)
                    .and_then(|end| end.checked_add(PAGE_RANGE_SLACK))
                    .ok_or_else(|| PlanError::BadRange(range.to_string()))?;
                Ok(CategoryJob {
                    category: range.category.clone(),
                    queries: vec![query],
                    pages: (range.start_page..end).collect(),
                    target: (range.num_pages as usize).saturating_mul(RESULTS_PER_PAGE),
                    stop_on_empty_page: true,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { jobs })
    }

    pub fn jobs(&self) -> &[CategoryJob] {
        &self.jobs
    }

    /// Upper bound on search requests if no job reaches its target early.
    pub fn max_api_calls(&self) -> usize {
        self.jobs
            .iter()
            .map(|job| job.queries.len() * job.pages.len())
            .sum()
    }
}

fn lookup<'a>(catalog: &'a QueryCatalog, category: &str) -> Result<&'a [String], PlanError> {
    catalog
        .queries(category)
        .ok_or_else(|| PlanError::UnknownCategory {
            category: category.to_string(),
            known: catalog.categories().map(String::from).collect(),
        })
}
