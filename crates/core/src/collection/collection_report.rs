/// Counters for one category job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    /// Index of the first file written in this run.
    pub start_index: usize,
    pub downloaded: usize,
    pub duplicates: usize,
    pub failed: usize,
    pub hash_errors: usize,
    /// URLs dropped because they were already seen earlier in the job.
    pub repeated_urls: usize,
    pub api_calls: usize,
    pub empty_pages: usize,
}

impl CategoryReport {
    /// Index the next run will start numbering from, barring manual edits.
    ///
    /// Not a file count: numbering skips past gaps left in earlier runs.
    pub fn next_index(&self) -> usize {
        self.start_index + self.downloaded
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionReport {
    /// Per-job reports in plan order. A category may appear more than once.
    pub categories: Vec<(String, CategoryReport)>,
}

impl CollectionReport {
    pub fn push(&mut self, category: &str, report: CategoryReport) {
        self.categories.push((category.to_string(), report));
    }

    pub fn total_downloaded(&self) -> usize {
        self.categories.iter().map(|(_, r)| r.downloaded).sum()
    }

    pub fn total_api_calls(&self) -> usize {
        self.categories.iter().map(|(_, r)| r.api_calls).sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.categories.iter().map(|(_, r)| r.duplicates).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.categories
            .iter()
            .map(|(_, r)| r.failed + r.hash_errors)
            .sum()
    }

    /// Human-readable per-category table plus totals.
    pub fn summary_string(&self) -> String {
        let mut lines = vec![format!(
            "{:<8} {:>10} {:>10} {:>8} {:>10} {:>8}",
            "Type", "Downloaded", "Duplicates", "Failed", "API calls", "Next idx"
        )];
        for (category, r) in &self.categories {
            lines.push(format!(
                "{:<8} {:>10} {:>10} {:>8} {:>10} {:>8}",
                category,
                r.downloaded,
                r.duplicates,
                r.failed + r.hash_errors,
                r.api_calls,
                r.next_index()
            ));
        }
        lines.push(format!(
            "Total: {} images downloaded, {} API calls",
            self.total_downloaded(),
            self.total_api_calls()
        ));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(downloaded: usize, api_calls: usize, failed: usize) -> CategoryReport {
        CategoryReport {
            start_index: 10,
            downloaded,
            duplicates: 1,
            failed,
            hash_errors: 1,
            api_calls,
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_sum_categories() {
        let mut collection = CollectionReport::default();
        collection.push("2a", report(5, 4, 2));
        collection.push("2b", report(7, 6, 0));

        assert_eq!(collection.total_downloaded(), 12);
        assert_eq!(collection.total_api_calls(), 10);
        assert_eq!(collection.total_duplicates(), 2);
        assert_eq!(collection.total_failed(), 4);
    }

    #[test]
    fn test_next_index_follows_last_download() {
        assert_eq!(report(5, 1, 0).next_index(), 15);
    }

    #[test]
    fn test_summary_lists_each_category() {
        let mut collection = CollectionReport::default();
        collection.push("3c", report(5, 4, 0));
        let summary = collection.summary_string();
        assert!(summary.contains("3c"));
        assert!(summary.contains("Total: 5 images downloaded, 4 API calls"));
    }
}
