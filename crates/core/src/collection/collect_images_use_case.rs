use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::collection::collection_plan::{CategoryJob, CollectionPlan};
use crate::collection::collection_report::{CategoryReport, CollectionReport};
use crate::dedup::deduplicator::{DedupOutcome, Deduplicator};
use crate::download::domain::image_fetcher::ImageFetcher;
use crate::search::domain::image_search::ImageSearch;
use crate::shared::category::{image_file_name, next_free_index};
use crate::shared::constants::{CATEGORY_DELAY, DOWNLOAD_DELAY, PAGE_DELAY};
use crate::shared::run_logger::RunLogger;

/// Fixed politeness sleeps between network calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionDelays {
    /// After every download attempt.
    pub download: Duration,
    /// After every search request.
    pub page: Duration,
    /// Between two category jobs.
    pub category: Duration,
}

impl CollectionDelays {
    pub fn none() -> Self {
        Self {
            download: Duration::ZERO,
            page: Duration::ZERO,
            category: Duration::ZERO,
        }
    }
}

impl Default for CollectionDelays {
    fn default() -> Self {
        Self {
            download: DOWNLOAD_DELAY,
            page: PAGE_DELAY,
            category: CATEGORY_DELAY,
        }
    }
}

/// Collection pipeline: search → download → dedupe, one category at a time.
///
/// Strictly sequential. Per-image failures are counted and skipped; only
/// failing to prepare a category directory aborts the run.
pub struct CollectImagesUseCase {
    search: Box<dyn ImageSearch>,
    fetcher: Box<dyn ImageFetcher>,
    logger: Box<dyn RunLogger>,
    delays: CollectionDelays,
}

impl CollectImagesUseCase {
    pub fn new(
        search: Box<dyn ImageSearch>,
        fetcher: Box<dyn ImageFetcher>,
        logger: Box<dyn RunLogger>,
        delays: CollectionDelays,
    ) -> Self {
        Self {
            search,
            fetcher,
            logger,
            delays,
        }
    }

    pub fn execute(
        &mut self,
        plan: &CollectionPlan,
        output_root: &Path,
    ) -> io::Result<CollectionReport> {
        fs::create_dir_all(output_root)?;
        let mut report = CollectionReport::default();

        for (i, job) in plan.jobs().iter().enumerate() {
            if i > 0 {
                pause(self.delays.category);
            }
            let category_report = self.collect_category(job, output_root)?;
            report.push(&job.category, category_report);
            self.logger.info(&format!(
                "Progress: {} images, {} API calls so far",
                report.total_downloaded(),
                report.total_api_calls()
            ));
        }

        self.logger.info(&format!(
            "Collection complete, saved to {}\n{}",
            output_root.display(),
            report.summary_string()
        ));
        self.logger.summary();
        Ok(report)
    }

    fn collect_category(
        &mut self,
        job: &CategoryJob,
        output_root: &Path,
    ) -> io::Result<CategoryReport> {
        let dir = output_root.join(&job.category);
        fs::create_dir_all(&dir)?;

        let mut report = CategoryReport {
            start_index: next_free_index(&dir, &job.category)?,
            ..Default::default()
        };
        self.logger.info(&format!(
            "Collecting '{}': {} queries, {} existing images, target {} new",
            job.category,
            job.queries.len(),
            report.start_index,
            job.target
        ));

        let mut dedup = Deduplicator::new();
        let mut seen_urls: HashSet<String> = HashSet::new();

        'queries: for (query_idx, query) in job.queries.iter().enumerate() {
            if report.downloaded >= job.target {
                break;
            }
            log::info!(
                "[{}] query {}/{}: '{query}'",
                job.category,
                query_idx + 1,
                job.queries.len()
            );

            for &page in &job.pages {
                if report.downloaded >= job.target {
                    break 'queries;
                }

                let started = Instant::now();
                let urls = self.search.search(query, page);
                self.logger
                    .timing("search", started.elapsed().as_secs_f64() * 1000.0);
                report.api_calls += 1;

                if urls.is_empty() {
                    log::info!("[{}] page {page}: no results", job.category);
                    report.empty_pages += 1;
                    pause(self.delays.page);
                    if job.stop_on_empty_page {
                        break;
                    }
                    continue;
                }

                let found = urls.len();
                let new_urls: Vec<String> = urls
                    .into_iter()
                    .filter(|url| !seen_urls.contains(url))
                    .collect();
                report.repeated_urls += found - new_urls.len();
                log::info!(
                    "[{}] page {page}: {found} images ({} new)",
                    job.category,
                    new_urls.len()
                );

                for url in new_urls {
                    if report.downloaded >= job.target {
                        break;
                    }
                    if !seen_urls.insert(url.clone()) {
                        report.repeated_urls += 1;
                        continue;
                    }
                    self.download_one(job, &dir, &url, &mut dedup, &mut report);
                    pause(self.delays.download);
                }

                pause(self.delays.page);
            }
        }

        self.logger.info(&format!(
            "Completed '{}': {} new images ({} duplicates, {} failed), next index {}, {} API calls",
            job.category,
            report.downloaded,
            report.duplicates,
            report.failed + report.hash_errors,
            report.next_index(),
            report.api_calls
        ));
        Ok(report)
    }

    fn download_one(
        &mut self,
        job: &CategoryJob,
        dir: &Path,
        url: &str,
        dedup: &mut Deduplicator,
        report: &mut CategoryReport,
    ) {
        let path = dir.join(image_file_name(
            &job.category,
            report.start_index + report.downloaded,
        ));

        let started = Instant::now();
        let fetched = self.fetcher.fetch(url, &path);
        self.logger
            .timing("download", started.elapsed().as_secs_f64() * 1000.0);

        if let Err(e) = fetched {
            log::debug!("Skipping {url}: {e}");
            report.failed += 1;
            return;
        }

        match dedup.check(&path) {
            Ok(DedupOutcome::New) => {
                report.downloaded += 1;
                self.logger
                    .progress(&job.category, report.downloaded, job.target);
            }
            Ok(DedupOutcome::Duplicate) => {
                log::debug!("Duplicate content from {url} removed");
                report.duplicates += 1;
            }
            Err(e) => {
                log::warn!("Could not hash {}: {e}", path.display());
                report.hash_errors += 1;
            }
        }
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
