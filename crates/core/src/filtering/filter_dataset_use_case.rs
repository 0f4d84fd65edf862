use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::detection::domain::person_counter::{classify, PersonCount};
use crate::detection::domain::person_detector::PersonDetector;
use crate::filtering::filtering_stats::FilteringStats;
use crate::shared::category::{image_file_name, list_categories, list_images};
use crate::shared::run_logger::RunLogger;

/// Copies images showing exactly one person into a parallel dataset tree.
///
/// The input tree is never modified. Detector failures on individual
/// images are counted as errors; only an unreadable input root or an
/// unwritable output aborts the run.
pub struct FilterDatasetUseCase {
    detector: Box<dyn PersonDetector>,
    logger: Box<dyn RunLogger>,
    confidence: f32,
}

impl FilterDatasetUseCase {
    pub fn new(
        detector: Box<dyn PersonDetector>,
        logger: Box<dyn RunLogger>,
        confidence: f32,
    ) -> Self {
        Self {
            detector,
            logger,
            confidence,
        }
    }

    pub fn execute(
        &mut self,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<FilteringStats, Box<dyn std::error::Error>> {
        let categories = list_categories(input_root).map_err(|e| {
            format!("cannot read input directory {}: {e}", input_root.display())
        })?;
        fs::create_dir_all(output_root)?;
        self.logger.info(&format!(
            "Filtering {} categories from {}",
            categories.len(),
            input_root.display()
        ));

        let mut stats = FilteringStats::default();
        for category in &categories {
            self.filter_category(category, input_root, output_root, &mut stats)?;
        }

        let stats_path = stats.write_json(output_root)?;
        self.logger.info(&format!(
            "Filtering complete, stats written to {}\n{}",
            stats_path.display(),
            stats.summary_string()
        ));
        self.logger.summary();
        Ok(stats)
    }

    fn filter_category(
        &mut self,
        category: &str,
        input_root: &Path,
        output_root: &Path,
        stats: &mut FilteringStats,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let images = list_images(&input_root.join(category))?;
        let out_dir = output_root.join(category);
        fs::create_dir_all(&out_dir)?;
        stats.ensure_category(category);
        log::info!("[{category}] {} images", images.len());

        let mut kept = 0usize;
        for (i, image) in images.iter().enumerate() {
            let started = Instant::now();
            let outcome = match self.detector.detect(image) {
                Ok(detections) => Some(classify(&detections, self.confidence)),
                Err(e) => {
                    log::warn!("Detection failed for {}: {e}", image.display());
                    None
                }
            };
            self.logger
                .timing("detect", started.elapsed().as_secs_f64() * 1000.0);

            if outcome == Some(PersonCount::One) {
                let dest = out_dir.join(image_file_name(category, kept));
                fs::copy(image, &dest)?;
                kept += 1;
            }
            stats.record(category, outcome);
            self.logger.progress(category, i + 1, images.len());
        }

        if let Some(cat) = stats.by_type.get(category) {
            self.logger.info(&format!(
                "[{category}] kept {}/{} ({:.1}%): {} no people, {} multiple, {} errors",
                cat.one_person,
                cat.total,
                cat.retention_rate(),
                cat.zero_people,
                cat.multiple_people,
                cat.errors
            ));
        }
        Ok(())
    }
}
