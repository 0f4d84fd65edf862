use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use hairset_core::catalog::query_catalog::{QueryCatalog, MULTI_QUERY_NAME};
use hairset_core::collection::collect_images_use_case::{CollectImagesUseCase, CollectionDelays};
use hairset_core::collection::collection_plan::{CollectionPlan, PageRange};
use hairset_core::detection::domain::person_detector::PersonDetector;
use hairset_core::detection::infrastructure::model_resolver::{self, ModelSource};
use hairset_core::detection::infrastructure::onnx_yolo_detector::{
    OnnxYoloDetector, DEFAULT_SCORE_THRESHOLD,
};
use hairset_core::download::infrastructure::http_image_fetcher::HttpImageFetcher;
use hairset_core::filtering::filter_dataset_use_case::FilterDatasetUseCase;
use hairset_core::search::infrastructure::serpapi_client::SerpApiClient;
use hairset_core::shared::constants::{
    API_KEY_PLACEHOLDER, CATEGORY_DELAY, DEFAULT_IMAGES_PER_TYPE, DOWNLOAD_DELAY,
    FILTERED_DATASET_DIR, PAGE_DELAY, PERSON_CONFIDENCE, RAW_DATASET_DIR, YOLO_MODEL_NAME,
};
use hairset_core::shared::run_logger::LogRunLogger;

/// Hair-type image dataset collection and person filtering.
#[derive(Parser)]
#[command(name = "hairset", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collect images for each category using every catalog query.
    Collect {
        #[command(flatten)]
        search: SearchArgs,

        /// Categories to collect (comma-separated).
        #[arg(long, value_delimiter = ',', default_value = "1,2a,2b")]
        categories: Vec<String>,

        /// New unique images wanted per category.
        #[arg(long, default_value_t = DEFAULT_IMAGES_PER_TYPE)]
        images_per_type: usize,
    },
    /// Page deeply through each category's first query.
    CollectPages {
        #[command(flatten)]
        search: SearchArgs,

        /// Page range as <category>:<start_page>:<num_pages>, e.g. 1a:1:40. Repeatable.
        #[arg(long = "range", required = true)]
        ranges: Vec<PageRange>,
    },
    /// Keep only images that show exactly one person.
    Filter {
        /// Raw dataset root (one subdirectory per category).
        #[arg(long, default_value = RAW_DATASET_DIR)]
        input: PathBuf,

        /// Filtered dataset root.
        #[arg(long, default_value = FILTERED_DATASET_DIR)]
        output: PathBuf,

        /// YOLOv8 ONNX model file. Defaults to the cached or bundled model.
        #[arg(long)]
        model: Option<PathBuf>,

        /// Download the model from this URL when it is not found locally.
        #[arg(long)]
        model_url: Option<String>,

        /// Person confidence threshold (0.0-1.0, exclusive).
        #[arg(long, default_value_t = PERSON_CONFIDENCE)]
        confidence: f32,
    },
    /// List catalog categories and their query counts.
    Categories {
        /// Built-in catalog (multi-query, multi-query-fine, single-query) or a JSON file.
        #[arg(long, default_value = MULTI_QUERY_NAME)]
        catalog: String,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// SerpApi key.
    #[arg(long, env = "SERPAPI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Dataset root; images go to <output>/<category>/.
    #[arg(long, default_value = RAW_DATASET_DIR)]
    output: PathBuf,

    /// Built-in catalog (multi-query, multi-query-fine, single-query) or a JSON file.
    #[arg(long, default_value = MULTI_QUERY_NAME)]
    catalog: String,

    /// Pause after each download attempt, in milliseconds.
    #[arg(long, default_value_t = DOWNLOAD_DELAY.as_millis() as u64)]
    download_delay_ms: u64,

    /// Pause after each search request, in milliseconds.
    #[arg(long, default_value_t = PAGE_DELAY.as_millis() as u64)]
    page_delay_ms: u64,

    /// Pause between categories, in milliseconds.
    #[arg(long, default_value_t = CATEGORY_DELAY.as_millis() as u64)]
    category_delay_ms: u64,
}

impl SearchArgs {
    fn delays(&self) -> CollectionDelays {
        CollectionDelays {
            download: Duration::from_millis(self.download_delay_ms),
            page: Duration::from_millis(self.page_delay_ms),
            category: Duration::from_millis(self.category_delay_ms),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Command::Collect {
            search,
            categories,
            images_per_type,
        } => {
            validate_api_key(&search.api_key)?;
            let catalog = QueryCatalog::resolve(&search.catalog)?;
            let plan = CollectionPlan::multi_query(&catalog, &categories, images_per_type)?;
            run_collection(&search, &plan)
        }
        Command::CollectPages { search, ranges } => {
            validate_api_key(&search.api_key)?;
            let catalog = QueryCatalog::resolve(&search.catalog)?;
            let plan = CollectionPlan::page_ranges(&catalog, &ranges)?;
            run_collection(&search, &plan)
        }
        Command::Filter {
            input,
            output,
            model,
            model_url,
            confidence,
        } => {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(format!(
                    "Confidence must be between 0.0 and 1.0, got {confidence}"
                )
                .into());
            }
            run_filter(
                &input,
                &output,
                model.as_deref(),
                model_url.as_deref(),
                confidence,
            )
        }
        Command::Categories { catalog } => {
            let catalog = QueryCatalog::resolve(&catalog)?;
            for category in catalog.categories() {
                let count = catalog.queries(category).map_or(0, |q| q.len());
                println!("{category:<6} {count:>3} queries");
            }
            Ok(())
        }
    }
}

fn run_collection(
    search: &SearchArgs,
    plan: &CollectionPlan,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "Collecting {} categories into {} (at most {} API calls)",
        plan.jobs().len(),
        search.output.display(),
        plan.max_api_calls()
    );

    let mut use_case = CollectImagesUseCase::new(
        Box::new(SerpApiClient::new(search.api_key.clone())?),
        Box::new(HttpImageFetcher::new()?),
        Box::new(LogRunLogger::default()),
        search.delays(),
    );
    let report = use_case.execute(plan, &search.output)?;
    log::info!(
        "Downloaded {} images ({} duplicates removed, {} failed) with {} API calls",
        report.total_downloaded(),
        report.total_duplicates(),
        report.total_failed(),
        report.total_api_calls()
    );
    Ok(())
}

fn run_filter(
    input: &Path,
    output: &Path,
    model: Option<&Path>,
    model_url: Option<&str>,
    confidence: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(format!("Input directory not found: {}", input.display()).into());
    }
    let detector = build_detector(model, model_url, confidence)?;

    let mut use_case =
        FilterDatasetUseCase::new(detector, Box::new(LogRunLogger::default()), confidence);
    let stats = use_case.execute(input, output)?;
    log::info!(
        "Kept {}/{} images ({:.1}%) in {}",
        stats.one_person,
        stats.total_processed,
        stats.retention_rate(),
        output.display()
    );
    Ok(())
}

fn build_detector(
    model: Option<&Path>,
    model_url: Option<&str>,
    confidence: f32,
) -> Result<Box<dyn PersonDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {YOLO_MODEL_NAME}");
    let source = ModelSource {
        explicit_path: model,
        bundled_dir: Some(Path::new("models")),
        url: model_url,
        ..ModelSource::named(YOLO_MODEL_NAME)
    };
    let downloading = model.is_none() && model_url.is_some();
    let model_path = model_resolver::resolve(&source, Some(Box::new(download_progress)))?;
    if downloading {
        eprintln!();
    }

    Ok(Box::new(OnnxYoloDetector::new(
        &model_path,
        detector_score_floor(confidence),
    )?))
}

/// Boxes under the floor never reach person counting, so it must not exceed
/// the person threshold.
fn detector_score_floor(confidence: f32) -> f32 {
    confidence.min(DEFAULT_SCORE_THRESHOLD)
}

fn validate_api_key(api_key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let key = api_key.trim();
    if key.is_empty() || key == API_KEY_PLACEHOLDER {
        return Err("A SerpApi key is required: pass --api-key or set SERPAPI_API_KEY".into());
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading person detection model... {pct}%");
    } else {
        eprint!("\rDownloading person detection model... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rejects_placeholder_and_empty_keys() {
        assert!(validate_api_key(API_KEY_PLACEHOLDER).is_err());
        assert!(validate_api_key("").is_err());
        assert!(validate_api_key("   ").is_err());
        assert!(validate_api_key("abc123").is_ok());
    }

    #[test]
    fn test_collect_defaults() {
        let cli = Cli::try_parse_from(["hairset", "collect", "--api-key", "k"]).unwrap();
        let Command::Collect {
            search,
            categories,
            images_per_type,
        } = cli.command
        else {
            panic!("expected collect");
        };
        assert_eq!(categories, vec!["1", "2a", "2b"]);
        assert_eq!(images_per_type, 4000);
        assert_eq!(search.output, PathBuf::from("data/serpapi_raw"));
        assert_eq!(search.catalog, "multi-query");
        assert_eq!(search.delays(), CollectionDelays::default());
    }

    #[test]
    fn test_collect_pages_parses_ranges() {
        let cli = Cli::try_parse_from([
            "hairset",
            "collect-pages",
            "--api-key",
            "k",
            "--catalog",
            "single-query",
            "--range",
            "1a:1:40",
            "--range",
            "2b:0:20",
        ])
        .unwrap();
        let Command::CollectPages { ranges, .. } = cli.command else {
            panic!("expected collect-pages");
        };
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].category, "1a");
        assert_eq!(ranges[1].num_pages, 20);
    }

    #[test]
    fn test_collect_pages_rejects_bad_range() {
        let result =
            Cli::try_parse_from(["hairset", "collect-pages", "--api-key", "k", "--range", "1a:x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_score_floor_never_above_person_threshold() {
        assert_eq!(detector_score_floor(0.5), DEFAULT_SCORE_THRESHOLD);
        assert_eq!(detector_score_floor(0.1), 0.1);
        assert_eq!(detector_score_floor(0.0), 0.0);
    }

    #[test]
    fn test_filter_defaults() {
        let cli = Cli::try_parse_from(["hairset", "filter"]).unwrap();
        let Command::Filter {
            input,
            output,
            model,
            confidence,
            ..
        } = cli.command
        else {
            panic!("expected filter");
        };
        assert_eq!(input, PathBuf::from("data/serpapi_raw"));
        assert_eq!(output, PathBuf::from("data/yolo_filtered_serapi"));
        assert!(model.is_none());
        assert_eq!(confidence, 0.5);
    }
}
