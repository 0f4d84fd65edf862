use std::time::Duration;

pub const SEARCH_ENDPOINT: &str = "https://serpapi.com/search.json";
pub const SEARCH_ENGINE: &str = "google_images";

/// Value shipped in the collection scripts' templates; treated as "no key".
pub const API_KEY_PLACEHOLDER: &str = "your_serpapi_key_here";

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

pub const DOWNLOAD_DELAY: Duration = Duration::from_millis(300);
pub const PAGE_DELAY: Duration = Duration::from_secs(1);
pub const CATEGORY_DELAY: Duration = Duration::from_secs(2);

/// Pages tried per query in multi-query collection. Later pages rarely return results.
pub const MULTI_QUERY_PAGES: &[u32] = &[0, 1];

/// Approximate number of results per search page.
pub const RESULTS_PER_PAGE: usize = 100;

pub const DEFAULT_IMAGES_PER_TYPE: usize = 4000;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
pub const SAVED_IMAGE_EXTENSION: &str = "jpg";

pub const RAW_DATASET_DIR: &str = "data/serpapi_raw";
pub const FILTERED_DATASET_DIR: &str = "data/yolo_filtered_serapi";
pub const STATS_FILE_NAME: &str = "filtering_stats.json";

pub const YOLO_MODEL_NAME: &str = "yolov8n.onnx";

/// COCO class id for "person".
pub const PERSON_CLASS_ID: usize = 0;

/// A person counts only when its detection confidence is strictly above this.
pub const PERSON_CONFIDENCE: f32 = 0.5;
