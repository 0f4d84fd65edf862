pub mod collect_images_use_case;
pub mod collection_plan;
pub mod collection_report;
