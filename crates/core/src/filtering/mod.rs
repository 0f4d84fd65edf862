pub mod filter_dataset_use_case;
pub mod filtering_stats;
