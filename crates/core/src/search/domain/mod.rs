pub mod image_search;
