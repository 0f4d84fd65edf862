use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::constants::{IMAGE_EXTENSIONS, SAVED_IMAGE_EXTENSION};

/// File name for the `index`-th image of a category, e.g. `2b_00042.jpg`.
pub fn image_file_name(category: &str, index: usize) -> String {
    format!("{category}_{index:05}.{SAVED_IMAGE_EXTENSION}")
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Image files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn list_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Immediate subdirectory names of `root`, sorted.
pub fn list_categories(root: &Path) -> io::Result<Vec<String>> {
    let mut categories = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            categories.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    categories.sort();
    Ok(categories)
}

/// First index to use for new downloads in a category directory.
///
/// Continues from the number of existing images, bumped past the highest
/// numbered `{category}_NNNNN` file when the sequence has gaps.
pub fn next_free_index(dir: &Path, category: &str) -> io::Result<usize> {
    let images = list_images(dir)?;
    let highest = images
        .iter()
        .filter_map(|path| parse_index(category, path))
        .max();
    Ok(match highest {
        Some(h) => images.len().max(h + 1),
        None => images.len(),
    })
}

fn parse_index(category: &str, path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let digits = stem.strip_prefix(category)?.strip_prefix('_')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
