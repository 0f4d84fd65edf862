use std::path::Path;

/// Axis-aligned box in source-image pixel coordinates: `[x1, y1, x2, y2]`.
pub type BoundingBox = [f32; 4];

/// One object found in an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Index into the model's class list (COCO: 0 = person).
    pub class_id: usize,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Finds objects in an image file.
///
/// `&mut self` because inference sessions are stateful.
pub trait PersonDetector: Send {
    fn detect(&mut self, image_path: &Path) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
