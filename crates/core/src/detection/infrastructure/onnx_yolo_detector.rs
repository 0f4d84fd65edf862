/// YOLOv8 object detector using ONNX Runtime via `ort`.
///
/// Handles image decoding, letterbox preprocessing, inference, and per-class
/// NMS post-processing. Returns every class the model knows; person
/// counting happens in the domain.
use std::path::Path;

use image::RgbImage;

use crate::detection::domain::person_detector::{BoundingBox, Detection, PersonDetector};

/// Fallback model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Minimum class score for a candidate box to enter NMS.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.25;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f32 = 0.7;

/// Letterbox pad value (YOLO convention).
const PAD_GRAY: f32 = 114.0 / 255.0;

/// YOLOv8 detector backed by an ONNX Runtime session.
pub struct OnnxYoloDetector {
    session: ort::session::Session,
    score_threshold: f32,
    input_size: u32,
}

impl OnnxYoloDetector {
    /// Load a YOLOv8 ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting NCHW).
    /// Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path, score_threshold: f32) -> Result<Self, Box<dyn std::error::Error>> {
        let intra_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let session = ort::session::Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_intra_threads(intra_threads)?
            .with_execution_providers(preferred_execution_providers())?
            .commit_from_file(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);
        log::info!(
            "Loaded detector {} (input {input_size}x{input_size})",
            model_path.display()
        );

        Ok(Self {
            session,
            score_threshold,
            input_size,
        })
    }
}

impl PersonDetector for OnnxYoloDetector {
    fn detect(&mut self, image_path: &Path) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let image = image::open(image_path)?.to_rgb8();
        if image.width() == 0 || image.height() == 0 {
            return Err(format!("empty image: {}", image_path.display()).into());
        }

        let (input_tensor, geometry) = letterbox(&image, self.input_size);

        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("YOLO model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        let candidates = decode_output(data, &shape, &geometry, self.score_threshold)?;
        Ok(nms_per_class(candidates, NMS_IOU_THRESH))
    }
}

/// Platform ONNX execution providers; ort falls back to CPU when unavailable.
fn preferred_execution_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Mapping between letterboxed model coordinates and source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LetterboxGeometry {
    scale: f32,
    pad_x: u32,
    pad_y: u32,
    src_w: u32,
    src_h: u32,
}

impl LetterboxGeometry {
    /// Map a center-format model box back to clamped source corners.
    fn to_source(&self, cx: f32, cy: f32, w: f32, h: f32) -> BoundingBox {
        let px = self.pad_x as f32;
        let py = self.pad_y as f32;
        let max_x = self.src_w as f32;
        let max_y = self.src_h as f32;
        [
            ((cx - w / 2.0 - px) / self.scale).clamp(0.0, max_x),
            ((cy - h / 2.0 - py) / self.scale).clamp(0.0, max_y),
            ((cx + w / 2.0 - px) / self.scale).clamp(0.0, max_x),
            ((cy + h / 2.0 - py) / self.scale).clamp(0.0, max_y),
        ]
    }
}

/// Letterbox-resize an image to `target_size` × `target_size`.
///
/// Returns the NCHW float32 tensor and the geometry needed to undo it.
fn letterbox(image: &RgbImage, target_size: u32) -> (ndarray::Array4<f32>, LetterboxGeometry) {
    let src_w = image.width();
    let src_h = image.height();
    let target = target_size as f32;

    let scale = (target / src_w as f32).min(target / src_h as f32);
    let new_w = ((src_w as f32 * scale).round() as u32).min(target_size);
    let new_h = ((src_h as f32 * scale).round() as u32).min(target_size);
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    let size = target_size as usize;
    let mut tensor = ndarray::Array4::<f32>::from_elem((1, 3, size, size), PAD_GRAY);

    // Nearest-neighbor resize + copy into padded region
    for y in 0..new_h {
        let src_y = ((y as f32 / scale) as u32).min(src_h - 1);
        for x in 0..new_w {
            let src_x = ((x as f32 / scale) as u32).min(src_w - 1);
            let pixel = image.get_pixel(src_x, src_y);
            let ty = (pad_y + y) as usize;
            let tx = (pad_x + x) as usize;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = pixel[c] as f32 / 255.0;
            }
        }
    }

    (
        tensor,
        LetterboxGeometry {
            scale,
            pad_x,
            pad_y,
            src_w,
            src_h,
        },
    )
}

// ---------------------------------------------------------------------------
// Postprocessing
// ---------------------------------------------------------------------------

/// Parse raw YOLOv8 output into candidate detections above `score_threshold`.
///
/// Accepts `[1, 4 + C, N]` (the default export) or `[1, N, 4 + C]`. Each
/// candidate keeps only its highest-scoring class.
fn decode_output(
    data: &[f32],
    shape: &[usize],
    geometry: &LetterboxGeometry,
    score_threshold: f32,
) -> Result<Vec<Detection>, String> {
    if shape.len() != 3 || shape[0] != 1 {
        return Err(format!("Unexpected YOLO output shape: {shape:?}"));
    }
    let transposed = shape[1] < shape[2];
    let (num_dets, num_feats) = if transposed {
        (shape[2], shape[1])
    } else {
        (shape[1], shape[2])
    };
    if num_feats < 5 {
        return Err(format!("YOLO output has no class scores: {shape:?}"));
    }
    if data.len() < num_dets * num_feats {
        return Err(format!(
            "YOLO output has {} values, shape {shape:?} needs {}",
            data.len(),
            num_dets * num_feats
        ));
    }

    let value = |det: usize, feat: usize| {
        if transposed {
            data[feat * num_dets + det]
        } else {
            data[det * num_feats + feat]
        }
    };

    let mut detections = Vec::new();
    for i in 0..num_dets {
        let (class_id, confidence) = (4..num_feats)
            .map(|f| (f - 4, value(i, f)))
            .fold((0, f32::NEG_INFINITY), |best, cur| {
                if cur.1 > best.1 {
                    cur
                } else {
                    best
                }
            });
        if confidence < score_threshold {
            continue;
        }
        detections.push(Detection {
            class_id,
            confidence,
            bbox: geometry.to_source(value(i, 0), value(i, 1), value(i, 2), value(i, 3)),
        });
    }
    Ok(detections)
}

/// Greedy NMS within each class: sort by confidence descending, suppress overlaps.
fn nms_per_class(mut dets: Vec<Detection>, iou_thresh: f32) -> Vec<Detection> {
    dets.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<Detection> = Vec::new();
    for det in dets {
        let overlaps = keep
            .iter()
            .any(|k| k.class_id == det.class_id && bbox_iou(&k.bbox, &det.bbox) > iou_thresh);
        if !overlaps {
            keep.push(det);
        }
    }
    keep
}

fn bbox_iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }
    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;

    fn identity_geometry() -> LetterboxGeometry {
        LetterboxGeometry {
            scale: 1.0,
            pad_x: 0,
            pad_y: 0,
            src_w: 640,
            src_h: 640,
        }
    }

    fn det(class_id: usize, confidence: f32, bbox: BoundingBox) -> Detection {
        Detection {
            class_id,
            confidence,
            bbox,
        }
    }

    #[test]
    fn test_letterbox_preserves_aspect_ratio() {
        // 200x100 → scale 3.2, new 640x320, pad_y 160
        let image = RgbImage::from_pixel(200, 100, Rgb([128, 128, 128]));
        let (tensor, geometry) = letterbox(&image, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert_relative_eq!(geometry.scale, 3.2, epsilon = 1e-4);
        assert_eq!(geometry.pad_x, 0);
        assert_eq!(geometry.pad_y, 160);
    }

    #[test]
    fn test_letterbox_square_image() {
        let image = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
        let (tensor, geometry) = letterbox(&image, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert_relative_eq!(geometry.scale, 6.4, epsilon = 1e-4);
        assert_eq!((geometry.pad_x, geometry.pad_y), (0, 0));
    }

    #[test]
    fn test_letterbox_values_normalized_and_padded() {
        let image = RgbImage::from_pixel(100, 50, Rgb([255, 0, 255]));
        let (tensor, geometry) = letterbox(&image, 640);
        assert!(geometry.pad_y > 0);

        let y = geometry.pad_y as usize + 1;
        assert_relative_eq!(tensor[[0, 0, y, 1]], 1.0, epsilon = 1e-4);
        assert_relative_eq!(tensor[[0, 1, y, 1]], 0.0, epsilon = 1e-4);
        assert_relative_eq!(tensor[[0, 0, 0, 0]], PAD_GRAY, epsilon = 1e-4);
    }

    #[test]
    fn test_geometry_maps_back_to_source() {
        let image = RgbImage::new(200, 100);
        let (_, geometry) = letterbox(&image, 640);
        // Center (320, 320) size 64x32 in model space → source box around (100, 50).
        let bbox = geometry.to_source(320.0, 320.0, 64.0, 32.0);
        assert_relative_eq!(bbox[0], 90.0, epsilon = 1e-3);
        assert_relative_eq!(bbox[1], 45.0, epsilon = 1e-3);
        assert_relative_eq!(bbox[2], 110.0, epsilon = 1e-3);
        assert_relative_eq!(bbox[3], 55.0, epsilon = 1e-3);
    }

    #[test]
    fn test_geometry_clamps_to_image() {
        let bbox = identity_geometry().to_source(5.0, 635.0, 20.0, 20.0);
        assert_eq!(bbox, [0.0, 625.0, 15.0, 640.0]);
    }

    #[test]
    fn test_decode_transposed_output() {
        // [1, 4 + 3 classes, 2 candidates], feature-major.
        let shape = [1, 7, 2];
        #[rustfmt::skip]
        let data = [
            100.0, 300.0, // cx
            100.0, 300.0, // cy
            20.0,  40.0,  // w
            20.0,  40.0,  // h
            0.9,   0.1,   // class 0
            0.2,   0.15,  // class 1
            0.1,   0.6,   // class 2
        ];
        let dets = decode_output(&data, &shape, &identity_geometry(), 0.25).unwrap();

        assert_eq!(dets.len(), 2);
        assert_eq!(dets[0].class_id, 0);
        assert_relative_eq!(dets[0].confidence, 0.9);
        assert_eq!(dets[0].bbox, [90.0, 90.0, 110.0, 110.0]);
        assert_eq!(dets[1].class_id, 2);
        assert_relative_eq!(dets[1].confidence, 0.6);
    }

    #[test]
    fn test_decode_row_major_output() {
        // [1, 2 candidates, 4 + 2 classes]; second falls below threshold.
        let shape = [1, 8, 6];
        let mut data = vec![0.0f32; 8 * 6];
        data[..6].copy_from_slice(&[50.0, 50.0, 10.0, 10.0, 0.1, 0.8]);
        data[6..12].copy_from_slice(&[60.0, 60.0, 10.0, 10.0, 0.2, 0.1]);
        let dets = decode_output(&data, &shape, &identity_geometry(), 0.25).unwrap();

        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].class_id, 1);
    }

    #[test]
    fn test_decode_rejects_bad_shape() {
        assert!(decode_output(&[0.0; 4], &[4], &identity_geometry(), 0.25).is_err());
        assert!(decode_output(&[0.0; 8], &[1, 4, 2], &identity_geometry(), 0.25).is_err());
        assert!(decode_output(&[0.0; 3], &[1, 6, 10], &identity_geometry(), 0.25).is_err());
    }

    #[test]
    fn test_nms_suppresses_overlapping_same_class() {
        let dets = vec![
            det(0, 0.8, [5.0, 5.0, 105.0, 105.0]),
            det(0, 0.9, [0.0, 0.0, 100.0, 100.0]),
        ];
        let kept = nms_per_class(dets, 0.7);
        assert_eq!(kept.len(), 1);
        assert_relative_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn test_nms_keeps_overlapping_different_classes() {
        let dets = vec![
            det(0, 0.9, [0.0, 0.0, 100.0, 100.0]),
            det(27, 0.8, [2.0, 2.0, 100.0, 100.0]),
        ];
        assert_eq!(nms_per_class(dets, 0.7).len(), 2);
    }

    #[test]
    fn test_nms_keeps_two_people_side_by_side() {
        let dets = vec![
            det(0, 0.9, [0.0, 0.0, 50.0, 100.0]),
            det(0, 0.85, [40.0, 0.0, 90.0, 100.0]),
        ];
        assert_eq!(nms_per_class(dets, 0.7).len(), 2);
    }

    #[test]
    fn test_nms_empty_input() {
        assert!(nms_per_class(Vec::new(), 0.7).is_empty());
    }

    #[test]
    fn test_bbox_iou_no_overlap() {
        assert_eq!(
            bbox_iou(&[0.0, 0.0, 10.0, 10.0], &[20.0, 20.0, 30.0, 30.0]),
            0.0
        );
    }

    #[test]
    fn test_bbox_iou_perfect() {
        let b = [0.0, 0.0, 10.0, 10.0];
        assert_relative_eq!(bbox_iou(&b, &b), 1.0);
    }
}
