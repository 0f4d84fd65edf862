use super::person_detector::Detection;
use crate::shared::constants::PERSON_CLASS_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonCount {
    Zero,
    One,
    Multiple,
}

impl PersonCount {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Zero,
            1 => Self::One,
            _ => Self::Multiple,
        }
    }
}

/// Number of person detections strictly above `threshold`.
pub fn count_people(detections: &[Detection], threshold: f32) -> usize {
    detections
        .iter()
        .filter(|d| d.class_id == PERSON_CLASS_ID && d.confidence > threshold)
        .count()
}

pub fn classify(detections: &[Detection], threshold: f32) -> PersonCount {
    PersonCount::from_count(count_people(detections, threshold))
}
