pub mod person_counter;
pub mod person_detector;
