pub mod cross_detector;
pub mod cross_event;
