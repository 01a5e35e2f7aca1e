pub mod analyzer;
pub mod sweep;
