//! Document processing pipeline

pub mod batch;
pub mod markdown;
pub mod segmenter;
pub mod transformer;
