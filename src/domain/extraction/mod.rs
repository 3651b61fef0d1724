//! Extraction module - derives scoring features from content metadata.

mod extractor;

pub use extractor::FeatureExtractor;
