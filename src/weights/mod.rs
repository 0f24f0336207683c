// src/weights/mod.rs
pub mod advisor;
pub mod stream_weights;

pub use advisor::WeightAdvisor;
pub use stream_weights::{StreamWeights, DEFAULT_STREAM_WEIGHT, KNOWN_STREAMS};
