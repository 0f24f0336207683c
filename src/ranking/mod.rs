// src/ranking/mod.rs
//! Joining side data onto listed vacancies and ordering them by suitability

pub mod aggregator;
pub mod scorer;

pub use aggregator::merge;
pub use scorer::{rank, score, ScoredVacancy};
