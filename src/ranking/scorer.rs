// src/ranking/scorer.rs
//! Suitability score: stream preference, how open the posting still is, and employment status.
//!
//! `score = round((stream_weight + fill_signal * 5 + employment_weight) / 15 * 100)`
//! clamped into `[0, 100]`.

use serde::{Deserialize, Serialize};

use crate::types::{EnrichedVacancy, Vacancy};
use crate::weights::StreamWeights;

const FILL_SCALE: f64 = 5.0;
const MAX_RAW_SCORE: f64 = 15.0;

pub const PERMANENT_WEIGHT: u8 = 5;
pub const CONTRACT_WEIGHT: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVacancy {
    pub score: u8,
    #[serde(flatten)]
    pub vacancy: EnrichedVacancy,
}

/// Weight of a known employment status; anything else weighs 0.
pub fn employment_weight(status: &str) -> u8 {
    match status.trim().to_lowercase().as_str() {
        "pegawai tetap" | "permanent" => PERMANENT_WEIGHT,
        "kontrak" | "pkwt" | "pegawai kontrak" | "contract" => CONTRACT_WEIGHT,
        _ => 0,
    }
}

/// `1 - applied / quota`, or 0 when either count is unusable.
///
/// Not clamped: postings with more applicants than quota go negative.
pub fn fill_signal(vacancy: &Vacancy) -> f64 {
    match (vacancy.total_applied, vacancy.total_quota) {
        (Some(applied), Some(quota)) if quota > 0.0 => 1.0 - applied / quota,
        _ => 0.0,
    }
}

pub fn score(vacancy: &Vacancy, weights: &StreamWeights) -> u8 {
    let stream = vacancy
        .stream_name
        .as_deref()
        .map(|s| weights.get(s))
        .unwrap_or(0);
    let employment = vacancy
        .employment_status
        .as_deref()
        .map(employment_weight)
        .unwrap_or(0);

    let raw = f64::from(stream) + fill_signal(vacancy) * FILL_SCALE + f64::from(employment);
    let scaled = (raw / MAX_RAW_SCORE * 100.0).round();

    if scaled.is_finite() {
        scaled.clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Score every vacancy and sort best first. Equal scores keep their input order.
pub fn rank(vacancies: Vec<EnrichedVacancy>, weights: &StreamWeights) -> Vec<ScoredVacancy> {
    let mut scored: Vec<ScoredVacancy> = vacancies
        .into_iter()
        .map(|vacancy| ScoredVacancy {
            score: score(&vacancy.vacancy, weights),
            vacancy,
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}
