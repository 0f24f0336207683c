// src/web/types.rs
use chrono::{DateTime, Utc};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::browser::{Session, VacancyBrowser};
use crate::filters::{FilterState, QueryFilters};
use crate::ranking::ScoredVacancy;
use crate::types::{FilterCategory, FilterOption, Vacancy};
use crate::utils::{self, FillBand};
use crate::weights::{StreamWeights, WeightAdvisor};

/// Shared server state. The session lock is never held across a network call.
pub struct AppState {
    pub browser: VacancyBrowser,
    pub advisor: WeightAdvisor,
    pub session: RwLock<Session>,
}

impl AppState {
    pub fn new(browser: VacancyBrowser, advisor: WeightAdvisor) -> Self {
        Self {
            browser,
            advisor,
            session: RwLock::new(Session::default()),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
}

pub type ApiError = (Status, Json<ErrorResponse>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn api_error(status: Status, error_code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
            error_code: error_code.to_string(),
        }),
    )
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SelectRequest {
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct FiltersResponse {
    pub success: bool,
    pub notification: String,
    /// What each multi-select should currently display.
    pub pending: BTreeMap<FilterCategory, Vec<FilterOption>>,
    pub applied: QueryFilters,
}

impl FiltersResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            success: true,
            notification: session.notification().to_string(),
            pending: displayed_selections(session.pending()),
            applied: session.applied().to_query_filters(),
        }
    }
}

fn displayed_selections(state: &FilterState) -> BTreeMap<FilterCategory, Vec<FilterOption>> {
    FilterCategory::ALL
        .into_iter()
        .map(|category| (category, state.selection(category).displayed_options()))
        .collect()
}

/// A ranked vacancy with the display fields a card needs.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct VacancyCard {
    pub rank: usize,
    pub fill_percent: Option<u8>,
    pub fill_band: Option<FillBand>,
    pub regions: String,
    pub education_summary: String,
    pub majors_summary: String,
    #[serde(flatten)]
    pub scored: ScoredVacancy,
}

impl VacancyCard {
    pub fn new(rank: usize, scored: &ScoredVacancy) -> Self {
        let vacancy = &scored.vacancy.vacancy;
        let fill_percent = utils::fill_percent(vacancy.total_applied, vacancy.total_quota);

        Self {
            rank,
            fill_percent,
            fill_band: fill_percent.map(utils::fill_band),
            regions: utils::regions_label(vacancy.placement_region_name.as_deref()),
            education_summary: utils::education_summary(&scored.vacancy.education),
            majors_summary: utils::majors_summary(&scored.vacancy.major),
            scored: scored.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct VacanciesResponse {
    pub success: bool,
    pub notification: String,
    pub total: usize,
    pub fetched_at: Option<DateTime<Utc>>,
    pub vacancies: Vec<VacancyCard>,
}

impl VacanciesResponse {
    pub fn from_session(session: &Session) -> Self {
        let vacancies: Vec<VacancyCard> = session
            .vacancies()
            .iter()
            .enumerate()
            .map(|(index, scored)| VacancyCard::new(index + 1, scored))
            .collect();

        Self {
            success: true,
            notification: session.notification().to_string(),
            total: vacancies.len(),
            fetched_at: session.last_fetched(),
            vacancies,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct VacancyDetailView {
    pub regions: String,
    pub description_text: Option<String>,
    pub requirement_text: Option<String>,
    pub qualification: Option<String>,
    pub gender: Option<&'static str>,
    pub majors_heading: &'static str,
    pub majors: Vec<String>,
    #[serde(flatten)]
    pub vacancy: Vacancy,
}

impl VacancyDetailView {
    pub fn new(vacancy: Vacancy, major: &crate::types::MajorEligibility) -> Self {
        let qualifications = vacancy.qualifications.clone().unwrap_or_default();
        let majors = qualifications
            .major
            .as_ref()
            .map(|m| m.list_major.clone())
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| major.list_major.clone());

        Self {
            regions: utils::regions_label(vacancy.placement_region_name.as_deref()),
            description_text: vacancy.description.as_deref().map(utils::html_to_text),
            requirement_text: vacancy.requirement.as_deref().map(utils::html_to_text),
            qualification: utils::qualification_summary(&qualifications),
            gender: vacancy
                .qualifications
                .as_ref()
                .map(|q| utils::gender_label(q.gender.as_deref())),
            majors_heading: utils::majors_heading(major),
            majors,
            vacancy,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct WeightsResponse {
    pub success: bool,
    pub message: String,
    pub weights: StreamWeights,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SuggestWeightsRequest {
    pub interest: String,
}
