// src/browser.rs
//! The apply-filters pipeline and the per-user browsing session around it

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{error, info};

use crate::core::CareerClient;
use crate::filters::FilterState;
use crate::ranking::{self, ScoredVacancy};
use crate::types::{EnrichedVacancy, FilterCategory, FilterOption, Vacancy, VacancyId};
use crate::weights::StreamWeights;

/// Runs list → side data → merge → rank against the career API.
#[derive(Clone)]
pub struct VacancyBrowser {
    client: CareerClient,
}

impl VacancyBrowser {
    pub fn new(client: CareerClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CareerClient {
        &self.client
    }

    /// Fetch, enrich and rank vacancies for a filter snapshot.
    ///
    /// Side data for majors and education is fetched concurrently; if either
    /// request fails the whole call fails.
    pub async fn apply(
        &self,
        filters: &FilterState,
        weights: &StreamWeights,
    ) -> Result<Vec<ScoredVacancy>> {
        let query = filters.to_query_filters();
        let vacancies = self
            .client
            .list_vacancies(&query)
            .await
            .context("Failed to list vacancies")?;

        if vacancies.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<VacancyId> = vacancies.iter().map(|v| v.vacancy_id.clone()).collect();
        let (majors, educations) = tokio::try_join!(
            self.client.fetch_major_eligibility(&ids),
            self.client.fetch_education_requirement(&ids),
        )?;

        let merged = ranking::merge(vacancies, majors, educations);
        Ok(ranking::rank(merged, weights))
    }

    /// Fill in the lazily fetched detail fields unless they are already present.
    pub async fn load_detail(&self, vacancy: &Vacancy) -> Result<Vacancy> {
        let mut full = vacancy.clone();
        if full.has_description() {
            return Ok(full);
        }

        let detail = self.client.fetch_vacancy_detail(&vacancy.vacancy_id).await?;
        full.apply_detail(detail);
        Ok(full)
    }
}

/// Flat status line shown to the user after each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Idle,
    FiltersPending,
    Loading,
    Found(usize),
    NoneFound,
    FetchFailed,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Idle => Ok(()),
            Notification::FiltersPending => {
                f.write_str("Filters selected. Click Apply Filters to update.")
            }
            Notification::Loading => f.write_str("Loading vacancies..."),
            Notification::Found(n) => write!(f, "{} vacancies found.", n),
            Notification::NoneFound => f.write_str("No vacancies found."),
            Notification::FetchFailed => f.write_str("Error fetching vacancies. Please try again."),
        }
    }
}

/// Inputs for one apply, taken from the session so no state is read mid-flight.
#[derive(Debug, Clone)]
pub struct ApplySnapshot {
    pub filters: FilterState,
    pub weights: StreamWeights,
}

/// Pending vs applied filters, the session's stream weights and the last result.
#[derive(Debug, Clone)]
pub struct Session {
    pending: FilterState,
    applied: FilterState,
    weights: StreamWeights,
    vacancies: Vec<ScoredVacancy>,
    notification: Notification,
    last_fetched: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(StreamWeights::defaults())
    }
}

impl Session {
    pub fn new(weights: StreamWeights) -> Self {
        Self {
            pending: FilterState::new(),
            applied: FilterState::new(),
            weights,
            vacancies: Vec::new(),
            notification: Notification::Idle,
            last_fetched: None,
        }
    }

    pub fn select(&mut self, category: FilterCategory, chosen: &[FilterOption]) -> &Notification {
        self.pending = self.pending.select(category, chosen);
        self.notification = Notification::FiltersPending;
        &self.notification
    }

    /// Promote pending filters to applied and hand out the snapshot to run.
    pub fn begin_apply(&mut self) -> ApplySnapshot {
        self.applied = self.pending.clone();
        self.notification = Notification::Loading;
        ApplySnapshot {
            filters: self.applied.clone(),
            weights: self.weights.clone(),
        }
    }

    /// Record the outcome of an apply. Failures keep the previous list.
    pub fn finish_apply(&mut self, outcome: Result<Vec<ScoredVacancy>>) -> &Notification {
        match outcome {
            Ok(vacancies) => {
                self.notification = if vacancies.is_empty() {
                    Notification::NoneFound
                } else {
                    Notification::Found(vacancies.len())
                };
                info!("{}", self.notification);
                self.vacancies = vacancies;
                self.last_fetched = Some(Utc::now());
            }
            Err(e) => {
                error!("Error fetching vacancies: {:#}", e);
                self.notification = Notification::FetchFailed;
            }
        }
        &self.notification
    }

    /// Re-sort the current list after a weight change, without refetching.
    pub fn set_weights(&mut self, weights: StreamWeights) {
        self.weights = weights;
        let current = std::mem::take(&mut self.vacancies);
        let merged = current.into_iter().map(|s| s.vacancy).collect();
        self.vacancies = ranking::rank(merged, &self.weights);
    }

    pub fn find(&self, id: &VacancyId) -> Option<&EnrichedVacancy> {
        self.vacancies
            .iter()
            .map(|s| &s.vacancy)
            .find(|v| &v.vacancy.vacancy_id == id)
    }

    /// Cache a loaded detail on the listed vacancy so later views skip the fetch.
    pub fn store_detail(&mut self, detailed: &Vacancy) {
        if let Some(entry) = self
            .vacancies
            .iter_mut()
            .find(|s| s.vacancy.vacancy.vacancy_id == detailed.vacancy_id)
        {
            entry.vacancy.vacancy = detailed.clone();
        }
    }

    pub fn pending(&self) -> &FilterState {
        &self.pending
    }

    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    pub fn weights(&self) -> &StreamWeights {
        &self.weights
    }

    pub fn vacancies(&self) -> &[ScoredVacancy] {
        &self.vacancies
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.last_fetched
    }
}
