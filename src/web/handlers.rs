// src/web/handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

use crate::filters::selectable_options;
use crate::types::{FilterCategory, FilterOption, VacancyId};
use crate::web::types::*;
use crate::weights::KNOWN_STREAMS;

pub async fn options_handler(
    category: FilterCategory,
    search: Option<&str>,
    state: &State<AppState>,
) -> ApiResult<DataResponse<Vec<FilterOption>>> {
    match state.browser.client().list_options(category, search).await {
        Ok(reference) => Ok(Json(DataResponse::new(selectable_options(
            category, reference,
        )))),
        Err(e) => {
            error!("Error fetching {} options: {:#}", category, e);
            Err(api_error(
                Status::BadGateway,
                "OPTIONS_UNAVAILABLE",
                format!("Error fetching {} options.", category.display_name()),
            ))
        }
    }
}

pub async fn select_filter_handler(
    category: FilterCategory,
    request: Json<SelectRequest>,
    state: &State<AppState>,
) -> Json<FiltersResponse> {
    let mut session = state.session.write().await;
    session.select(category, &request.options);
    Json(FiltersResponse::from_session(&session))
}

pub async fn get_filters_handler(state: &State<AppState>) -> Json<FiltersResponse> {
    let session = state.session.read().await;
    Json(FiltersResponse::from_session(&session))
}

pub async fn apply_filters_handler(state: &State<AppState>) -> ApiResult<VacanciesResponse> {
    let snapshot = state.session.write().await.begin_apply();
    info!("Applying filters: {:?}", snapshot.filters.to_query_filters());

    let outcome = state.browser.apply(&snapshot.filters, &snapshot.weights).await;
    let failed = outcome.is_err();

    let mut session = state.session.write().await;
    let notification = session.finish_apply(outcome).to_string();

    if failed {
        Err(api_error(Status::BadGateway, "FETCH_FAILED", notification))
    } else {
        Ok(Json(VacanciesResponse::from_session(&session)))
    }
}

pub async fn list_vacancies_handler(state: &State<AppState>) -> Json<VacanciesResponse> {
    let session = state.session.read().await;
    Json(VacanciesResponse::from_session(&session))
}

pub async fn vacancy_detail_handler(
    id: &str,
    state: &State<AppState>,
) -> ApiResult<VacancyDetailView> {
    let id = VacancyId::parse(id);
    let listed = state.session.read().await.find(&id).cloned();

    let Some(listed) = listed else {
        return Err(api_error(
            Status::NotFound,
            "VACANCY_NOT_FOUND",
            format!("Vacancy {} is not in the current list", id),
        ));
    };

    match state.browser.load_detail(&listed.vacancy).await {
        Ok(detailed) => {
            state.session.write().await.store_detail(&detailed);
            Ok(Json(VacancyDetailView::new(detailed, &listed.major)))
        }
        Err(e) => {
            error!("Error fetching vacancy details: {:#}", e);
            Err(api_error(
                Status::BadGateway,
                "DETAIL_FAILED",
                "Error fetching vacancy details.",
            ))
        }
    }
}

pub async fn get_weights_handler(state: &State<AppState>) -> Json<WeightsResponse> {
    let session = state.session.read().await;
    Json(WeightsResponse {
        success: true,
        message: format!("{} stream weights", session.weights().len()),
        weights: session.weights().clone(),
    })
}

pub async fn update_weights_handler(
    request: Json<BTreeMap<String, i64>>,
    state: &State<AppState>,
) -> Json<WeightsResponse> {
    let mut session = state.session.write().await;

    let mut weights = session.weights().clone();
    for (stream, weight) in request.iter() {
        weights.set(stream, *weight);
    }
    session.set_weights(weights);

    Json(WeightsResponse {
        success: true,
        message: format!("Updated {} stream weights", request.len()),
        weights: session.weights().clone(),
    })
}

pub async fn suggest_weights_handler(
    request: Json<SuggestWeightsRequest>,
    state: &State<AppState>,
) -> Json<WeightsResponse> {
    let suggested = state
        .advisor
        .suggest(&request.interest, &KNOWN_STREAMS)
        .await;

    let mut session = state.session.write().await;

    // An empty suggestion is applied as-is: every stream then weighs 0.
    let suggested_any = !suggested.is_empty();
    if !suggested_any {
        warn!("No stream weights suggested for: {}", request.interest);
    }
    session.set_weights(suggested);

    let message = if suggested_any {
        format!("AI-determined weights for {} streams", session.weights().len())
    } else {
        "No weights suggested; every stream now weighs 0.".to_string()
    };

    Json(WeightsResponse {
        success: suggested_any,
        message,
        weights: session.weights().clone(),
    })
}

pub async fn health_handler() -> Json<&'static str> {
    Json("OK")
}
