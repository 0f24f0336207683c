// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, put, routes, Build, Request, Response, Rocket, State};
use std::collections::BTreeMap;
use tracing::info;

use crate::browser::VacancyBrowser;
use crate::config::AppConfig;
use crate::core::CareerClient;
use crate::types::{FilterCategory, FilterOption};
use crate::weights::WeightAdvisor;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[get("/options/<category>?<search>")]
pub async fn filter_options(
    category: FilterCategory,
    search: Option<&str>,
    state: &State<AppState>,
) -> ApiResult<DataResponse<Vec<FilterOption>>> {
    handlers::options_handler(category, search, state).await
}

#[get("/filters")]
pub async fn get_filters(state: &State<AppState>) -> Json<FiltersResponse> {
    handlers::get_filters_handler(state).await
}

#[put("/filters/<category>", data = "<request>")]
pub async fn select_filter(
    category: FilterCategory,
    request: Json<SelectRequest>,
    state: &State<AppState>,
) -> Json<FiltersResponse> {
    handlers::select_filter_handler(category, request, state).await
}

#[post("/filters/apply")]
pub async fn apply_filters(state: &State<AppState>) -> ApiResult<VacanciesResponse> {
    handlers::apply_filters_handler(state).await
}

#[get("/vacancies")]
pub async fn list_vacancies(state: &State<AppState>) -> Json<VacanciesResponse> {
    handlers::list_vacancies_handler(state).await
}

#[get("/vacancies/<id>")]
pub async fn vacancy_detail(id: &str, state: &State<AppState>) -> ApiResult<VacancyDetailView> {
    handlers::vacancy_detail_handler(id, state).await
}

#[get("/weights")]
pub async fn get_weights(state: &State<AppState>) -> Json<WeightsResponse> {
    handlers::get_weights_handler(state).await
}

#[put("/weights", data = "<request>")]
pub async fn update_weights(
    request: Json<BTreeMap<String, i64>>,
    state: &State<AppState>,
) -> Json<WeightsResponse> {
    handlers::update_weights_handler(request, state).await
}

#[post("/weights/suggest", data = "<request>")]
pub async fn suggest_weights(
    request: Json<SuggestWeightsRequest>,
    state: &State<AppState>,
) -> Json<WeightsResponse> {
    handlers::suggest_weights_handler(request, state).await
}

#[options("/<_..>")]
pub async fn preflight() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        success: false,
        error: "Invalid request format".to_string(),
        error_code: "BAD_REQUEST".to_string(),
    })
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        success: false,
        error: "Resource not found".to_string(),
        error_code: "NOT_FOUND".to_string(),
    })
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        success: false,
        error: "Unknown filter category or malformed body".to_string(),
        error_code: "UNPROCESSABLE".to_string(),
    })
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        success: false,
        error: "Internal server error".to_string(),
        error_code: "INTERNAL_ERROR".to_string(),
    })
}

pub fn build_rocket(figment: Figment, state: AppState) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                health,
                filter_options,
                get_filters,
                select_filter,
                apply_filters,
                list_vacancies,
                vacancy_detail,
                get_weights,
                update_weights,
                suggest_weights,
                preflight,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: &AppConfig) -> Result<()> {
    let browser = VacancyBrowser::new(CareerClient::from_config(&config.career_api)?);
    let advisor = WeightAdvisor::new(&config.llm)?;

    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge(("address", config.server.address.clone()));

    info!("Starting vacancy browser API server");
    info!(
        "Server: http://{}:{}/api",
        config.server.address, config.server.port
    );

    build_rocket(figment, AppState::new(browser, advisor))
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
