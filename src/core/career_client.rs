// src/core/career_client.rs
//! HTTP client for the recruitment career API - every call is a POST returning `{ data }`

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::CareerApiConfig;
use crate::filters::QueryFilters;
use crate::types::{
    response::{Envelope, PageEnvelope},
    EducationRequirement, FilterCategory, FilterOption, Identifier, MajorEligibility, Vacancy,
    VacancyDetail, VacancyId,
};

pub const LIST_VACANCY_ENDPOINT: &str = "/list-vacancy";
pub const VACANCY_MAJOR_ENDPOINT: &str = "/vacancy-major";
pub const VACANCY_EDUCATION_ENDPOINT: &str = "/vacancy-education";
pub const DETAIL_VACANCY_ENDPOINT: &str = "/detail-vacancy";

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:136.0) Gecko/20100101 Firefox/136.0";

/// Sends a JSON body to an endpoint and returns the decoded JSON reply.
#[rocket::async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value>;
}

/// reqwest-backed transport carrying the fixed header set and bearer credential.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &CareerApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .default_headers(Self::fixed_headers(config)?)
            .user_agent(USER_AGENT);

        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fixed_headers(config: &CareerApiConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "Accept-Language",
            HeaderValue::from_static("en-US,en;q=0.5"),
        );

        if !config.bearer_token.is_empty() {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", config.bearer_token))
                .context("Bearer token contains invalid header characters")?;
            headers.insert(AUTHORIZATION, bearer);
        }

        let origin =
            HeaderValue::from_str(&config.origin).context("Origin is not a valid header value")?;
        let referer = HeaderValue::from_str(&format!("{}/", config.origin.trim_end_matches('/')))
            .context("Origin is not a valid referer")?;
        headers.insert(ORIGIN, origin);
        headers.insert(REFERER, referer);

        Ok(headers)
    }
}

#[rocket::async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<Value>()
                .await
                .with_context(|| format!("Failed to parse JSON response from {}", endpoint))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Career API error on {}: {} {}", endpoint, status, error_text);
            anyhow::bail!("HTTP {} error from {}: {}", status, endpoint, error_text)
        }
    }
}

/// Typed operations over the career API. Cheap to clone.
#[derive(Clone)]
pub struct CareerClient {
    transport: Arc<dyn Transport>,
    page_size: u32,
}

impl CareerClient {
    pub fn new(transport: Arc<dyn Transport>, page_size: u32) -> Self {
        Self {
            transport,
            page_size: page_size.max(1),
        }
    }

    pub fn from_config(config: &CareerApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config.page_size))
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch every page of the listing, in request order, until a page comes back empty.
    pub async fn list_vacancies(&self, filters: &QueryFilters) -> Result<Vec<Vacancy>> {
        let mut all = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut body = json!({
                "page": page,
                "size": self.page_size,
                "job_title": "",
                "search": "",
            });
            if let Value::Object(map) = &mut body {
                map.extend(filters.to_body_fields());
            }

            let raw = self
                .transport
                .post_json(LIST_VACANCY_ENDPOINT, &body)
                .await
                .with_context(|| format!("Failed to fetch vacancy page {}", page))?;

            let envelope: PageEnvelope<Vacancy> = serde_json::from_value(raw)
                .with_context(|| format!("Malformed vacancy page {}", page))?;

            match envelope.data {
                Some(items) if !items.is_empty() => {
                    debug!("Vacancy page {} returned {} items", page, items.len());
                    all.extend(items);
                    page += 1;
                }
                _ => break,
            }
        }

        info!("Fetched {} vacancies in {} page request(s)", all.len(), page);
        Ok(all)
    }

    pub async fn fetch_major_eligibility(
        &self,
        ids: &[VacancyId],
    ) -> Result<Vec<MajorEligibility>> {
        self.post_data(VACANCY_MAJOR_ENDPOINT, &json!({ "vacancy_id": ids }))
            .await
            .context("Failed to fetch vacancy majors")
    }

    pub async fn fetch_education_requirement(
        &self,
        ids: &[VacancyId],
    ) -> Result<Vec<EducationRequirement>> {
        self.post_data(VACANCY_EDUCATION_ENDPOINT, &json!({ "vacancy_id": ids }))
            .await
            .context("Failed to fetch vacancy education")
    }

    pub async fn fetch_vacancy_detail(&self, id: &VacancyId) -> Result<VacancyDetail> {
        let data: Value = self
            .post_data(DETAIL_VACANCY_ENDPOINT, &json!({ "vacancy_id": id }))
            .await
            .with_context(|| format!("Failed to fetch detail for vacancy {}", id))?;

        // Some deployments wrap the single record in a list.
        let record = match data {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            other => other,
        };

        serde_json::from_value(record)
            .with_context(|| format!("Malformed detail for vacancy {}", id))
    }

    /// Reference options for a filter category, optionally narrowed by a label search.
    pub async fn list_options(
        &self,
        category: FilterCategory,
        search: Option<&str>,
    ) -> Result<Vec<FilterOption>> {
        let items: Vec<Value> = self
            .post_data(category.endpoint(), &json!({}))
            .await
            .with_context(|| format!("Failed to fetch {} options", category))?;

        let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();

        Ok(items
            .iter()
            .filter_map(|item| {
                let label = item.get(category.label_field())?.as_str()?;
                let value = Identifier::from_json(item.get(category.value_field())?)?;
                Some(FilterOption::Value {
                    value,
                    label: label.to_string(),
                })
            })
            .filter(|option| needle.is_empty() || option.label().to_lowercase().contains(&needle))
            .collect())
    }

    async fn post_data<R>(&self, endpoint: &str, body: &Value) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let raw = self.transport.post_json(endpoint, body).await?;
        let envelope: Envelope<R> = serde_json::from_value(raw)
            .with_context(|| format!("Unexpected response shape from {}", endpoint))?;
        Ok(envelope.data)
    }
}
