#![allow(dead_code)]

use anyhow::Result;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use vacancy_browser::{CareerClient, Transport};

/// Scripted career API: queued replies per endpoint, every call recorded.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, VecDeque<Result<Value, String>>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, endpoint: &str, body: Value) -> &Self {
        self.push(endpoint, Ok(body))
    }

    pub fn fail(&self, endpoint: &str, message: &str) -> &Self {
        self.push(endpoint, Err(message.to_string()))
    }

    fn push(&self, endpoint: &str, reply: Result<Value, String>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(e, _)| e == endpoint)
            .map(|(_, body)| body)
            .collect()
    }
}

#[rocket::async_trait]
impl Transport for FakeTransport {
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), body.clone()));

        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            // Unscripted listing pages are empty
            None => Ok(json!({ "data": [] })),
        }
    }
}

pub fn client(transport: &Arc<FakeTransport>, page_size: u32) -> CareerClient {
    CareerClient::new(transport.clone(), page_size)
}

pub fn vacancy(id: i64, stream: &str, status: &str, applied: f64, quota: f64) -> Value {
    json!({
        "vacancy_id": id,
        "title": format!("Vacancy {}", id),
        "company_name": "PT Contoh",
        "stream_name": stream,
        "employment_status": status,
        "total_applied": applied,
        "total_quota": quota,
        "placement_region_name": "[\"Jakarta\",\"Surabaya\"]",
    })
}

pub fn page(items: Vec<Value>) -> Value {
    json!({ "data": items })
}
