//! HTTP storage backed by calplus-server

use calplus_core::storage::EventStorage;
use calplus_core::{PlannerError, PlannerResult, Record};
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Loads and saves the event collection through `/collection`.
pub struct HttpStorage {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStorage {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/collection", self.base_url)
    }

    fn unreachable(&self, err: reqwest::Error) -> PlannerError {
        PlannerError::Storage(format!(
            "Could not reach calplus-server at {}: {}",
            self.base_url, err
        ))
    }
}

/// Turn a non-success response into a storage error carrying the server's message.
async fn error_from(resp: reqwest::Response) -> PlannerError {
    let status = resp.status();
    match resp.json::<ErrorResponse>().await {
        Ok(body) => PlannerError::Storage(body.error),
        Err(_) => PlannerError::Storage(format!("Server responded with {status}")),
    }
}

impl EventStorage for HttpStorage {
    /// GET /collection
    async fn load(&self) -> PlannerResult<Vec<Record>> {
        let resp = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| PlannerError::Storage(format!("Invalid collection from server: {e}")))
    }

    /// POST /collection
    async fn save(&self, records: &[Record]) -> PlannerResult<()> {
        let resp = self
            .http
            .post(self.collection_url())
            .json(records)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }

        Ok(())
    }
}
