//! Typed HTTP client for the encyclopedia's opensearch API.

use crate::error::{NotebookError, NotebookResult};
use serde_json::Value;
use std::time::Duration;

pub struct EncyclopediaClient {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

/// Outcome of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Found(String),
    NotFound,
}

impl EncyclopediaClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Search for `term` and return the first article link.
    pub async fn lookup(&self, term: &str) -> NotebookResult<Reference> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "opensearch"),
                ("search", term),
                ("limit", "1"),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotebookError::RemoteLookupFailed(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            )));
        }

        let body: Value = resp.json().await.map_err(|e| {
            NotebookError::RemoteLookupFailed(format!("Parse search response: {}", e))
        })?;

        parse_opensearch(&body).map_err(NotebookError::RemoteLookupFailed)
    }

    fn transport_error(&self, e: reqwest::Error) -> NotebookError {
        if e.is_timeout() {
            NotebookError::RemoteLookupFailed(format!(
                "no answer within {}s",
                self.timeout.as_secs_f32()
            ))
        } else {
            NotebookError::RemoteLookupFailed(format!("Search request failed: {}", e))
        }
    }
}

/// Opensearch answers `[term, [titles], [descriptions], [links]]`.
fn parse_opensearch(body: &Value) -> Result<Reference, String> {
    let fields = body
        .as_array()
        .ok_or_else(|| "expected a JSON array".to_string())?;

    let Some(links) = fields.get(3) else {
        return Ok(Reference::NotFound);
    };
    let links = links
        .as_array()
        .ok_or_else(|| "links field is not an array".to_string())?;

    match links.first() {
        None => Ok(Reference::NotFound),
        Some(Value::String(link)) if link.trim().is_empty() => Ok(Reference::NotFound),
        Some(Value::String(link)) => Ok(Reference::Found(link.clone())),
        Some(other) => Err(format!("unexpected link value: {}", other)),
    }
}
