//! API client for queries
//!
//! All calls take `ApiCredentials` so the same client serves logged-in pages
//! and api-key share links.

use contracts::shared::download::decode_error_message;
use contracts::shared::parameters::{DropdownValue, SelectOption};
use contracts::shared::query::{
    ExecuteQueryRequest, ExecuteQueryResponse, JobResponse, Query, QueryResult,
    QueryResultResponse,
};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::shared::api_utils::api_url;
use crate::system::auth::ApiCredentials;

const JOB_POLL_INTERVAL_MS: u32 = 1_000;
const JOB_POLL_LIMIT: u32 = 3_600;

// ============================================================================
// Helpers
// ============================================================================

/// Error text of a failed response: server `message` when present, else the status
async fn failure_text(response: Response) -> String {
    let status = response.status();
    let status_text = response.status_text();
    let body = response.binary().await.unwrap_or_default();
    decode_error_message(&body).unwrap_or_else(|| format!("{} {}", status, status_text))
}

async fn get_json<T: DeserializeOwned>(path: &str, credentials: &ApiCredentials) -> Result<T, String> {
    let url = api_url(&credentials.with_api_key(path));
    let response = credentials
        .apply(Request::get(&url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(failure_text(response).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

// ============================================================================
// Query API
// ============================================================================

/// Load a query definition with its parameters and visualizations
pub async fn get_query(id: i64, credentials: &ApiCredentials) -> Result<Query, String> {
    get_json(&format!("/api/queries/{}", id), credentials).await
}

/// Options of a query-driven parameter (rows of the source query)
pub async fn load_dropdown_values(
    query_id: i64,
    credentials: &ApiCredentials,
) -> Result<Vec<SelectOption>, String> {
    let rows: Vec<DropdownValue> =
        get_json(&format!("/api/queries/{}/dropdown", query_id), credentials).await?;
    Ok(rows.into_iter().map(DropdownValue::into_option).collect())
}

/// Execute a query with the given parameter values and wait for the result.
///
/// The server either answers with a cached result or with a job which is
/// polled until it finishes.
pub async fn execute_query(
    id: i64,
    parameters: Map<String, Value>,
    credentials: &ApiCredentials,
) -> Result<QueryResult, String> {
    let url = api_url(&credentials.with_api_key(&format!("/api/queries/{}/results", id)));
    let request = ExecuteQueryRequest {
        parameters,
        max_age: 0,
    };

    let response = credentials
        .apply(Request::post(&url))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(failure_text(response).await);
    }

    let started = response
        .json::<ExecuteQueryResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    let mut job = match started {
        ExecuteQueryResponse::Result { query_result } => return Ok(query_result),
        ExecuteQueryResponse::Job { job } => job,
    };

    for _ in 0..JOB_POLL_LIMIT {
        if let Some(outcome) = job.outcome() {
            let result_id = outcome?;
            let resp: QueryResultResponse =
                get_json(&format!("/api/query_results/{}", result_id), credentials).await?;
            return Ok(resp.query_result);
        }

        TimeoutFuture::new(JOB_POLL_INTERVAL_MS).await;
        let resp: JobResponse = get_json(&format!("/api/jobs/{}", job.id), credentials).await?;
        job = resp.job;
    }

    Err("Timed out waiting for query result".to_string())
}
