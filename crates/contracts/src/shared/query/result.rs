use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Column {
    pub fn title(&self) -> &str {
        self.friendly_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResultData {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub id: i64,
    pub retrieved_at: DateTime<Utc>,
    #[serde(default)]
    pub data: QueryResultData,
}

impl QueryResult {
    /// Export is only offered when there is something to export
    pub fn has_data(&self) -> bool {
        !self.data.columns.is_empty()
    }

    /// Cell text for tabular rendering
    pub fn cell_text(row: &Map<String, Value>, column: &str) -> String {
        match row.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecuteQueryRequest {
    pub parameters: Map<String, Value>,
    /// 0 forces a fresh execution
    pub max_age: i64,
}

/// Execution job status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Started,
    Success,
    Failure,
    Cancelled,
}

impl JobStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(JobStatus::Pending),
            2 => Some(JobStatus::Started),
            3 => Some(JobStatus::Success),
            4 => Some(JobStatus::Failure),
            5 => Some(JobStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobStatus::Success | JobStatus::Failure | JobStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: i32,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub query_result_id: Option<i64>,
}

impl Job {
    pub fn status(&self) -> Option<JobStatus> {
        JobStatus::from_code(self.status)
    }

    /// Terminal outcome of the job: the result id on success, the error text
    /// otherwise. `None` while the job is still running.
    pub fn outcome(&self) -> Option<Result<i64, String>> {
        let status = self.status().filter(JobStatus::is_finished)?;
        Some(match status {
            JobStatus::Success => self
                .query_result_id
                .ok_or_else(|| "Job finished without a result".to_string()),
            JobStatus::Cancelled => Err("Query execution cancelled".to_string()),
            _ => Err(self
                .error
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "Query execution failed".to_string())),
        })
    }
}

/// `POST /api/queries/{id}/results` answers with a cached result or a job to poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecuteQueryResponse {
    Result { query_result: QueryResult },
    Job { job: Job },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResultResponse {
    pub query_result: QueryResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_execute_response_variants() {
        let cached: ExecuteQueryResponse = serde_json::from_value(json!({
            "query_result": {
                "id": 3,
                "retrieved_at": "2025-11-20T10:00:00Z",
                "data": { "columns": [{ "name": "depot", "type": "string" }], "rows": [{ "depot": "Kodad Depot" }] }
            }
        }))
        .unwrap();
        match cached {
            ExecuteQueryResponse::Result { query_result } => {
                assert!(query_result.has_data());
                assert_eq!(
                    QueryResult::cell_text(&query_result.data.rows[0], "depot"),
                    "Kodad Depot"
                );
            }
            other => panic!("unexpected {:?}", other),
        }

        let job: ExecuteQueryResponse = serde_json::from_value(json!({
            "job": { "id": "abc", "status": 1, "error": "", "query_result_id": null }
        }))
        .unwrap();
        match job {
            ExecuteQueryResponse::Job { job } => {
                assert_eq!(job.status(), Some(JobStatus::Pending));
                assert!(!JobStatus::Pending.is_finished());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_job_outcome() {
        let job = |status: i32, error: &str, result_id: Option<i64>| Job {
            id: "abc".to_string(),
            status,
            error: Some(error.to_string()),
            query_result_id: result_id,
        };

        assert_eq!(job(1, "", None).outcome(), None);
        assert_eq!(job(2, "", None).outcome(), None);
        assert_eq!(job(9, "", None).outcome(), None);
        assert_eq!(job(3, "", Some(7)).outcome(), Some(Ok(7)));
        assert_eq!(
            job(3, "", None).outcome(),
            Some(Err("Job finished without a result".to_string()))
        );
        assert_eq!(
            job(4, "relation \"depots\" does not exist", None).outcome(),
            Some(Err("relation \"depots\" does not exist".to_string()))
        );
        assert_eq!(
            job(4, "", None).outcome(),
            Some(Err("Query execution failed".to_string()))
        );
        assert_eq!(
            job(5, "", None).outcome(),
            Some(Err("Query execution cancelled".to_string()))
        );
    }

    #[test]
    fn test_cell_text() {
        let row = json!({ "n": 4, "s": "x", "z": null });
        let row = row.as_object().unwrap();
        assert_eq!(QueryResult::cell_text(row, "n"), "4");
        assert_eq!(QueryResult::cell_text(row, "s"), "x");
        assert_eq!(QueryResult::cell_text(row, "z"), "");
        assert_eq!(QueryResult::cell_text(row, "missing"), "");
    }
}
