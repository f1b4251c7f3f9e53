use chrono::{DateTime, Utc};
use contracts::shared::query::QueryResult;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};

use super::api;
use crate::shared::date_utils;
use crate::system::auth::ApiCredentials;

/// Result, progress and error of query executions started from one page.
///
/// A refresh supersedes the one before it: only the latest execution may
/// write its outcome.
#[derive(Clone, Copy)]
pub struct QueryExecution {
    result: RwSignal<Option<QueryResult>>,
    executing: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    started_at: RwSignal<Option<DateTime<Utc>>>,
    generation: StoredValue<u64>,
    credentials: StoredValue<ApiCredentials>,
}

impl QueryExecution {
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            result: RwSignal::new(None),
            executing: RwSignal::new(false),
            error: RwSignal::new(None),
            started_at: RwSignal::new(None),
            generation: StoredValue::new(0),
            credentials: StoredValue::new(credentials),
        }
    }

    pub fn result(&self) -> Signal<Option<QueryResult>> {
        self.result.into()
    }

    pub fn executing(&self) -> Signal<bool> {
        self.executing.into()
    }

    pub fn error(&self) -> Signal<Option<String>> {
        self.error.into()
    }

    pub fn started_at(&self) -> Signal<Option<DateTime<Utc>>> {
        self.started_at.into()
    }

    pub fn has_data(&self) -> Signal<bool> {
        let result = self.result;
        Signal::derive(move || result.with(|r| r.as_ref().is_some_and(QueryResult::has_data)))
    }

    /// Runs the query with applied parameter values
    pub fn refresh(&self, query_id: i64, parameters: Map<String, Value>) {
        let generation = self.generation.get_value() + 1;
        self.generation.set_value(generation);
        self.executing.set(true);
        self.error.set(None);
        self.started_at.set(Some(date_utils::now()));
        log::debug!("[QueryExecution] query {} run #{}", query_id, generation);

        let this = *self;
        let credentials = self.credentials.get_value();
        spawn_local(async move {
            let outcome = api::execute_query(query_id, parameters, &credentials).await;
            if this.generation.try_get_value() != Some(generation) {
                log::debug!("[QueryExecution] run #{} superseded", generation);
                return;
            }
            match outcome {
                Ok(result) => this.result.set(Some(result)),
                Err(e) => {
                    log::error!("[QueryExecution] query {} failed: {}", query_id, e);
                    this.error.set(Some(e));
                }
            }
            this.executing.set(false);
        });
    }
}
