//! Options of a query-driven parameter, loaded asynchronously.
//!
//! Each fetch gets a `LoadTicket` carrying the key (query id) it was issued for
//! and a generation number. Only the ticket of the latest request for the
//! current key may mutate state; everything else is a stale response.

use serde::{Deserialize, Serialize};

use super::{ParamValue, SelectMode, SelectOption, SelectorState};

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub key: i64,
    generation: u64,
}

/// Result of feeding a finished fetch back into the state
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Superseded request; nothing changed
    Stale,
    /// Options stored. `report` holds the corrected value when it differs
    /// from the externally supplied one.
    Applied { report: Option<Option<ParamValue>> },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryOptionsState {
    pub selector: SelectorState,
    pub loading: bool,
    current_key: Option<i64>,
    generation: u64,
}

impl QueryOptionsState {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            selector: SelectorState::new(mode),
            ..Default::default()
        }
    }

    pub fn current_key(&self) -> Option<i64> {
        self.current_key
    }

    /// Called on mount and whenever the key changes.
    ///
    /// Returns a ticket when a fetch must be issued. An unset key supersedes any
    /// in-flight request without starting a new one.
    pub fn begin(&mut self, key: Option<i64>) -> Option<LoadTicket> {
        self.current_key = key;
        self.generation += 1;
        match key {
            Some(key) => {
                self.loading = true;
                Some(LoadTicket {
                    key,
                    generation: self.generation,
                })
            }
            None => {
                self.loading = false;
                None
            }
        }
    }

    /// Like `begin`, but only when the key differs from the one last requested.
    ///
    /// Reactive callers run this on every change of their inputs; re-reading
    /// the same key does not start another fetch.
    pub fn request(&mut self, key: Option<i64>) -> Option<LoadTicket> {
        if self.generation > 0 && self.current_key == key {
            return None;
        }
        self.begin(key)
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.current_key == Some(ticket.key) && self.generation == ticket.generation
    }

    /// Feeds fetched options back. Stale tickets leave the state untouched.
    pub fn complete(
        &mut self,
        ticket: &LoadTicket,
        options: Vec<SelectOption>,
        external: Option<&ParamValue>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        self.loading = false;
        let report = self.selector.set_options(options, external);
        LoadOutcome::Applied { report }
    }

    /// Marks a failed fetch. Returns whether the failure belongs to the current request.
    pub fn fail(&mut self, ticket: &LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<SelectOption> {
        values.iter().map(|v| SelectOption::plain(v)).collect()
    }

    #[test]
    fn test_request_skips_unchanged_key() {
        let mut state = QueryOptionsState::new(SelectMode::Multiple);
        let first = state.request(Some(7)).unwrap();
        assert!(state.loading);

        // inputs re-read while the same key is loading
        assert_eq!(state.request(Some(7)), None);
        assert_eq!(state.request(Some(7)), None);
        assert!(state.is_current(&first));

        state.complete(&first, options(&["a", "b"]), None);
        assert!(!state.loading);

        // and after it finished
        assert_eq!(state.request(Some(7)), None);
        assert!(!state.loading);

        let second = state.request(Some(8)).unwrap();
        assert_eq!(second.key, 8);
        assert!(!state.is_current(&first));
    }

    #[test]
    fn test_request_on_mount_with_unset_key() {
        let mut state = QueryOptionsState::new(SelectMode::Single);
        assert_eq!(state.request(None), None);
        assert!(!state.loading);
        assert_eq!(state.request(None), None);
        assert!(state.request(Some(3)).is_some());
    }

    #[test]
    fn test_latest_key_wins_when_older_resolves_last() {
        let mut state = QueryOptionsState::new(SelectMode::Single);
        let a = state.begin(Some(1)).unwrap();
        let b = state.begin(Some(2)).unwrap();

        assert!(matches!(
            state.complete(&b, options(&["b1", "b2"]), None),
            LoadOutcome::Applied { .. }
        ));
        assert_eq!(state.complete(&a, options(&["a1"]), None), LoadOutcome::Stale);

        assert_eq!(state.selector.options, options(&["b1", "b2"]));
        assert!(!state.loading);
    }

    #[test]
    fn test_latest_key_wins_when_older_resolves_first() {
        let mut state = QueryOptionsState::new(SelectMode::Single);
        let a = state.begin(Some(1)).unwrap();
        let b = state.begin(Some(2)).unwrap();

        assert_eq!(state.complete(&a, options(&["a1"]), None), LoadOutcome::Stale);
        assert!(state.loading);
        assert!(state.selector.options.is_empty());

        state.complete(&b, options(&["b1"]), None);
        assert_eq!(state.selector.options, options(&["b1"]));
    }

    #[test]
    fn test_refetch_of_same_key_supersedes_earlier_request() {
        let mut state = QueryOptionsState::new(SelectMode::Single);
        let first = state.begin(Some(7)).unwrap();
        let second = state.begin(Some(7)).unwrap();
        assert_eq!(state.complete(&first, options(&["old"]), None), LoadOutcome::Stale);
        state.complete(&second, options(&["new"]), None);
        assert_eq!(state.selector.options, options(&["new"]));
    }

    #[test]
    fn test_applied_reports_correction() {
        let mut state = QueryOptionsState::new(SelectMode::Single);
        let ticket = state.begin(Some(3)).unwrap();
        let current = ParamValue::from("gone");
        assert_eq!(
            state.complete(&ticket, options(&["x", "y"]), Some(&current)),
            LoadOutcome::Applied {
                report: Some(Some(ParamValue::from("x")))
            }
        );
    }

    #[test]
    fn test_unset_key_and_failures() {
        let mut state = QueryOptionsState::new(SelectMode::Multiple);
        let ticket = state.begin(Some(5)).unwrap();
        assert!(state.begin(None).is_none());
        assert!(!state.loading);
        assert!(!state.fail(&ticket));

        let ticket = state.begin(Some(5)).unwrap();
        assert!(state.fail(&ticket));
        assert!(!state.loading);
        assert!(state.selector.options.is_empty());
    }
}
