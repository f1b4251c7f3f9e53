//! Query parameters: definitions, values and option selection
//!
//! ## Structure
//! - `value` - `ParamValue` (scalar or list) and the upstream change predicate
//! - `reconcile` - selection repair against a fresh option list, "Select All"
//! - `selector` - per-selector derived state (`SelectorState`)
//! - `query_options` - async option loading with stale-response tracking

pub mod query_options;
pub mod reconcile;
pub mod selector;
pub mod value;

pub use query_options::*;
pub use reconcile::*;
pub use selector::*;
pub use value::*;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display/value pair offered by a selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    pub value: String,
}

impl SelectOption {
    /// Option whose label equals its value
    pub fn plain(value: &str) -> Self {
        Self {
            name: value.to_string(),
            value: value.to_string(),
        }
    }
}

/// Row of `GET /api/queries/{id}/dropdown`; names and values may be numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownValue {
    pub name: Value,
    pub value: Value,
}

impl DropdownValue {
    pub fn into_option(self) -> SelectOption {
        let text = |v: Value| match v {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        SelectOption {
            name: text(self.name),
            value: text(self.value),
        }
    }
}

/// Selector mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    #[default]
    Single,
    Multiple,
}

/// Settings of a multi-value parameter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MultiValuesOptions {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    ",".to_string()
}

/// Kind of a parameter input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterKind {
    Text,
    Number,
    /// Static list, one option per line
    Enum {
        #[serde(default, rename = "enumOptions")]
        enum_options: String,
    },
    /// Options come from another query's result
    Query {
        #[serde(rename = "queryId")]
        query_id: i64,
    },
    /// Geographic cascade (zone / region / depot), resolved from the filter cache
    ExternalApi,
    #[serde(other)]
    Other,
}

/// Query parameter as delivered with the query definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(flatten)]
    pub kind: ParameterKind,

    /// Applied value (used for execution)
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub value: Option<ParamValue>,

    /// Edited but not yet applied value
    #[serde(
        default,
        rename = "pendingValue",
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub pending_value: Option<ParamValue>,

    #[serde(
        default,
        rename = "multiValuesOptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub multi_values_options: Option<MultiValuesOptions>,
}

impl Parameter {
    pub fn new(name: &str, kind: ParameterKind) -> Self {
        Self {
            name: name.to_string(),
            title: name.to_string(),
            kind,
            value: None,
            pending_value: None,
            multi_values_options: None,
        }
    }

    pub fn with_value(mut self, value: ParamValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multi_values_options = Some(MultiValuesOptions {
            separator: default_separator(),
            ..Default::default()
        });
        self
    }

    pub fn mode(&self) -> SelectMode {
        if self.multi_values_options.is_some() {
            SelectMode::Multiple
        } else {
            SelectMode::Single
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    /// Pending value when present, otherwise the applied value.
    ///
    /// Cascading selectors read this so dependants react before "Apply".
    pub fn effective_value(&self) -> Option<&ParamValue> {
        self.pending_value.as_ref().or(self.value.as_ref())
    }

    /// Records an edit. Editing back to the applied value clears the pending state.
    pub fn set_pending(&mut self, value: Option<ParamValue>) {
        if value == self.value {
            self.pending_value = None;
            return;
        }
        self.pending_value = Some(value.unwrap_or_else(|| match self.mode() {
            SelectMode::Single => ParamValue::Single(String::new()),
            SelectMode::Multiple => ParamValue::Multi(vec![]),
        }));
    }

    pub fn has_pending(&self) -> bool {
        self.pending_value.is_some()
    }

    /// Moves the pending value into `value`
    pub fn apply_pending(&mut self) -> bool {
        match self.pending_value.take() {
            Some(pending) => {
                self.value = pending.is_set().then_some(pending);
                true
            }
            None => false,
        }
    }

    /// Static options of an `enum` parameter
    pub fn enum_values(&self) -> Vec<SelectOption> {
        match &self.kind {
            ParameterKind::Enum { enum_options } => enum_options
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(SelectOption::plain)
                .collect(),
            _ => vec![],
        }
    }
}

/// Find a parameter by name
pub fn find_parameter<'a>(parameters: &'a [Parameter], name: &str) -> Option<&'a Parameter> {
    parameters.iter().find(|p| p.name == name)
}

/// Applied values keyed by parameter name, as sent to execution and download endpoints.
///
/// Unset parameters are omitted; pending edits are ignored.
pub fn execution_values(parameters: &[Parameter]) -> Map<String, Value> {
    parameters
        .iter()
        .filter_map(|p| {
            let value = p.value.as_ref().filter(|v| v.is_set())?;
            let json = match value {
                ParamValue::Single(v) => Value::String(v.clone()),
                ParamValue::Multi(values) => {
                    Value::Array(values.iter().cloned().map(Value::String).collect())
                }
            };
            Some((p.name.clone(), json))
        })
        .collect()
}

/// Whether any parameter carries an unapplied edit
pub fn has_pending_values(parameters: &[Parameter]) -> bool {
    parameters.iter().any(Parameter::has_pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pending_value_takes_precedence() {
        let mut p = Parameter::new("TG_ZONE", ParameterKind::ExternalApi)
            .with_value(ParamValue::from("HYDERABAD"));
        assert_eq!(p.effective_value(), Some(&ParamValue::from("HYDERABAD")));

        p.set_pending(Some(ParamValue::from("KARIMNAGAR")));
        assert_eq!(p.effective_value(), Some(&ParamValue::from("KARIMNAGAR")));
        assert_eq!(p.value, Some(ParamValue::from("HYDERABAD")));

        p.set_pending(Some(ParamValue::from("HYDERABAD")));
        assert!(!p.has_pending());
    }

    #[test]
    fn test_apply_pending() {
        let mut p = Parameter::new("TG_REGION", ParameterKind::ExternalApi)
            .with_value(ParamValue::from("NALGONDA"));
        p.set_pending(None);
        assert_eq!(p.effective_value(), Some(&ParamValue::from("")));
        assert!(p.apply_pending());
        assert_eq!(p.value, None);
        assert!(!p.apply_pending());
    }

    #[test]
    fn test_execution_values_use_applied_values() {
        let mut zone = Parameter::new("TG_ZONE", ParameterKind::ExternalApi)
            .multiple()
            .with_value(ParamValue::Multi(vec!["HYDERABAD".into()]));
        zone.set_pending(Some(ParamValue::Multi(vec!["KARIMNAGAR".into()])));
        let empty = Parameter::new("TG_DEPOT", ParameterKind::ExternalApi);

        let values = execution_values(&[zone, empty]);
        assert_eq!(Value::Object(values), json!({ "TG_ZONE": ["HYDERABAD"] }));
    }

    #[test]
    fn test_deserialize_query_parameter() {
        let p: Parameter = serde_json::from_value(json!({
            "name": "city",
            "title": "City",
            "type": "query",
            "queryId": 42,
            "value": ["a", "b"],
            "multiValuesOptions": { "prefix": "'", "suffix": "'", "separator": "," }
        }))
        .unwrap();
        assert_eq!(p.kind, ParameterKind::Query { query_id: 42 });
        assert_eq!(p.mode(), SelectMode::Multiple);
        assert_eq!(p.value, Some(ParamValue::Multi(vec!["a".into(), "b".into()])));
    }

    #[test]
    fn test_dropdown_values_become_text_options() {
        let rows: Vec<DropdownValue> =
            serde_json::from_value(json!([{ "name": "Kodad", "value": 17 }, { "name": 2, "value": "b" }]))
                .unwrap();
        let options: Vec<SelectOption> = rows.into_iter().map(DropdownValue::into_option).collect();
        assert_eq!(
            options,
            vec![
                SelectOption { name: "Kodad".into(), value: "17".into() },
                SelectOption { name: "2".into(), value: "b".into() },
            ]
        );
    }

    #[test]
    fn test_unknown_kind_and_enum_options() {
        let date: Parameter =
            serde_json::from_value(json!({ "name": "d", "type": "date" })).unwrap();
        assert_eq!(date.kind, ParameterKind::Other);

        let status: Parameter = serde_json::from_value(json!({
            "name": "status",
            "type": "enum",
            "enumOptions": "open\nclosed\n\n"
        }))
        .unwrap();
        let values: Vec<String> = status.enum_values().into_iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["open", "closed"]);
    }
}
