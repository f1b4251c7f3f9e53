use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Value of a query parameter: a single scalar or a multi-select list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// Selected values as a list. A scalar becomes a one-element list,
    /// empty strings are dropped.
    pub fn selected(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(v) if v.is_empty() => vec![],
            ParamValue::Single(v) => vec![v.as_str()],
            ParamValue::Multi(values) => values
                .iter()
                .filter(|v| !v.is_empty())
                .map(String::as_str)
                .collect(),
        }
    }

    /// Whether anything is actually selected
    pub fn is_set(&self) -> bool {
        !self.selected().is_empty()
    }

    /// Values as owned list (scalar coerced to a one-element list)
    pub fn into_list(self) -> Vec<String> {
        match self {
            ParamValue::Single(v) => vec![v],
            ParamValue::Multi(values) => values,
        }
    }

    /// Text shown in chips / logs
    pub fn display(&self) -> String {
        match self {
            ParamValue::Single(v) => v.clone(),
            ParamValue::Multi(values) => values.join(", "),
        }
    }
}

impl ParamValue {
    /// Reads a JSON parameter value. Numbers and booleans become text, list
    /// items without a scalar reading are dropped. Objects and `null` have no
    /// reading and give `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(ParamValue::Multi(
                items.iter().filter_map(scalar_text).collect(),
            )),
            other => scalar_text(other).map(ParamValue::Single),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        ParamValue::from_json(&raw)
            .ok_or_else(|| D::Error::custom(format!("unsupported parameter value: {}", raw)))
    }
}

/// Field deserializer for values delivered with a query definition.
///
/// Shapes this client does not edit (date ranges and the like) are read as
/// unset instead of failing the whole query.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<ParamValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(ParamValue::from_json))
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multi(values)
    }
}

/// Selected values of an optional parameter value
pub fn selected_values(value: Option<&ParamValue>) -> Vec<&str> {
    value.map(ParamValue::selected).unwrap_or_default()
}

/// Change predicate for upstream parameter values.
///
/// Two lists are compared as sorted sets, everything else by value.
pub fn values_differ(previous: Option<&ParamValue>, current: Option<&ParamValue>) -> bool {
    match (previous, current) {
        (Some(ParamValue::Multi(a)), Some(ParamValue::Multi(b))) => {
            let mut a: Vec<&String> = a.iter().collect();
            let mut b: Vec<&String> = b.iter().collect();
            a.sort();
            a.dedup();
            b.sort();
            b.dedup();
            a != b
        }
        (previous, current) => previous != current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi(values: &[&str]) -> ParamValue {
        ParamValue::Multi(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_arrays_compare_as_sorted_sets() {
        let a = multi(&["KARIMNAGAR", "HYDERABAD"]);
        let b = multi(&["HYDERABAD", "KARIMNAGAR"]);
        assert!(!values_differ(Some(&a), Some(&b)));
        assert!(values_differ(Some(&a), Some(&multi(&["HYDERABAD"]))));
    }

    #[test]
    fn test_scalars_compare_by_value() {
        let a = ParamValue::from("HYDERABAD");
        assert!(!values_differ(Some(&a), Some(&ParamValue::from("HYDERABAD"))));
        assert!(values_differ(Some(&a), None));
        assert!(values_differ(Some(&a), Some(&multi(&["HYDERABAD"]))));
        assert!(!values_differ(None, None));
    }

    #[test]
    fn test_empty_string_is_unset() {
        assert!(!ParamValue::from("").is_set());
        assert!(!multi(&[]).is_set());
        assert_eq!(multi(&["", "A"]).selected(), vec!["A"]);
    }

    #[test]
    fn test_untagged_json() {
        let single: ParamValue = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(single, ParamValue::from("A"));
        let many: ParamValue = serde_json::from_str("[\"A\",\"B\"]").unwrap();
        assert_eq!(many, multi(&["A", "B"]));
    }

    #[test]
    fn test_json_scalars_become_text() {
        let number: ParamValue = serde_json::from_str("10").unwrap();
        assert_eq!(number, ParamValue::from("10"));
        let flag: ParamValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, ParamValue::from("true"));
        let ids: ParamValue = serde_json::from_str("[1, 2.5, \"x\", null]").unwrap();
        assert_eq!(ids, multi(&["1", "2.5", "x"]));
        assert!(serde_json::from_str::<ParamValue>("{\"start\": \"2024-01-01\"}").is_err());
    }
}
