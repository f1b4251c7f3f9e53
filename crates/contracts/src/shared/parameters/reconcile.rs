use std::collections::HashSet;

use super::{ParamValue, SelectMode, SelectOption};

/// Repairs a selection against a fresh option list.
///
/// - `Multiple`: the value is coerced to a list and intersected with the option
///   values, keeping the input order (duplicates dropped). The result may be empty.
/// - `Single`: the value is kept when some option carries it, otherwise the first
///   option's value is taken, or nothing when there are no options.
pub fn reconcile(
    value: Option<&ParamValue>,
    options: &[SelectOption],
    mode: SelectMode,
) -> Option<ParamValue> {
    match mode {
        SelectMode::Multiple => {
            let valid: HashSet<&str> = options.iter().map(|o| o.value.as_str()).collect();
            let mut seen = HashSet::new();
            let kept = value
                .map(|v| v.clone().into_list())
                .unwrap_or_default()
                .into_iter()
                .filter(|v| valid.contains(v.as_str()) && seen.insert(v.clone()))
                .collect();
            Some(ParamValue::Multi(kept))
        }
        SelectMode::Single => {
            let found = match value {
                Some(ParamValue::Single(v)) => options.iter().any(|o| &o.value == v),
                _ => false,
            };
            if found {
                value.cloned()
            } else {
                options
                    .first()
                    .map(|o| ParamValue::Single(o.value.clone()))
            }
        }
    }
}

/// True when there is at least one option and every option value is selected
pub fn is_all_selected(options: &[SelectOption], selected: &[String]) -> bool {
    !options.is_empty() && options.iter().all(|o| selected.contains(&o.value))
}

/// "Select All" toggle over the options currently in scope.
///
/// Clears the selection when everything is already selected, otherwise selects
/// every visible option in option order.
pub fn toggle_select_all(options: &[SelectOption], selected: &[String]) -> Vec<String> {
    if is_all_selected(options, selected) {
        vec![]
    } else {
        options.iter().map(|o| o.value.clone()).collect()
    }
}
