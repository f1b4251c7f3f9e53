use serde::{Deserialize, Serialize};

use super::{is_all_selected, reconcile, toggle_select_all, ParamValue, SelectMode, SelectOption};

/// Derived state owned by one selector instance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectorState {
    pub mode: SelectMode,
    pub options: Vec<SelectOption>,
    pub value: Option<ParamValue>,
}

impl SelectorState {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Replaces the option list and reconciles the externally supplied value.
    ///
    /// Returns the corrected value when it differs from `external`; the caller
    /// reports it upward.
    pub fn set_options(
        &mut self,
        options: Vec<SelectOption>,
        external: Option<&ParamValue>,
    ) -> Option<Option<ParamValue>> {
        self.options = options;
        let reconciled = self.sync_value(external);
        (reconciled.as_ref() != external).then_some(reconciled)
    }

    /// Re-reconciles after the external value changed. Nothing is reported.
    pub fn sync_value(&mut self, external: Option<&ParamValue>) -> Option<ParamValue> {
        self.value = reconcile(external, &self.options, self.mode);
        self.value.clone()
    }

    /// Currently selected values as a list
    pub fn selected(&self) -> Vec<String> {
        self.value
            .as_ref()
            .map(|v| v.selected().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn is_all_selected(&self) -> bool {
        self.mode == SelectMode::Multiple && is_all_selected(&self.options, &self.selected())
    }

    /// Value to report after a "Select All" click; `None` in single mode
    pub fn select_all_toggled(&self) -> Option<ParamValue> {
        match self.mode {
            SelectMode::Multiple => Some(ParamValue::Multi(toggle_select_all(
                &self.options,
                &self.selected(),
            ))),
            SelectMode::Single => None,
        }
    }

    /// Options matching the search text, case-insensitive on label or value.
    ///
    /// In single mode the selected option stays listed so the select keeps
    /// showing it.
    pub fn visible_options(&self, search: &str) -> Vec<SelectOption> {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return self.options.clone();
        }
        let selected = match (&self.mode, &self.value) {
            (SelectMode::Single, Some(ParamValue::Single(v))) => Some(v.as_str()),
            _ => None,
        };
        self.options
            .iter()
            .filter(|o| {
                selected == Some(o.value.as_str())
                    || o.name.to_lowercase().contains(&needle)
                    || o.value.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Whether every listed option is selected
    pub fn is_all_selected_in(&self, visible: &[SelectOption]) -> bool {
        self.mode == SelectMode::Multiple && is_all_selected(visible, &self.selected())
    }

    /// "Select All" over the listed options only.
    ///
    /// Without a filter this is `select_all_toggled`. With one, selections
    /// hidden by the filter are kept.
    pub fn select_all_toggled_in(&self, visible: &[SelectOption]) -> Option<ParamValue> {
        if self.mode == SelectMode::Single {
            return None;
        }
        if visible.len() == self.options.len() {
            return self.select_all_toggled();
        }
        let mut selected = self.selected();
        if is_all_selected(visible, &selected) {
            selected.retain(|v| !visible.iter().any(|o| o.value == *v));
        } else {
            for option in visible {
                if !selected.contains(&option.value) {
                    selected.push(option.value.clone());
                }
            }
        }
        Some(ParamValue::Multi(selected))
    }

    /// Value to report after the user toggled one option
    pub fn with_option_toggled(&self, value: &str) -> Option<ParamValue> {
        match self.mode {
            SelectMode::Single => Some(ParamValue::Single(value.to_string())),
            SelectMode::Multiple => {
                let mut selected = self.selected();
                if let Some(pos) = selected.iter().position(|v| v == value) {
                    selected.remove(pos);
                } else {
                    selected.push(value.to_string());
                }
                Some(ParamValue::Multi(selected))
            }
        }
    }
}
