use super::FilterCache;
use crate::shared::parameters::{
    find_parameter, selected_values, values_differ, ParamValue, Parameter, SelectMode,
    SelectOption, SelectorState,
};

pub const ZONE_PARAM: &str = "TG_ZONE";
pub const REGION_PARAM: &str = "TG_REGION";
pub const DEPOT_PARAM: &str = "TG_DEPOT";

/// Level of the zone → region → depot cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoField {
    Zone,
    Region,
    Depot,
}

impl GeoField {
    pub fn from_param_name(name: &str) -> Option<Self> {
        match name {
            ZONE_PARAM => Some(GeoField::Zone),
            REGION_PARAM => Some(GeoField::Region),
            DEPOT_PARAM => Some(GeoField::Depot),
            _ => None,
        }
    }

    pub fn param_name(&self) -> &'static str {
        match self {
            GeoField::Zone => ZONE_PARAM,
            GeoField::Region => REGION_PARAM,
            GeoField::Depot => DEPOT_PARAM,
        }
    }
}

/// Upstream values a cascading field depends on (effective values)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CascadeInputs {
    pub zone: Option<ParamValue>,
    pub region: Option<ParamValue>,
}

impl CascadeInputs {
    pub fn from_parameters(parameters: &[Parameter]) -> Self {
        let effective = |name: &str| {
            find_parameter(parameters, name)
                .and_then(Parameter::effective_value)
                .cloned()
        };
        Self {
            zone: effective(ZONE_PARAM),
            region: effective(REGION_PARAM),
        }
    }

    /// Whether anything `field` depends on differs from `previous`
    pub fn changed_for(&self, field: GeoField, previous: &CascadeInputs) -> bool {
        let zone_changed = values_differ(previous.zone.as_ref(), self.zone.as_ref());
        let region_changed = values_differ(previous.region.as_ref(), self.region.as_ref());
        match field {
            GeoField::Zone => false,
            GeoField::Region => zone_changed,
            GeoField::Depot => zone_changed || region_changed,
        }
    }
}

impl FilterCache {
    /// Valid options of `field` given the upstream selections
    pub fn options_for(&self, field: GeoField, inputs: &CascadeInputs) -> Vec<SelectOption> {
        let zones = selected_values(inputs.zone.as_ref());
        match field {
            GeoField::Zone => self.zones().to_vec(),
            GeoField::Region => self.regions_for(&zones),
            GeoField::Depot => {
                let regions = selected_values(inputs.region.as_ref());
                self.depots_for(&zones, &regions)
            }
        }
    }
}

/// State of one cascading selector across prop changes
#[derive(Debug, Clone)]
pub struct CascadeSelectorState {
    pub field: GeoField,
    pub selector: SelectorState,
    last_inputs: Option<CascadeInputs>,
}

impl CascadeSelectorState {
    pub fn new(field: GeoField, mode: SelectMode) -> Self {
        Self {
            field,
            selector: SelectorState::new(mode),
            last_inputs: None,
        }
    }

    /// Recomputes options when mounted for the first time or when an upstream
    /// value changed, then reconciles `external`.
    ///
    /// Returns the corrected value to report upward, if any.
    pub fn refresh(
        &mut self,
        cache: &FilterCache,
        parameters: &[Parameter],
        external: Option<&ParamValue>,
    ) -> Option<Option<ParamValue>> {
        let inputs = CascadeInputs::from_parameters(parameters);
        let needs_options = match &self.last_inputs {
            None => true,
            Some(previous) => inputs.changed_for(self.field, previous),
        };
        if !needs_options {
            return None;
        }
        let options = cache.options_for(self.field, &inputs);
        self.last_inputs = Some(inputs);
        self.selector.set_options(options, external)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geo_filter::{builtin_rows, FilterRow};
    use crate::shared::parameters::ParameterKind;

    fn values(options: &[SelectOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    fn multi(values: &[&str]) -> ParamValue {
        ParamValue::Multi(values.iter().map(|v| v.to_string()).collect())
    }

    fn params(zone: Option<ParamValue>, region: Option<ParamValue>) -> Vec<Parameter> {
        let mut zone_param = Parameter::new(ZONE_PARAM, ParameterKind::ExternalApi);
        zone_param.value = zone;
        let mut region_param = Parameter::new(REGION_PARAM, ParameterKind::ExternalApi);
        region_param.value = region;
        vec![
            zone_param,
            region_param,
            Parameter::new(DEPOT_PARAM, ParameterKind::ExternalApi),
        ]
    }

    fn example_cache() -> FilterCache {
        FilterCache::build(&[
            FilterRow::new("HYDERABAD", "NALGONDA", "", "X"),
            FilterRow::new("HYDERABAD", "RANGAREDDY", "", "Y"),
        ])
    }

    #[test]
    fn test_worked_example_through_parameters() {
        let cache = example_cache();
        let inputs = CascadeInputs::from_parameters(&params(
            Some(ParamValue::from("HYDERABAD")),
            Some(ParamValue::from("NALGONDA")),
        ));
        assert_eq!(
            values(&cache.options_for(GeoField::Region, &inputs)),
            vec!["NALGONDA", "RANGAREDDY"]
        );
        assert_eq!(values(&cache.options_for(GeoField::Depot, &inputs)), vec!["X"]);
    }

    #[test]
    fn test_region_options_union_over_selected_zones() {
        let cache = FilterCache::build(&builtin_rows());
        let inputs = CascadeInputs {
            zone: Some(multi(&["GR HYD ZONE", "HYDERABAD"])),
            region: None,
        };
        assert_eq!(
            values(&cache.options_for(GeoField::Region, &inputs)),
            vec![
                "HYDERABAD",
                "SECUNDERABAD",
                "NALGONDA",
                "RANGAREDDY",
                "MEDAK",
                "MAHABUBNAGAR"
            ]
        );
    }

    #[test]
    fn test_depot_options_over_zone_region_product() {
        let cache = FilterCache::build(&[
            FilterRow::new("Z1", "R1", "", "a"),
            FilterRow::new("Z1", "R2", "", "b"),
            FilterRow::new("Z2", "R1", "", "c"),
            FilterRow::new("Z2", "R3", "", "a"),
        ]);
        let inputs = CascadeInputs {
            zone: Some(multi(&["Z1", "Z2"])),
            region: Some(multi(&["R1", "R3"])),
        };
        assert_eq!(values(&cache.options_for(GeoField::Depot, &inputs)), vec!["a", "c"]);

        let mixed = CascadeInputs {
            zone: Some(ParamValue::from("Z1")),
            region: Some(multi(&["R2"])),
        };
        assert_eq!(values(&cache.options_for(GeoField::Depot, &mixed)), vec!["b"]);
    }

    #[test]
    fn test_unset_upstream_yields_no_options() {
        let cache = example_cache();
        let unset = CascadeInputs::default();
        assert!(cache.options_for(GeoField::Region, &unset).is_empty());
        assert!(cache.options_for(GeoField::Depot, &unset).is_empty());
        assert_eq!(values(&cache.options_for(GeoField::Zone, &unset)), vec!["HYDERABAD"]);

        let empty_list = CascadeInputs {
            zone: Some(multi(&[])),
            region: None,
        };
        assert!(cache.options_for(GeoField::Region, &empty_list).is_empty());
    }

    #[test]
    fn test_pending_zone_drives_region_options() {
        let cache = example_cache();
        let mut parameters = params(Some(ParamValue::from("ELSEWHERE")), None);
        parameters[0].set_pending(Some(ParamValue::from("HYDERABAD")));

        let mut region = CascadeSelectorState::new(GeoField::Region, SelectMode::Single);
        let report = region.refresh(&cache, &parameters, None);
        assert_eq!(report, Some(Some(ParamValue::from("NALGONDA"))));
        assert_eq!(values(&region.selector.options), vec!["NALGONDA", "RANGAREDDY"]);
    }

    #[test]
    fn test_zone_without_regions_clears_region_and_depot() {
        let cache = FilterCache::build(&[
            FilterRow::new("HYDERABAD", "NALGONDA", "", "X"),
            FilterRow::new("EMPTY", "", "", ""),
        ]);
        let mut parameters = params(
            Some(ParamValue::from("HYDERABAD")),
            Some(ParamValue::from("NALGONDA")),
        );
        parameters[2].value = Some(ParamValue::from("X"));

        let mut region = CascadeSelectorState::new(GeoField::Region, SelectMode::Single);
        let mut depot = CascadeSelectorState::new(GeoField::Depot, SelectMode::Single);
        assert_eq!(region.refresh(&cache, &parameters, parameters[1].value.as_ref()), None);
        assert_eq!(depot.refresh(&cache, &parameters, parameters[2].value.as_ref()), None);

        parameters[0].set_pending(Some(ParamValue::from("EMPTY")));

        let region_report = region.refresh(&cache, &parameters, parameters[1].effective_value());
        assert!(region.selector.options.is_empty());
        assert_eq!(region_report, Some(None));
        parameters[1].set_pending(None);

        let depot_report = depot.refresh(&cache, &parameters, parameters[2].effective_value());
        assert!(depot.selector.options.is_empty());
        assert_eq!(depot_report, Some(None));
    }

    #[test]
    fn test_refresh_skips_when_upstream_unchanged() {
        let cache = FilterCache::build(&builtin_rows());
        let parameters = params(Some(multi(&["KARIMNAGAR", "HYDERABAD"])), None);
        let mut region = CascadeSelectorState::new(GeoField::Region, SelectMode::Multiple);
        region.refresh(&cache, &parameters, None);
        let options = region.selector.options.clone();

        // same set, different order
        let reordered = params(Some(multi(&["HYDERABAD", "KARIMNAGAR"])), None);
        assert_eq!(region.refresh(&cache, &reordered, Some(&multi(&[]))), None);
        assert_eq!(region.selector.options, options);
    }

    #[test]
    fn test_zone_field_ignores_upstream() {
        let cache = example_cache();
        let mut zone = CascadeSelectorState::new(GeoField::Zone, SelectMode::Single);
        let current = ParamValue::from("HYDERABAD");
        assert_eq!(zone.refresh(&cache, &params(Some(current.clone()), None), Some(&current)), None);
        assert_eq!(zone.refresh(&cache, &params(None, None), Some(&current)), None);
    }
}
