use std::collections::{HashMap, HashSet};

use super::FilterRow;
use crate::shared::parameters::SelectOption;

/// Lookup tables derived once from the depot mapping.
///
/// Every region listed under a zone co-occurs with it in some row, and every
/// depot listed under (zone, region) co-occurs with that pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCache {
    zones: Vec<SelectOption>,
    regions_by_zone: HashMap<String, Vec<SelectOption>>,
    depots_by_zone_region: HashMap<String, HashMap<String, Vec<SelectOption>>>,
}

impl FilterCache {
    /// Groups rows into zone → regions → depots, preserving first-seen order.
    /// Empty values are skipped.
    pub fn build(rows: &[FilterRow]) -> Self {
        let mut cache = Self::default();

        for row in rows {
            if row.zone.is_empty() {
                continue;
            }
            push_unique(&mut cache.zones, &row.zone);

            let regions = cache.regions_by_zone.entry(row.zone.clone()).or_default();
            if row.region.is_empty() {
                continue;
            }
            push_unique(regions, &row.region);

            let depots = cache
                .depots_by_zone_region
                .entry(row.zone.clone())
                .or_default()
                .entry(row.region.clone())
                .or_default();
            if !row.depot.is_empty() {
                push_unique(depots, &row.depot);
            }
        }

        cache
    }

    pub fn zones(&self) -> &[SelectOption] {
        &self.zones
    }

    /// Regions of one zone; empty for an unknown zone
    pub fn regions(&self, zone: &str) -> &[SelectOption] {
        self.regions_by_zone
            .get(zone)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Depots of one (zone, region) pair; empty for an unknown pair
    pub fn depots(&self, zone: &str, region: &str) -> &[SelectOption] {
        self.depots_by_zone_region
            .get(zone)
            .and_then(|regions| regions.get(region))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Union of the regions of every given zone, deduplicated by value
    pub fn regions_for(&self, zones: &[&str]) -> Vec<SelectOption> {
        union(zones.iter().map(|zone| self.regions(zone)))
    }

    /// Union of the depots over zones × regions, deduplicated by value
    pub fn depots_for(&self, zones: &[&str], regions: &[&str]) -> Vec<SelectOption> {
        union(
            zones
                .iter()
                .flat_map(|zone| regions.iter().map(move |region| self.depots(zone, region))),
        )
    }
}

fn push_unique(options: &mut Vec<SelectOption>, value: &str) {
    if !options.iter().any(|o| o.value == value) {
        options.push(SelectOption::plain(value));
    }
}

/// First-seen representative wins
fn union<'a>(lists: impl Iterator<Item = &'a [SelectOption]>) -> Vec<SelectOption> {
    let mut seen = HashSet::new();
    lists
        .flatten()
        .filter(|option| seen.insert(option.value.clone()))
        .cloned()
        .collect()
}
