//! Depot mapping table (zone / region / division / depot)

use serde::{Deserialize, Serialize};

/// One row of the depot mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRow {
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub division: String,
    #[serde(default, rename = "depotname")]
    pub depot: String,
}

impl FilterRow {
    pub fn new(zone: &str, region: &str, division: &str, depot: &str) -> Self {
        Self {
            zone: zone.to_string(),
            region: region.to_string(),
            division: division.to_string(),
            depot: depot.to_string(),
        }
    }
}

/// Mapping payload in the shape the mapping API returns it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterMappingResponse {
    pub data: Vec<FilterRow>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl FilterMappingResponse {
    /// Rows to build the cache from. A payload that carries errors is still
    /// usable for the rows it does have.
    pub fn into_rows(self) -> (Vec<FilterRow>, Option<serde_json::Value>) {
        (self.data, self.errors.filter(|e| !e.is_null()))
    }
}

/// Built-in depot mapping as a mapping payload
pub fn builtin_mapping() -> FilterMappingResponse {
    FilterMappingResponse {
        data: builtin_rows(),
        errors: None,
    }
}

/// Built-in depot mapping
pub fn builtin_rows() -> Vec<FilterRow> {
    BUILTIN_ROWS
        .iter()
        .map(|(zone, region, division, depot)| FilterRow::new(zone, region, division, depot))
        .collect()
}

// (zone, region, division, depot)
const BUILTIN_ROWS: &[(&str, &str, &str, &str)] = &[
    ("HYDERABAD", "NALGONDA", "DYRM-NLG", "Yadagirigutta Depot"),
    ("KARIMNAGAR", "KHAMMAM", "DYRM-KMM", "Yellandu Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-CRMR", "Kacheguda Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-SD", "Chengicharla Depot"),
    ("KARIMNAGAR", "NIZAMABAD", "DYRM-NZB", "Armoor Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-HYT", "Bandlaguda(Nagole) Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-KP", "Jeedimetla Depot"),
    ("KARIMNAGAR", "NIZAMABAD", "DYRM-NZB", "Nizamabad-Ii Depot"),
    ("HYDERABAD", "RANGAREDDY", "DYRM-RR", "Bhel Depot"),
    ("HYDERABAD", "RANGAREDDY", "DYRM-RR", "Vikarabad Depot"),
    ("KARIMNAGAR", "KHAMMAM", "DYRM-KMM", "Khammam Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Warangal-I Depot"),
    ("HYDERABAD", "MEDAK", "DYRM-MDK", "Siddipet Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Narsampet Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Manthani Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-CRMR", "Barkatpura Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Mahaboobnagar Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-CRMR", "Mushirabad-II Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Mahaboobabad Depot"),
    ("HYDERABAD", "RANGAREDDY", "DYRM-RR", "Tandur Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Shadnagar Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-CRMR", "Farooqnagar Depot"),
    ("KARIMNAGAR", "NIZAMABAD", "DYRM-NZB", "Banswada Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Narayanpet Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-KP", "Medchal Depot"),
    ("HYDERABAD", "NALGONDA", "DYRM-NLG", "Narketpally Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Nagarkurnool Depot"),
    ("HYDERABAD", "RANGAREDDY", "DYRM-RR", "Picket Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Warangal-Ii Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Janagaon Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-HYT", "Ibrahimpatnam (Hyd) Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-CRMR", "Mehdipatnam Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Huzurabad Depot"),
    ("KARIMNAGAR", "KHAMMAM", "DYRM-KMM", "Manugur Depot"),
    ("KARIMNAGAR", "KHAMMAM", "DYRM-KMM", "Kothagudem Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-SD", "Hakeempet Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-HYT", "Hayatnagar-II Depot"),
    ("KARIMNAGAR", "NIZAMABAD", "DYRM-NZB", "Nizamabad-I Depot"),
    ("HYDERABAD", "NALGONDA", "DYRM-NLG", "Suryapet Depot"),
    ("HYDERABAD", "NALGONDA", "DYRM-NLG", "Kodad Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-SD", "Ranigunj-I Depot"),
    ("HYDERABAD", "NALGONDA", "DYRM-NLG", "Devarakonda Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Vemulawada Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Bhupalpally Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Kollapur Depot"),
    ("KARIMNAGAR", "ADILABAD", "DYRM-ADB", "Mancherial Depot"),
    ("KARIMNAGAR", "ADILABAD", "DYRM-ADB", "Bhainsa Depot"),
    ("HYDERABAD", "MEDAK", "DYRM-MDK", "Dubbaka Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Korutla Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Jagityal Depot"),
    ("HYDERABAD", "MEDAK", "DYRM-MDK", "Medak Depot"),
    ("HYDERABAD", "MEDAK", "DYRM-MDK", "Gajwel Pragnapur Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Gadwal Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Godavarikhani Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Sircilla Depot"),
    ("HYDERABAD", "NALGONDA", "DYRM-NLG", "Miryalguda Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-SD", "Kushaiguda Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-SD", "Contonment Depot"),
    ("KARIMNAGAR", "ADILABAD", "DYRM-ADB", "Nirmal Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Husnabad Depot"),
    ("HYDERABAD", "NALGONDA", "DYRM-NLG", "Nalgonda Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-CRMR", "Falaknuma Depot"),
    ("HYDERABAD", "RANGAREDDY", "DYRM-RR", "Miyapur-I Depot"),
    ("HYDERABAD", "MEDAK", "DYRM-MDK", "Narsapur Depot"),
    ("HYDERABAD", "MEDAK", "DYRM-MDK", "Zahirabad Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-HYT", "Dilsukhnagar Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-KP", "Hyd Central University Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-SD", "Uppal Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-HYT", "Maheshvaram Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Metpally Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Achampet Depot"),
    ("KARIMNAGAR", "NIZAMABAD", "DYRM-NZB", "Bodhan Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-KP", "Kukatpally Depot"),
    ("GR HYD ZONE", "SECUNDERABAD", "DVM-KP", "Miyapur-II Depot"),
    ("HYDERABAD", "RANGAREDDY", "DYRM-RR", "Hyderabad-Ii Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Karimnagar-2 Depot"),
    ("HYDERABAD", "RANGAREDDY", "DYRM-RR", "Hyderabad-I Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Wanaparthy Depot"),
    ("HYDERABAD", "MEDAK", "DYRM-MDK", "Narayanakhed Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-CRMR", "Rajendernagar Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Parkal Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Kosgi Depot"),
    ("KARIMNAGAR", "ADILABAD", "DYRM-ADB", "Adilabad Depot"),
    ("KARIMNAGAR", "KHAMMAM", "DYRM-KMM", "Sattupally Depot"),
    ("KARIMNAGAR", "KHAMMAM", "DYRM-KMM", "Madhira Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-HYT", "Midhani Depot"),
    ("KARIMNAGAR", "KARIMNAGAR", "DYRM-KRMR", "Karimnagar-1 Depot"),
    ("KARIMNAGAR", "KHAMMAM", "DYRM-KMM", "Bhadrachalam Depot"),
    ("HYDERABAD", "RANGAREDDY", "DYRM-RR", "Pargi Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Hanamakonda Depot"),
    ("KARIMNAGAR", "WARANGAL", "DYRM-WL", "Thorrur Depot"),
    ("KARIMNAGAR", "ADILABAD", "DYRM-ADB", "Asifabad Depot"),
    ("HYDERABAD", "MAHABUBNAGAR", "DYRM-MBNR", "Kalwakurthy Depot"),
    ("GR HYD ZONE", "HYDERABAD", "DVM-HYT", "Hayatnagar-I Depot"),
    ("KARIMNAGAR", "NIZAMABAD", "DYRM-NZB", "Kamareddy Depot"),
    ("KARIMNAGAR", "ADILABAD", "DYRM-ADB", "Utnoor Depot"),
    ("HYDERABAD", "MEDAK", "DYRM-MDK", "Sangareddy Depot"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rows_are_complete() {
        let rows = builtin_rows();
        assert_eq!(rows.len(), 97);
        assert!(rows
            .iter()
            .all(|r| !r.zone.is_empty() && !r.region.is_empty() && !r.depot.is_empty()));
    }

    #[test]
    fn test_deserialize_mapping_payload() {
        let payload: FilterMappingResponse = serde_json::from_str(
            r#"{"data":[{"zone":"HYDERABAD","region":"NALGONDA","division":"DYRM-NLG","depotname":"Kodad Depot"}],"errors":null}"#,
        )
        .unwrap();
        assert_eq!(
            payload.data,
            vec![FilterRow::new("HYDERABAD", "NALGONDA", "DYRM-NLG", "Kodad Depot")]
        );
        assert!(payload.errors.is_none());
    }

    #[test]
    fn test_mapping_with_errors_keeps_rows() {
        let payload: FilterMappingResponse = serde_json::from_str(
            r#"{"data":[{"zone":"HYDERABAD","region":"MEDAK","depotname":"Siddipet Depot"}],"errors":["division missing"]}"#,
        )
        .unwrap();
        let (rows, errors) = payload.into_rows();
        assert_eq!(rows, vec![FilterRow::new("HYDERABAD", "MEDAK", "", "Siddipet Depot")]);
        assert_eq!(errors, Some(serde_json::json!(["division missing"])));
    }

    #[test]
    fn test_builtin_mapping_has_no_errors() {
        let (rows, errors) = builtin_mapping().into_rows();
        assert_eq!(rows, builtin_rows());
        assert!(errors.is_none());
    }
}
