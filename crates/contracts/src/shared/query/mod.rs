//! Query definitions, visualizations and results

pub mod result;

pub use result::*;

use serde::{Deserialize, Serialize};

use crate::shared::parameters::Parameter;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// Visualization attached to a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Saved query as returned by `GET /api/queries/{id}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    /// 0 for a query that has not been saved yet
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub options: QueryOptions,
    #[serde(default)]
    pub visualizations: Vec<Visualization>,
    /// Key for unauthenticated share links
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Query {
    pub fn is_new(&self) -> bool {
        self.id <= 0
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.options.parameters
    }

    pub fn has_parameters(&self) -> bool {
        !self.options.parameters.is_empty()
    }

    pub fn find_visualization(&self, id: i64) -> Option<&Visualization> {
        self.visualizations.iter().find(|v| v.id == id)
    }

    /// Relative link to the query page
    pub fn url(&self) -> String {
        format!("/queries/{}", self.id)
    }

    /// Public embed link of a visualization, `None` without an api key
    pub fn embed_url(&self, origin: &str, visualization_id: i64) -> Option<String> {
        let key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
        Some(format!(
            "{}/embed/query/{}/visualization/{}?api_key={}",
            origin.trim_end_matches('/'),
            self.id,
            visualization_id,
            urlencoding::encode(key)
        ))
    }

    /// "Add to Dashboard" is offered for saved queries unless archived as a draft
    pub fn can_add_to_dashboard(&self) -> bool {
        !self.is_new() && (!self.is_draft || !self.is_archived)
    }

    /// Base name for downloaded files
    pub fn download_basename(&self) -> String {
        if self.name.is_empty() {
            format!("query_{}", self.id)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::parameters::{ParamValue, ParameterKind};
    use serde_json::json;

    #[test]
    fn test_deserialize_query_with_parameters() {
        let query: Query = serde_json::from_value(json!({
            "id": 12,
            "name": "Depot revenue",
            "description": null,
            "is_draft": false,
            "is_archived": false,
            "options": {
                "parameters": [
                    { "name": "TG_ZONE", "title": "Zone", "type": "external_api", "value": "HYDERABAD" }
                ]
            },
            "visualizations": [
                { "id": 5, "name": "Table", "type": "TABLE" },
                { "id": 6, "name": "Chart", "type": "CHART", "description": "" }
            ]
        }))
        .unwrap();
        assert!(query.has_parameters());
        assert_eq!(query.find_visualization(6).map(|v| v.name.as_str()), Some("Chart"));
        assert!(query.find_visualization(7).is_none());
        assert_eq!(query.url(), "/queries/12");
    }

    #[test]
    fn test_query_loads_with_non_text_parameter_values() {
        let query: Query = serde_json::from_value(json!({
            "id": 31,
            "name": "Trips",
            "options": {
                "parameters": [
                    { "name": "limit", "type": "number", "value": 10 },
                    { "name": "route", "type": "query", "queryId": 4, "value": [101, 102],
                      "multiValuesOptions": {} },
                    { "name": "period", "type": "date-range",
                      "value": { "start": "2024-01-01", "end": "2024-01-31" } },
                    { "name": "active", "type": "enum", "value": true, "enumOptions": "true\nfalse" }
                ]
            }
        }))
        .unwrap();

        let params = query.parameters();
        assert_eq!(params[0].value, Some(ParamValue::from("10")));
        assert_eq!(
            params[1].value,
            Some(ParamValue::Multi(vec!["101".into(), "102".into()]))
        );
        assert_eq!(params[2].kind, ParameterKind::Other);
        assert_eq!(params[2].value, None);
        assert_eq!(params[3].value, Some(ParamValue::from("true")));
    }

    #[test]
    fn test_add_to_dashboard_rules() {
        let mut query = Query {
            id: 1,
            ..Default::default()
        };
        assert!(query.can_add_to_dashboard());
        query.is_draft = true;
        assert!(query.can_add_to_dashboard());
        query.is_archived = true;
        assert!(!query.can_add_to_dashboard());
        assert!(!Query::default().can_add_to_dashboard());
    }

    #[test]
    fn test_embed_url() {
        let mut query = Query {
            id: 12,
            ..Default::default()
        };
        assert_eq!(query.embed_url("https://bi.example", 5), None);
        query.api_key = Some("k3y".into());
        assert_eq!(
            query.embed_url("https://bi.example/", 5).as_deref(),
            Some("https://bi.example/embed/query/12/visualization/5?api_key=k3y")
        );
    }

    #[test]
    fn test_download_basename_falls_back_to_id() {
        let query = Query {
            id: 9,
            ..Default::default()
        };
        assert_eq!(query.download_basename(), "query_9");
    }
}
