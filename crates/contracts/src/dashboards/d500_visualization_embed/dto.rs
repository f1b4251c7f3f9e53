use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display switches of the embed page, read from the page URL.
///
/// Flags are presence-based: `?hide_header` and `?hide_header=false` both hide it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmbedOptions {
    pub hide_header: bool,
    pub hide_parameters: bool,
    pub hide_link: bool,
    pub hide_timestamp: bool,
    pub show_description: bool,
    pub api_key: Option<String>,
}

impl EmbedOptions {
    /// Parses `location.search` (leading `?` optional). An unparsable query
    /// string gives the defaults.
    pub fn from_query_string(search: &str) -> Self {
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        Self::from_params(&params)
    }

    fn from_params(params: &HashMap<String, String>) -> Self {
        let present = |key: &str| params.contains_key(key);
        Self {
            hide_header: present("hide_header"),
            hide_parameters: present("hide_parameters"),
            hide_link: present("hide_link"),
            hide_timestamp: present("hide_timestamp"),
            show_description: present("showDescription"),
            api_key: params.get("api_key").filter(|k| !k.is_empty()).cloned(),
        }
    }
}

/// Leading-digit integer parse for ids taken from the route
pub fn parse_route_id(raw: &str) -> Option<i64> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_presence_based() {
        let options =
            EmbedOptions::from_query_string("?hide_header&hide_link=false&showDescription=1&api_key=abc");
        assert!(options.hide_header);
        assert!(options.hide_link);
        assert!(options.show_description);
        assert!(!options.hide_parameters);
        assert!(!options.hide_timestamp);
        assert_eq!(options.api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_query_string() {
        assert_eq!(EmbedOptions::from_query_string(""), EmbedOptions::default());
        assert_eq!(EmbedOptions::from_query_string("?"), EmbedOptions::default());
    }

    #[test]
    fn test_api_key_is_decoded() {
        let options = EmbedOptions::from_query_string("api_key=a%2Bb&hide_parameters");
        assert_eq!(options.api_key.as_deref(), Some("a+b"));
        assert!(options.hide_parameters);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let options = EmbedOptions::from_query_string("?p_TG_ZONE=HYDERABAD&hide_timestamp=1&api_key=");
        assert!(options.hide_timestamp);
        assert!(!options.hide_header);
        assert_eq!(options.api_key, None);
    }

    #[test]
    fn test_parse_route_id() {
        assert_eq!(parse_route_id("42"), Some(42));
        assert_eq!(parse_route_id("42-depots"), Some(42));
        assert_eq!(parse_route_id("abc"), None);
    }
}
