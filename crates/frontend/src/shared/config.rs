//! Client configuration
//!
//! Deployment switches read once at startup. Missing keys keep the defaults.

use leptos::prelude::*;
use web_sys::window;

const DISABLE_PUBLIC_URLS_KEY: &str = "client_disable_public_urls";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientConfig {
    /// Hides "Embed Elsewhere"
    pub disable_public_urls: bool,
}

impl ClientConfig {
    pub fn load() -> Self {
        let disable_public_urls = window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(DISABLE_PUBLIC_URLS_KEY).ok().flatten())
            .map(|raw| parse_flag(&raw))
            .unwrap_or_default();
        Self {
            disable_public_urls,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

pub fn provide_client_config() {
    let config = ClientConfig::load();
    log::debug!("Client config: {:?}", config);
    provide_context(config);
}

pub fn use_client_config() -> ClientConfig {
    use_context::<ClientConfig>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
