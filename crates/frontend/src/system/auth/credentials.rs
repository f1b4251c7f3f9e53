use gloo_net::http::RequestBuilder;

use super::storage;

/// How a request proves access
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiCredentials {
    /// Unauthenticated share link with an api key
    ApiKey(String),
    /// Logged-in user
    Bearer(String),
    #[default]
    Anonymous,
}

impl ApiCredentials {
    /// Api key when given (embed pages), otherwise the stored access token
    pub fn resolve(api_key: Option<String>) -> Self {
        match api_key.filter(|k| !k.is_empty()) {
            Some(key) => ApiCredentials::ApiKey(key),
            None => storage::get_access_token()
                .map(ApiCredentials::Bearer)
                .unwrap_or_default(),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        match self {
            ApiCredentials::ApiKey(key) => Some(key.as_str()),
            _ => None,
        }
    }

    /// Appends `api_key` to a relative path when credentials carry one
    pub fn with_api_key(&self, path: &str) -> String {
        match self.api_key() {
            Some(key) => {
                let separator = if path.contains('?') { '&' } else { '?' };
                format!("{}{}api_key={}", path, separator, urlencoding::encode(key))
            }
            None => path.to_string(),
        }
    }

    /// Adds the authorization and CSRF headers
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match self {
            ApiCredentials::Bearer(token) => {
                request.header("Authorization", &format!("Bearer {}", token))
            }
            _ => request,
        };
        match storage::get_csrf_token() {
            Some(csrf) => request.header("X-CSRF-TOKEN", &csrf),
            None => request,
        }
    }
}
