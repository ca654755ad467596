use std::net::IpAddr;

use axum::http::{header::COOKIE, HeaderMap};
use tracing::{debug, warn};

use crate::config::ApiConfig;

/// Same-origin proxy route, used when nothing else is configured.
pub const PROXY_PATH: &str = "/api/nutrition";

/// Cookie carrying the per-browser endpoint override.
pub const OVERRIDE_KEY: &str = "api_endpoint";

/// Picks the nutrition endpoint for one page request.
///
/// Precedence: stored override, then the deploy-time public endpoint, then
/// [`PROXY_PATH`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointResolver {
    stored_override: Option<String>,
    public_endpoint: Option<String>,
}

impl EndpointResolver {
    pub fn new(public_endpoint: Option<String>) -> Self {
        Self {
            stored_override: None,
            public_endpoint: non_empty(public_endpoint),
        }
    }

    pub fn with_override(mut self, stored: Option<String>) -> Self {
        self.stored_override = non_empty(stored);
        self
    }

    /// Resolver for a page request: config plus the `api_endpoint` cookie when
    /// overrides are allowed. The cookie must point at a loopback host.
    pub fn from_request(api: &ApiConfig, headers: &HeaderMap) -> Self {
        let resolver = Self::new(api.public_endpoint.clone());
        if !api.allow_endpoint_override {
            return resolver;
        }
        let stored = cookie_value(headers, OVERRIDE_KEY).filter(|endpoint| {
            let local = is_loopback_endpoint(endpoint);
            if local {
                debug!(%endpoint, "using endpoint override from cookie");
            } else {
                warn!(%endpoint, "ignoring non-loopback endpoint override");
            }
            local
        });
        resolver.with_override(stored)
    }

    pub fn resolve_endpoint(&self) -> &str {
        self.stored_override
            .as_deref()
            .or(self.public_endpoint.as_deref())
            .unwrap_or(PROXY_PATH)
    }

    pub fn is_same_origin_proxy(&self) -> bool {
        self.resolve_endpoint() == PROXY_PATH
    }

    pub fn nutrition_url(&self, food: &str) -> String {
        build_nutrition_url(self.resolve_endpoint(), food)
    }
}

/// Appends the encoded `food` parameter, keeping any query already on `base`.
pub fn build_nutrition_url(base: &str, food: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}food={}", urlencoding::encode(food))
}

/// URL of the backend lookup behind the proxy route.
pub fn backend_nutrition_url(backend_base: &str, food: &str) -> String {
    format!(
        "{}/nutrition?food={}",
        backend_base.trim_end_matches('/'),
        urlencoding::encode(food)
    )
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// `http(s)` URL whose host is `localhost` or a loopback address.
fn is_loopback_endpoint(endpoint: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(endpoint.trim()) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| {
            urlencoding::decode(v)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| v.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn api(public: Option<&str>, allow_override: bool) -> ApiConfig {
        ApiConfig {
            backend_endpoint: "http://127.0.0.1:3001".into(),
            public_endpoint: public.map(str::to_string),
            timeout_ms: 1000,
            retry_attempts: 2,
            allow_endpoint_override: allow_override,
        }
    }

    #[test]
    fn defaults_to_proxy_path() {
        let r = EndpointResolver::default();
        assert_eq!(r.resolve_endpoint(), PROXY_PATH);
        assert!(r.is_same_origin_proxy());
    }

    #[test]
    fn override_beats_public_endpoint() {
        let r = EndpointResolver::new(Some("https://api.example.com/nutrition".into()));
        assert_eq!(r.resolve_endpoint(), "https://api.example.com/nutrition");

        let r = r.with_override(Some("http://localhost:9000/nutrition".into()));
        assert_eq!(r.resolve_endpoint(), "http://localhost:9000/nutrition");
        assert!(!r.is_same_origin_proxy());
    }

    #[test]
    fn blank_values_are_ignored() {
        let r = EndpointResolver::new(Some("  ".into())).with_override(Some(String::new()));
        assert_eq!(r.resolve_endpoint(), PROXY_PATH);
    }

    #[test]
    fn url_builder_encodes_and_picks_separator() {
        assert_eq!(
            build_nutrition_url("/api/nutrition", "sweet potato"),
            "/api/nutrition?food=sweet%20potato"
        );
        assert_eq!(
            build_nutrition_url("https://x.test/prod?stage=1", "mac&cheese"),
            "https://x.test/prod?stage=1&food=mac%26cheese"
        );
    }

    #[test]
    fn backend_url_strips_trailing_slash() {
        assert_eq!(
            backend_nutrition_url("http://127.0.0.1:3001/", "ice cream"),
            "http://127.0.0.1:3001/nutrition?food=ice%20cream"
        );
    }

    #[test]
    fn cookie_override_respects_config() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; api_endpoint=http%3A%2F%2Flocalhost%3A4000%2Fn"),
        );

        let r = EndpointResolver::from_request(&api(None, true), &headers);
        assert_eq!(r.resolve_endpoint(), "http://localhost:4000/n");

        let r = EndpointResolver::from_request(&api(Some("https://pub.test"), false), &headers);
        assert_eq!(r.resolve_endpoint(), "https://pub.test");
    }

    #[test]
    fn non_loopback_cookie_is_ignored() {
        for target in [
            "http%3A%2F%2F10.0.0.5%2Finternal%2Fadmin",
            "http%3A%2F%2Fexample.com%2Fnutrition",
            "http%3A%2F%2F169.254.169.254%2Flatest",
            "http%3A%2F%2Flocalhost.evil.test%2Fn",
            "file%3A%2F%2F%2Fetc%2Fpasswd",
            "%2Fapi%2Fother",
        ] {
            let mut headers = HeaderMap::new();
            headers.insert(
                COOKIE,
                HeaderValue::from_str(&format!("api_endpoint={target}")).unwrap(),
            );
            let r = EndpointResolver::from_request(&api(None, true), &headers);
            assert_eq!(r.resolve_endpoint(), PROXY_PATH, "{target}");

            let r = EndpointResolver::from_request(&api(Some("https://pub.test"), true), &headers);
            assert_eq!(r.resolve_endpoint(), "https://pub.test", "{target}");
        }
    }

    #[test]
    fn loopback_hosts_are_accepted() {
        assert!(is_loopback_endpoint("http://localhost:3001/nutrition"));
        assert!(is_loopback_endpoint("http://127.0.0.1:3001"));
        assert!(is_loopback_endpoint("https://127.8.0.1/prod"));
        assert!(is_loopback_endpoint("http://[::1]:3001/nutrition"));
        assert!(!is_loopback_endpoint("http://0.0.0.0:3001"));
        assert!(!is_loopback_endpoint("not a url"));
    }
}
