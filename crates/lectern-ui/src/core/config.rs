//! API endpoint configuration.

/// Endpoint used when nothing overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://qps-sit.test:8080/post";

/// Compile-time endpoint override.
pub const BUILD_ENDPOINT: Option<&str> = option_env!("LECTERN_API_URL");

/// Resolved client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute URL every request is posted to.
    pub endpoint: String,
}

impl ClientConfig {
    /// Resolve settings from a stored override and the build-time value.
    #[must_use]
    pub fn resolve(stored: Option<&str>) -> Self {
        Self {
            endpoint: resolve_endpoint(stored, BUILD_ENDPOINT),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}

/// Pick the first non-blank of `stored`, `build`, then [`DEFAULT_ENDPOINT`].
#[must_use]
pub fn resolve_endpoint(stored: Option<&str>, build: Option<&str>) -> String {
    [stored, build]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_string()
}
