//! Client configuration, populated from code or environment variables.

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("chirp-core/", env!("CARGO_PKG_VERSION"));

/// Runtime configuration for an `ApiClient` and its session.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `CHIRP_API_BASE` | `https://api.twitter.com/1.1/` | Base URL endpoint paths are resolved against |
/// | `CHIRP_TIMEOUT_SECS` | `30` | Per-call limit in whole seconds; `0` disables it, anything else non-numeric is an error |
/// | `CHIRP_BEARER_TOKEN` | (absent) | Sent as `Authorization: Bearer <token>` |
/// | `CHIRP_USER_AGENT` | `chirp-core/<version>` | `User-Agent` header |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Always ends in `/`, so relative endpoint paths join beneath it.
    pub base_url: Url,
    pub timeout: Option<Duration>,
    pub bearer_token: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"),
            timeout: Some(DEFAULT_TIMEOUT),
            bearer_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at `base_url`.
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = match std::env::var("CHIRP_API_BASE") {
            Ok(base) => Self::with_base_url(&base)?,
            Err(_) => Self::default(),
        };

        if let Ok(raw) = std::env::var("CHIRP_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&raw)?;
        }
        config.bearer_token = std::env::var("CHIRP_BEARER_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        if let Ok(agent) = std::env::var("CHIRP_USER_AGENT") {
            config.user_agent = agent;
        }
        Ok(config)
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Resolve an endpoint path against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }
}

/// Parse a whole number of seconds; `0` means no limit.
fn parse_timeout(raw: &str) -> Result<Option<Duration>, ApiError> {
    let secs = raw.trim().parse::<u64>().map_err(|e| {
        ApiError::Config(format!("CHIRP_TIMEOUT_SECS={raw:?}: {e}"))
    })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

fn parse_base_url(base: &str) -> Result<Url, ApiError> {
    let normalized = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{base}: not a base URL")));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
        assert!(config.bearer_token.is_none());
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:3000/1.1").unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:3000/1.1/");
    }

    #[test]
    fn resolve_joins_below_base() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:3000/1.1/").unwrap();
        assert_eq!(
            config.resolve("lists/show.json").unwrap().as_str(),
            "http://127.0.0.1:3000/1.1/lists/show.json"
        );
        assert_eq!(
            config.resolve("/lists/show.json").unwrap().as_str(),
            "http://127.0.0.1:3000/1.1/lists/show.json"
        );
    }

    #[test]
    fn rejects_non_url() {
        let err = ClientConfig::with_base_url("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn timeout_seconds_parse() {
        assert_eq!(parse_timeout("45").unwrap(), Some(Duration::from_secs(45)));
        assert_eq!(parse_timeout(" 5 ").unwrap(), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout("0").unwrap(), None);
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        for raw in ["30s", "1.5", "-1", ""] {
            let err = parse_timeout(raw).unwrap_err();
            assert!(matches!(err, ApiError::Config(_)), "{raw}: {err:?}");
            assert!(err.to_string().contains("CHIRP_TIMEOUT_SECS"));
        }
    }

    #[test]
    fn builder_setters() {
        let config = ClientConfig::default().timeout(None).bearer_token("abc");
        assert!(config.timeout.is_none());
        assert_eq!(config.bearer_token.as_deref(), Some("abc"));
    }
}
