use std::{env, num::ParseIntError, time::Duration};

use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://graph.threads.net";
pub const DEFAULT_AUTHORIZE_BASE_URL: &str = "https://www.threads.net";
pub const DEFAULT_API_VERSION: &str = "v1.0";

const ENV_API_BASE_URL: &str = "THREADS_API_BASE_URL";
const ENV_AUTHORIZE_BASE_URL: &str = "THREADS_AUTHORIZE_BASE_URL";
const ENV_API_VERSION: &str = "THREADS_API_VERSION";
const ENV_TIMEOUT_SECS: &str = "THREADS_API_TIMEOUT_SECS";

/// Settings for an [`AsyncClient`](crate::AsyncClient). The defaults point at the production
/// Threads API; override the base URLs to talk to a mock server instead.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_base_url: Url,
    authorize_base_url: Url,
    api_version: Box<str>,
    timeout: Option<Duration>,
    https_only: bool,
}

impl ClientConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides of the default settings from the environment:
    ///
    /// - `THREADS_API_BASE_URL`
    /// - `THREADS_AUTHORIZE_BASE_URL`
    /// - `THREADS_API_VERSION`
    /// - `THREADS_API_TIMEOUT_SECS`
    ///
    /// A base URL using plain `http` turns off the HTTPS-only restriction.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = env_var(ENV_API_BASE_URL) {
            let url = Url::parse(&url).map_err(|source| ConfigError::InvalidUrl {
                var: ENV_API_BASE_URL,
                source,
            })?;
            config = config.api_base_url(url);
        }

        if let Some(url) = env_var(ENV_AUTHORIZE_BASE_URL) {
            let url = Url::parse(&url).map_err(|source| ConfigError::InvalidUrl {
                var: ENV_AUTHORIZE_BASE_URL,
                source,
            })?;
            config = config.authorize_base_url(url);
        }

        if let Some(version) = env_var(ENV_API_VERSION) {
            config = config.api_version(version);
        }

        if let Some(secs) = env_var(ENV_TIMEOUT_SECS) {
            let secs = secs.parse::<u64>().map_err(|source| ConfigError::InvalidNumber {
                var: ENV_TIMEOUT_SECS,
                source,
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }

        if config.api_base_url.scheme() == "http" || config.authorize_base_url.scheme() == "http" {
            config = config.https_only(false);
        }

        Ok(config)
    }

    #[inline]
    #[must_use]
    pub fn api_base_url(self, api_base_url: Url) -> Self {
        Self {
            api_base_url,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn authorize_base_url(self, authorize_base_url: Url) -> Self {
        Self {
            authorize_base_url,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn api_version<S: Into<Box<str>>>(self, api_version: S) -> Self {
        Self {
            api_version: api_version.into(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Whether to refuse to send requests to non-HTTPS URLs. Enabled by default.
    #[inline]
    #[must_use]
    pub fn https_only(self, https_only: bool) -> Self {
        Self {
            https_only,
            ..self
        }
    }

    pub fn get_api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn get_authorize_base_url(&self) -> &Url {
        &self.authorize_base_url
    }

    pub fn get_api_version(&self) -> &str {
        &self.api_version
    }

    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_https_only(&self) -> bool {
        self.https_only
    }

    /// Joins a path onto the API base URL.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Joins a path below the API version onto the API base URL, e.g. `me/threads` becomes
    /// `https://graph.threads.net/v1.0/me/threads`.
    pub(crate) fn versioned_api_url(&self, path: &str) -> String {
        self.api_url(&format!(
            "{}/{}",
            self.api_version.trim_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .expect("the default API base URL should always be valid"),
            authorize_base_url: Url::parse(DEFAULT_AUTHORIZE_BASE_URL)
                .expect("the default authorize base URL should always be valid"),
            api_version: DEFAULT_API_VERSION.into(),
            timeout: None,
            https_only: true,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{var} is not a valid number: {source}")]
    InvalidNumber {
        var: &'static str,
        #[source]
        source: ParseIntError,
    },
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::{env, time::Duration};

    use serial_test::serial;
    use url::Url;

    use super::{
        ClientConfig, ConfigError, ENV_API_BASE_URL, ENV_API_VERSION, ENV_AUTHORIZE_BASE_URL,
        ENV_TIMEOUT_SECS,
    };

    fn set_env(vars: &[(&str, &str)]) {
        for key in [
            ENV_API_BASE_URL,
            ENV_AUTHORIZE_BASE_URL,
            ENV_API_VERSION,
            ENV_TIMEOUT_SECS,
        ] {
            env::remove_var(key);
        }
        for (key, val) in vars {
            env::set_var(key, val);
        }
    }

    #[test]
    fn test_api_urls() {
        let config = ClientConfig::new();
        assert_eq!(
            config.versioned_api_url("me/threads"),
            "https://graph.threads.net/v1.0/me/threads"
        );
        assert_eq!(
            config.api_url("/oauth/access_token"),
            "https://graph.threads.net/oauth/access_token"
        );

        let config = ClientConfig::new()
            .api_base_url(Url::parse("http://127.0.0.1:8888/threads/").unwrap())
            .api_version("v2.0");
        assert_eq!(
            config.versioned_api_url("1234/insights"),
            "http://127.0.0.1:8888/threads/v2.0/1234/insights"
        );
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.is_https_only());
        assert_eq!(config.get_timeout(), None);
        assert_eq!(config.get_api_version(), "v1.0");
        assert_eq!(config.get_authorize_base_url().as_str(), "https://www.threads.net/");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        set_env(&[
            (ENV_API_BASE_URL, "http://127.0.0.1:8888"),
            (ENV_AUTHORIZE_BASE_URL, "http://127.0.0.1:8889"),
            (ENV_API_VERSION, "v2.0"),
            (ENV_TIMEOUT_SECS, "15"),
        ]);

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.get_api_base_url().as_str(), "http://127.0.0.1:8888/");
        assert_eq!(config.get_authorize_base_url().as_str(), "http://127.0.0.1:8889/");
        assert_eq!(config.get_api_version(), "v2.0");
        assert_eq!(config.get_timeout(), Some(Duration::from_secs(15)));
        assert!(!config.is_https_only());

        set_env(&[]);
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_blank_values() {
        set_env(&[
            (ENV_API_BASE_URL, "  "),
            (ENV_API_VERSION, ""),
            (ENV_TIMEOUT_SECS, " "),
        ]);

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.get_api_base_url().as_str(), "https://graph.threads.net/");
        assert_eq!(config.get_api_version(), "v1.0");
        assert_eq!(config.get_timeout(), None);
        assert!(config.is_https_only());

        set_env(&[]);
    }

    #[test]
    #[serial]
    fn test_from_env_keeps_https_only_for_https_urls() {
        set_env(&[(ENV_API_BASE_URL, "https://graph.example.com")]);

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.get_api_base_url().as_str(), "https://graph.example.com/");
        assert!(config.is_https_only());

        set_env(&[(ENV_AUTHORIZE_BASE_URL, "http://localhost:8888")]);
        assert!(!ClientConfig::from_env().unwrap().is_https_only());

        set_env(&[]);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_values() {
        set_env(&[(ENV_AUTHORIZE_BASE_URL, "not a url")]);
        assert!(matches!(
            ClientConfig::from_env(),
            Err(ConfigError::InvalidUrl { var: ENV_AUTHORIZE_BASE_URL, .. })
        ));

        set_env(&[(ENV_TIMEOUT_SECS, "soon")]);
        assert!(matches!(
            ClientConfig::from_env(),
            Err(ConfigError::InvalidNumber { var: ENV_TIMEOUT_SECS, .. })
        ));

        set_env(&[]);
    }
}
