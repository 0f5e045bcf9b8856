//! Client configuration types.
//!
//! - [`ClientConfig`] tunes the HTTP transport.
//! - [`TxSettings`] holds the account credentials, the data center and the
//!   debug flag of one client.

use std::time::Duration;

use tx_core::{Error, Result};
use url::Url;

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout duration. Parsing large documents can take a while.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

// ============================================================================
// Account Settings
// ============================================================================

/// Region hosting the account's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataCenter {
    /// United States.
    Us,
    /// European Union.
    Eu,
    /// Australia.
    Au,
    /// Any other deployment, such as a self-hosted instance or a test server.
    Custom(Url),
}

impl DataCenter {
    /// Base URL of the API in this data center, always ending with `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom URL cannot be used as a base.
    pub fn base_url(&self) -> Result<Url> {
        let url = match self {
            Self::Us => "https://api.us.textkernel.com/tx/v10/",
            Self::Eu => "https://api.eu.textkernel.com/tx/v10/",
            Self::Au => "https://api.au.textkernel.com/tx/v10/",
            Self::Custom(url) => {
                if url.cannot_be_a_base() {
                    return Err(Error::invalid_request(format!(
                        "data center URL '{url}' cannot be a base"
                    )));
                }
                let mut url = url.clone();
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                return Ok(url);
            }
        };
        Url::parse(url).map_err(Error::InvalidUrl)
    }
}

impl std::str::FromStr for DataCenter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            "au" => Ok(Self::Au),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Ok(Self::Custom(Url::parse(value.trim())?))
            }
            other => Err(Error::invalid_request(format!(
                "unknown data center '{other}': expected us, eu, au or a URL"
            ))),
        }
    }
}

/// Credentials and per-client options.
#[derive(Clone)]
pub struct TxSettings {
    /// Account id, sent as `Tx-AccountId`.
    pub account_id: String,
    /// Service key, sent as `Tx-ServiceKey`.
    pub service_key: String,
    /// Where the account lives.
    pub data_center: DataCenter,
    /// Attach request bodies to errors. Bodies contain the submitted
    /// documents, so leave this off outside of debugging sessions.
    pub show_full_request_body_in_errors: bool,
    /// Tags sent as `Tx-TrackingTags` for usage reporting.
    pub tracking_tags: Vec<String>,
}

impl std::fmt::Debug for TxSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxSettings")
            .field("account_id", &self.account_id)
            .field("service_key", &"<redacted>")
            .field("data_center", &self.data_center)
            .field(
                "show_full_request_body_in_errors",
                &self.show_full_request_body_in_errors,
            )
            .field("tracking_tags", &self.tracking_tags)
            .finish()
    }
}

impl TxSettings {
    /// Settings for an account in the US data center.
    #[must_use]
    pub fn new(account_id: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            service_key: service_key.into(),
            data_center: DataCenter::Us,
            show_full_request_body_in_errors: false,
            tracking_tags: Vec::new(),
        }
    }

    /// Use another data center.
    #[must_use]
    pub fn with_data_center(mut self, data_center: DataCenter) -> Self {
        self.data_center = data_center;
        self
    }

    /// Attach request bodies to errors.
    #[must_use]
    pub const fn with_request_body_in_errors(mut self, enabled: bool) -> Self {
        self.show_full_request_body_in_errors = enabled;
        self
    }

    /// Add a tracking tag.
    #[must_use]
    pub fn with_tracking_tag(mut self, tag: impl Into<String>) -> Self {
        self.tracking_tags.push(tag.into());
        self
    }

    /// Read settings from environment variables.
    ///
    /// - `TX_ACCOUNT_ID` (required)
    /// - `TX_SERVICE_KEY` (required)
    /// - `TX_DATA_CENTER` (optional: `us`, `eu`, `au` or a base URL; defaults to `us`)
    /// - `TX_DEBUG` (optional: `true`/`1` attaches request bodies to errors)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::invalid_request(format!("{name} not set")))
        };

        let mut settings = Self::new(required("TX_ACCOUNT_ID")?, required("TX_SERVICE_KEY")?);

        if let Some(raw) = lookup("TX_DATA_CENTER") {
            settings.data_center = raw.parse()?;
        }

        settings.show_full_request_body_in_errors = match lookup("TX_DEBUG").as_deref() {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(Error::invalid_request(format!(
                        "Invalid TX_DEBUG '{raw}': must be true or false"
                    )));
                }
            },
        };

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_per_host(16)
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_idle_per_host, 16);
    }

    #[test]
    fn data_center_base_urls() {
        let url = DataCenter::Eu.base_url().expect("eu");
        check!(url.as_str() == "https://api.eu.textkernel.com/tx/v10/");

        let custom = DataCenter::Custom(Url::parse("http://localhost:8080/tx").expect("url"));
        check!(custom.base_url().expect("custom").as_str() == "http://localhost:8080/tx/");
    }

    #[test]
    fn data_center_from_str() {
        check!("US".parse::<DataCenter>().expect("us") == DataCenter::Us);
        check!("au".parse::<DataCenter>().expect("au") == DataCenter::Au);
        let_assert!(Ok(DataCenter::Custom(url)) = "https://tx.internal/v10/".parse::<DataCenter>());
        check!(url.host_str() == Some("tx.internal"));
        check!("mars".parse::<DataCenter>().is_err());
    }

    #[test]
    fn settings_from_lookup() {
        let settings = TxSettings::from_lookup(lookup(&[
            ("TX_ACCOUNT_ID", "12345678"),
            ("TX_SERVICE_KEY", "secret"),
            ("TX_DATA_CENTER", "eu"),
            ("TX_DEBUG", "true"),
        ]))
        .expect("settings");

        check!(settings.account_id == "12345678");
        check!(settings.data_center == DataCenter::Eu);
        check!(settings.show_full_request_body_in_errors);
    }

    #[test]
    fn settings_from_lookup_requires_credentials() {
        let result = TxSettings::from_lookup(lookup(&[("TX_ACCOUNT_ID", "12345678")]));
        let_assert!(Err(err) = result);
        check!(err.to_string().contains("TX_SERVICE_KEY"));

        let result = TxSettings::from_lookup(lookup(&[
            ("TX_ACCOUNT_ID", "1"),
            ("TX_SERVICE_KEY", "k"),
            ("TX_DEBUG", "maybe"),
        ]));
        check!(result.is_err());
    }

    #[test]
    fn settings_debug_redacts_service_key() {
        let settings = TxSettings::new("12345678", "super-secret");
        let debug = format!("{settings:?}");
        check!(debug.contains("12345678"));
        check!(!debug.contains("super-secret"));
    }
}
