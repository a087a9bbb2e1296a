//! Application settings loaded via OrthoConfig.
//!
//! Values come from `EBOOKS_*` environment variables, matching CLI flags, or
//! a configuration file. Every field is optional; accessors supply defaults
//! and parse the raw strings.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_TRANSLATION_TIMEOUT_SECS: u64 = 10;

/// Errors raised when a configured value cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid translation endpoint {value:?}: {source}")]
    TranslationEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Runtime configuration for the ebook API.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EBOOKS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Base URL of a LibreTranslate-compatible service.
    pub translation_endpoint: Option<String>,
    /// API key sent with translation requests.
    pub translation_api_key: Option<String>,
    /// Per-request translation timeout in seconds.
    pub translation_timeout_secs: Option<u64>,
    /// Load the sample catalogue at startup.
    #[ortho_config(default = false)]
    pub seed_sample_data: bool,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).trim();
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    /// Parsed translation endpoint, or `None` when translation is not
    /// configured.
    pub fn translation_endpoint(&self) -> Result<Option<Url>, SettingsError> {
        non_blank(self.translation_endpoint.as_deref())
            .map(|value| {
                Url::parse(value).map_err(|source| SettingsError::TranslationEndpoint {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn translation_api_key(&self) -> Option<&str> {
        non_blank(self.translation_api_key.as_deref())
    }

    pub fn translation_timeout(&self) -> Duration {
        let secs = self
            .translation_timeout_secs
            .unwrap_or(DEFAULT_TRANSLATION_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "EBOOKS_BIND_ADDR",
        "EBOOKS_DATABASE_URL",
        "EBOOKS_DB_MAX_CONNECTIONS",
        "EBOOKS_TRANSLATION_ENDPOINT",
        "EBOOKS_TRANSLATION_API_KEY",
        "EBOOKS_TRANSLATION_TIMEOUT_SECS",
        "EBOOKS_SEED_SAMPLE_DATA",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("ebooks-api")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), 10);
        assert!(settings.translation_endpoint().expect("absent").is_none());
        assert_eq!(settings.translation_timeout(), Duration::from_secs(10));
        assert!(!settings.seed_sample_data);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EBOOKS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "EBOOKS_DATABASE_URL",
                Some("postgres://localhost/ebooks".to_owned()),
            ),
            ("EBOOKS_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            (
                "EBOOKS_TRANSLATION_ENDPOINT",
                Some("http://translate.local:5000".to_owned()),
            ),
            ("EBOOKS_TRANSLATION_API_KEY", Some("secret".to_owned())),
            ("EBOOKS_TRANSLATION_TIMEOUT_SECS", Some("3".to_owned())),
            ("EBOOKS_SEED_SAMPLE_DATA", Some("true".to_owned())),
        ]);

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("addr").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/ebooks"));
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(
            settings
                .translation_endpoint()
                .expect("valid")
                .map(|url| url.to_string()),
            Some("http://translate.local:5000/".to_owned())
        );
        assert_eq!(settings.translation_api_key(), Some("secret"));
        assert_eq!(settings.translation_timeout(), Duration::from_secs(3));
        assert!(settings.seed_sample_data);
    }

    #[rstest]
    fn malformed_values_are_reported() {
        let _guard = lock_env([
            ("EBOOKS_BIND_ADDR", Some("not an address".to_owned())),
            ("EBOOKS_TRANSLATION_ENDPOINT", Some("::nope".to_owned())),
        ]);

        let settings = load();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert!(matches!(
            settings.translation_endpoint(),
            Err(SettingsError::TranslationEndpoint { .. })
        ));
    }

    #[rstest]
    fn blank_values_count_as_unset() {
        let _guard = lock_env([
            ("EBOOKS_DATABASE_URL", Some("   ".to_owned())),
            ("EBOOKS_TRANSLATION_ENDPOINT", Some(String::new())),
            ("EBOOKS_TRANSLATION_API_KEY", Some(" ".to_owned())),
        ]);

        let settings = load();
        assert_eq!(settings.database_url(), None);
        assert!(settings.translation_endpoint().expect("blank").is_none());
        assert_eq!(settings.translation_api_key(), None);
    }
}
