use std::{path::PathBuf, str::FromStr, time::Duration};

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::{
    core::language::Language,
    error::{Error, Result},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection details for the CQES API.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Versioned API root, e.g. `https://cqes-rpuat.b-trust.bg/signing-api/v2`.
    pub base_url: BaseUrl,
    /// Relying party identifier assigned by BORICA, sent as `relyingPartyID`.
    pub relying_party_id: String,
    /// PEM encoded client certificate used for mutual TLS.
    pub client_cert: PathBuf,
    /// PEM encoded private key matching `client_cert`.
    pub client_key: PathBuf,
    #[serde(default)]
    pub tls: TlsVerification,
    /// Sent as `Accept-language`.
    #[serde(default)]
    pub default_language: Language,
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        deserialize_with = "deserialize_secs"
    )]
    pub timeout: Duration,
}

/// How the server certificate is verified.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TlsVerification {
    /// Built-in root certificates.
    #[default]
    System,
    /// Accept any server certificate. Only for test environments.
    Disabled,
    /// Trust only the certificates in this PEM bundle.
    CustomCa(PathBuf),
}

impl Config {
    pub fn new(
        base_url: BaseUrl,
        relying_party_id: impl Into<String>,
        client_cert: impl Into<PathBuf>,
        client_key: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base_url,
            relying_party_id: relying_party_id.into(),
            client_cert: client_cert.into(),
            client_key: client_key.into(),
            tls: TlsVerification::default(),
            default_language: Language::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the configuration from `BORICA_*` environment variables.
    ///
    /// Required: `BORICA_BASE_URL`, `BORICA_RP_ID`, `BORICA_CLIENT_CERT`,
    /// `BORICA_CLIENT_KEY`. Optional: `BORICA_CA_BUNDLE`, `BORICA_TLS_VERIFY`,
    /// `BORICA_LANGUAGE`, `BORICA_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is not set")))
        };

        let base_url = BaseUrl::try_from(required("BORICA_BASE_URL")?)?;
        let mut config = Self::new(
            base_url,
            required("BORICA_RP_ID")?,
            required("BORICA_CLIENT_CERT")?,
            required("BORICA_CLIENT_KEY")?,
        );

        if let Some(bundle) = lookup("BORICA_CA_BUNDLE") {
            config.tls = TlsVerification::CustomCa(bundle.into());
        }
        if let Some(verify) = lookup("BORICA_TLS_VERIFY") {
            match verify.trim().to_ascii_lowercase().as_str() {
                "false" | "0" | "no" => config.tls = TlsVerification::Disabled,
                "true" | "1" | "yes" => {}
                other => {
                    return Err(Error::Config(format!(
                        "BORICA_TLS_VERIFY must be a boolean, found '{other}'"
                    )))
                }
            }
        }
        if let Some(language) = lookup("BORICA_LANGUAGE") {
            config.default_language = language.parse()?;
        }
        if let Some(timeout) = lookup("BORICA_TIMEOUT_SECS") {
            config.timeout = timeout
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| {
                    Error::Config(format!("BORICA_TIMEOUT_SECS is not a duration: '{timeout}'"))
                })?;
        }

        Ok(config)
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn deserialize_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

/// A url that is always a base (can be safely join()'ed with further path elements without
/// mangling).
#[derive(Deserialize, Debug, Clone, Hash, PartialEq, Eq)]
#[serde(try_from = "String")]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Append percent-encoded path segments to the base.
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let mut url = self.0.clone();
        // Cannot fail, `try_from` rejects cannot-be-a-base urls.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl std::ops::Deref for BaseUrl {
    type Target = Url;

    fn deref(&self) -> &Url {
        &self.0
    }
}

impl TryFrom<String> for BaseUrl {
    type Error = Error;

    fn try_from(mut url: String) -> Result<Self, Self::Error> {
        // Make URL a base.
        if !url.ends_with('/') {
            url += "/"
        }
        let url: Url = url
            .parse()
            .map_err(|e| Error::Config(format!("invalid base url: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("'{url}' cannot be used as a base url")));
        }
        Ok(Self(url))
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn base_url_is_always_a_base() {
        let base: BaseUrl = "https://cqes-rpuat.b-trust.bg/signing-api/v2".parse().unwrap();
        assert_eq!(base.as_str(), "https://cqes-rpuat.b-trust.bg/signing-api/v2/");
        assert_eq!(
            base.endpoint(&["sign", "rpcallbackid", "a b"]).as_str(),
            "https://cqes-rpuat.b-trust.bg/signing-api/v2/sign/rpcallbackid/a%20b"
        );
        assert!("mailto:rp@example.com".parse::<BaseUrl>().is_err());
    }

    #[test]
    fn endpoint_encodes_reserved_characters() {
        let base: BaseUrl = "https://example.com/api/".parse().unwrap();
        assert_eq!(
            base.endpoint(&["cert", "identity", "EMAIL", "a/b?c@d"]).as_str(),
            "https://example.com/api/cert/identity/EMAIL/a%2Fb%3Fc@d"
        );
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_value(json!({
            "base_url": "https://example.com/signing-api/v2",
            "relying_party_id": "rp-123",
            "client_cert": "/etc/rp/cert.pem",
            "client_key": "/etc/rp/key.pem",
        }))
        .unwrap();
        assert_eq!(config.tls, TlsVerification::System);
        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.timeout, Duration::from_secs(30));

        let config: Config = serde_json::from_value(json!({
            "base_url": "https://example.com/signing-api/v2",
            "relying_party_id": "rp-123",
            "client_cert": "/etc/rp/cert.pem",
            "client_key": "/etc/rp/key.pem",
            "tls": { "custom_ca": "/etc/rp/ca.pem" },
            "default_language": "bg",
            "timeout_secs": 2.5,
        }))
        .unwrap();
        assert_eq!(config.tls, TlsVerification::CustomCa("/etc/rp/ca.pem".into()));
        assert_eq!(config.default_language, Language::Bg);
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn from_lookup() {
        let env: HashMap<&str, &str> = [
            ("BORICA_BASE_URL", "https://example.com/signing-api/v2"),
            ("BORICA_RP_ID", "rp-123"),
            ("BORICA_CLIENT_CERT", "cert.pem"),
            ("BORICA_CLIENT_KEY", "key.pem"),
            ("BORICA_TLS_VERIFY", "false"),
            ("BORICA_LANGUAGE", "bg"),
            ("BORICA_TIMEOUT_SECS", "5"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.relying_party_id, "rp-123");
        assert_eq!(config.tls, TlsVerification::Disabled);
        assert_eq!(config.default_language, Language::Bg);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    fn lookup_with(
        extra: &'static [(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        move |key| {
            let base = [
                ("BORICA_BASE_URL", "https://example.com/signing-api/v2"),
                ("BORICA_RP_ID", "rp-123"),
                ("BORICA_CLIENT_CERT", "cert.pem"),
                ("BORICA_CLIENT_KEY", "key.pem"),
            ];
            base.iter()
                .chain(extra)
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn from_lookup_custom_ca_bundle() {
        let config = Config::from_lookup(lookup_with(&[("BORICA_CA_BUNDLE", "/etc/rp/ca.pem")]))
            .unwrap();
        assert_eq!(config.tls, TlsVerification::CustomCa("/etc/rp/ca.pem".into()));
    }

    #[test]
    fn from_lookup_rejects_bad_values() {
        let err = Config::from_lookup(lookup_with(&[("BORICA_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("BORICA_TIMEOUT_SECS"), "{err}");

        let err =
            Config::from_lookup(lookup_with(&[("BORICA_TIMEOUT_SECS", "-1")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_lookup(lookup_with(&[("BORICA_LANGUAGE", "de")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn from_lookup_reports_missing_variables() {
        let err = Config::from_lookup(|k| {
            (k == "BORICA_BASE_URL").then(|| "https://example.com".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("BORICA_RP_ID"), "{err}");

        let err = Config::from_lookup(|k| match k {
            "BORICA_TLS_VERIFY" => Some("maybe".into()),
            "BORICA_BASE_URL" => Some("https://example.com".into()),
            _ => Some("x".into()),
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
