use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use http::{Request, Response};

use crate::config::{Config, TlsVerification};

/// Generic HTTP client.
///
/// A trait is used here so to facilitate native HTTP/TLS when embedded in mobile applications,
/// and to drive the client against canned responses in tests.
#[async_trait]
pub trait AsyncHttpClient {
    async fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>>;
}

#[derive(Debug)]
pub struct ReqwestClient(reqwest::Client);

impl ReqwestClient {
    /// Build a client authenticating with the relying party certificate (mutual TLS).
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut pem = std::fs::read(&config.client_cert).with_context(|| {
            format!(
                "unable to read client certificate {}",
                config.client_cert.display()
            )
        })?;
        let key = std::fs::read(&config.client_key).with_context(|| {
            format!("unable to read client key {}", config.client_key.display())
        })?;
        if !pem.ends_with(b"\n") {
            pem.push(b'\n');
        }
        pem.extend_from_slice(&key);

        let identity =
            reqwest::Identity::from_pem(&pem).context("unable to load client identity")?;

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .identity(identity)
            .timeout(config.timeout);

        match &config.tls {
            TlsVerification::System => {}
            TlsVerification::Disabled => {
                tracing::warn!("server certificate verification is disabled");
                builder = builder.danger_accept_invalid_certs(true);
            }
            TlsVerification::CustomCa(path) => {
                let bundle = std::fs::read(path)
                    .with_context(|| format!("unable to read CA bundle {}", path.display()))?;
                let certificates = reqwest::Certificate::from_pem_bundle(&bundle)
                    .context("unable to parse CA bundle")?;
                builder = builder.tls_built_in_root_certs(false);
                for certificate in certificates {
                    builder = builder.add_root_certificate(certificate);
                }
            }
        }

        builder
            .build()
            .context("unable to build http_client")
            .map(Self)
    }
}

#[async_trait]
impl AsyncHttpClient for ReqwestClient {
    async fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        let response = self
            .0
            .execute(request.try_into().context("unable to convert request")?)
            .await
            .context("http request failed")?;

        let mut builder = Response::builder()
            .status(response.status())
            .version(response.version());

        builder
            .headers_mut()
            .context("unable to set headers")?
            .extend(response.headers().clone());

        builder
            .body(
                response
                    .bytes()
                    .await
                    .context("failed to extract response body")?
                    .to_vec(),
            )
            .context("unable to construct response")
    }
}
