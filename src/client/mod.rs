use std::sync::Arc;

use tracing::debug;

use crate::{
    config::Config,
    core::util::{AsyncHttpClient, ReqwestClient},
    error::{Error, Result},
};

use transport::Transport;

pub mod blocking;
pub mod certificates;
pub mod identification;
pub mod poll;
pub mod signing;
pub mod transport;

pub use blocking::BlockingClient;
pub use certificates::CertificateService;
pub use identification::IdentificationService;
pub use poll::PollOptions;
pub use signing::{SignedDocument, SigningService};

/// A CQES API client.
///
/// Bundles the signing, certificate and identification services over one
/// shared connection pool. Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct BoricaClient {
    transport: Transport,
}

impl BoricaClient {
    /// Connect with mutual TLS using the client certificate and key in `config`.
    pub fn new(config: Config) -> Result<Self> {
        let http_client = ReqwestClient::from_config(&config).map_err(Error::Setup)?;
        debug!(
            "configured mutual TLS client for {}",
            config.base_url.as_str()
        );
        Self::with_http_client(config, Arc::new(http_client))
    }

    /// Use a custom [AsyncHttpClient], e.g. a platform HTTP stack that
    /// already holds the client certificate.
    pub fn with_http_client(
        config: Config,
        http_client: Arc<dyn AsyncHttpClient + Send + Sync>,
    ) -> Result<Self> {
        if config.relying_party_id.trim().is_empty() {
            return Err(Error::Config("relying_party_id must not be empty".into()));
        }
        Ok(Self {
            transport: Transport::new(&config, http_client)?,
        })
    }

    pub fn signing(&self) -> SigningService<'_> {
        SigningService::new(&self.transport)
    }

    pub fn certificates(&self) -> CertificateService<'_> {
        CertificateService::new(&self.transport)
    }

    pub fn identification(&self) -> IdentificationService<'_> {
        IdentificationService::new(&self.transport)
    }
}

/// Reject empty path parameters, which would address a different endpoint.
fn non_empty(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidRequest(format!("{name} must not be empty")));
    }
    Ok(())
}
