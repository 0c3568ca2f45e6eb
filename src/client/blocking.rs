//! A synchronous facade over [BoricaClient].
//!
//! Each call drives the async client to completion on a private
//! current-thread runtime. Do not use it from within an async context;
//! blocking on a runtime from inside another one panics.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use url::Url;

use crate::{
    config::Config,
    core::{
        certificate::{
            AuthRequest, AuthResponse, CertificateByIdentity, CertificateByProfile, IdentifierType,
        },
        identification::{
            OtcSignRequest, OtcSignSession, Registration, RegistrationRequest, WebResult,
            WebSession,
        },
        identity::Identity,
        qr::{QrAccepted, QrRequest},
        sign::{SignAccepted, SignRequest, SignStatusResponse, SignTarget},
        util::AsyncHttpClient,
    },
    error::{Error, Result},
    utils::TextOrNumber,
};

use super::{BoricaClient, PollOptions, SignedDocument};

/// Blocking CQES API client.
#[derive(Debug)]
pub struct BlockingClient {
    inner: BoricaClient,
    runtime: Runtime,
}

impl BlockingClient {
    /// See [BoricaClient::new].
    pub fn new(config: Config) -> Result<Self> {
        Self::from_async(BoricaClient::new(config)?)
    }

    /// See [BoricaClient::with_http_client].
    pub fn with_http_client(
        config: Config,
        http_client: Arc<dyn AsyncHttpClient + Send + Sync>,
    ) -> Result<Self> {
        Self::from_async(BoricaClient::with_http_client(config, http_client)?)
    }

    pub fn from_async(inner: BoricaClient) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Setup(anyhow::Error::new(e).context("unable to start runtime")))?;
        Ok(Self { inner, runtime })
    }

    pub fn signing(&self) -> SigningService<'_> {
        SigningService { client: self }
    }

    pub fn certificates(&self) -> CertificateService<'_> {
        CertificateService { client: self }
    }

    pub fn identification(&self) -> IdentificationService<'_> {
        IdentificationService { client: self }
    }
}

/// Blocking counterpart of [super::SigningService].
#[derive(Debug, Clone, Copy)]
pub struct SigningService<'a> {
    client: &'a BlockingClient,
}

impl SigningService<'_> {
    pub fn send_sign_request(
        &self,
        request: &SignRequest,
        identity: &Identity,
    ) -> Result<SignAccepted> {
        let c = self.client;
        c.runtime
            .block_on(c.inner.signing().send_sign_request(request, identity))
    }

    pub fn get_sign_result(&self, callback_id: &str) -> Result<SignStatusResponse> {
        let c = self.client;
        c.runtime
            .block_on(c.inner.signing().get_sign_result(callback_id))
    }

    pub fn get_sign_result_by_rp_callback_id(
        &self,
        rp_callback_id: &str,
    ) -> Result<SignStatusResponse> {
        let c = self.client;
        c.runtime.block_on(
            c.inner
                .signing()
                .get_sign_result_by_rp_callback_id(rp_callback_id),
        )
    }

    pub fn get_status(&self, target: &SignTarget) -> Result<SignStatusResponse> {
        let c = self.client;
        c.runtime.block_on(c.inner.signing().get_status(target))
    }

    pub fn poll_until_signed(
        &self,
        target: &SignTarget,
        options: PollOptions,
    ) -> Result<SignStatusResponse> {
        let c = self.client;
        c.runtime
            .block_on(c.inner.signing().poll_until_signed(target, options))
    }

    pub fn download_signed_content(&self, content_id: &str) -> Result<Vec<u8>> {
        let c = self.client;
        c.runtime
            .block_on(c.inner.signing().download_signed_content(content_id))
    }

    pub fn send_sign_request_via_qr(&self, request: &QrRequest) -> Result<QrAccepted> {
        let c = self.client;
        c.runtime
            .block_on(c.inner.signing().send_sign_request_via_qr(request))
    }

    pub fn sign_and_download(
        &self,
        request: &SignRequest,
        identity: &Identity,
        options: PollOptions,
    ) -> Result<Vec<SignedDocument>> {
        let c = self.client;
        c.runtime.block_on(
            c.inner
                .signing()
                .sign_and_download(request, identity, options),
        )
    }
}

/// Blocking counterpart of [super::CertificateService].
#[derive(Debug, Clone, Copy)]
pub struct CertificateService<'a> {
    client: &'a BlockingClient,
}

impl CertificateService<'_> {
    pub fn get_client_token(&self, request: &AuthRequest) -> Result<AuthResponse> {
        let c = self.client;
        c.runtime
            .block_on(c.inner.certificates().get_client_token(request))
    }

    pub fn get_certificate_by_identity(
        &self,
        identifier_type: IdentifierType,
        identity_value: &str,
    ) -> Result<CertificateByIdentity> {
        let c = self.client;
        c.runtime.block_on(
            c.inner
                .certificates()
                .get_certificate_by_identity(identifier_type, identity_value),
        )
    }

    pub fn get_certificate_by_profile_id(&self, profile_id: &str) -> Result<CertificateByProfile> {
        let c = self.client;
        c.runtime
            .block_on(c.inner.certificates().get_certificate_by_profile_id(profile_id))
    }
}

/// Blocking counterpart of [super::IdentificationService].
#[derive(Debug, Clone, Copy)]
pub struct IdentificationService<'a> {
    client: &'a BlockingClient,
}

impl IdentificationService<'_> {
    pub fn start_web_session(
        &self,
        request_callback_url: Url,
        identification_reason: impl Into<String>,
    ) -> Result<WebSession> {
        let c = self.client;
        c.runtime.block_on(
            c.inner
                .identification()
                .start_web_session(request_callback_url, identification_reason),
        )
    }

    pub fn create_registration(
        &self,
        web_session_id: &str,
        request: &RegistrationRequest,
    ) -> Result<Registration> {
        let c = self.client;
        c.runtime.block_on(
            c.inner
                .identification()
                .create_registration(web_session_id, request),
        )
    }

    pub fn get_web_result(
        &self,
        result_id: &TextOrNumber,
        process_state: &str,
        session_id: &str,
        only_metadata: Option<bool>,
    ) -> Result<WebResult> {
        let c = self.client;
        c.runtime.block_on(c.inner.identification().get_web_result(
            result_id,
            process_state,
            session_id,
            only_metadata,
        ))
    }

    pub fn start_otc_sign(&self, request: &OtcSignRequest) -> Result<OtcSignSession> {
        let c = self.client;
        c.runtime
            .block_on(c.inner.identification().start_otc_sign(request))
    }
}
