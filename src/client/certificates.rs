use crate::{
    core::certificate::{
        AuthRequest, AuthResponse, CertificateByIdentity, CertificateByProfile, IdentifierType,
    },
    error::Result,
};

use super::{non_empty, transport::Transport};

/// Client token exchange and certificate lookup.
#[derive(Debug, Clone, Copy)]
pub struct CertificateService<'a> {
    transport: &'a Transport,
}

impl<'a> CertificateService<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Exchange a profile id and OTP for a client token via `POST /auth`.
    pub async fn get_client_token(&self, request: &AuthRequest) -> Result<AuthResponse> {
        non_empty("profile_id", &request.profile_id)?;
        self.transport.post(&["auth"], request, None).await
    }

    /// `GET /cert/identity/{type}/{value}`
    pub async fn get_certificate_by_identity(
        &self,
        identifier_type: IdentifierType,
        identity_value: &str,
    ) -> Result<CertificateByIdentity> {
        non_empty("identity_value", identity_value)?;
        self.transport
            .get(&["cert", "identity", identifier_type.as_str(), identity_value])
            .await
    }

    /// `GET /cert/{profileId}`
    pub async fn get_certificate_by_profile_id(
        &self,
        profile_id: &str,
    ) -> Result<CertificateByProfile> {
        non_empty("profile_id", profile_id)?;
        self.transport.get(&["cert", profile_id]).await
    }
}
