use std::fmt;

use base64::prelude::*;
use serde::{Deserialize, Serialize};
use x509_cert::{der::Decode, Certificate};

use crate::{
    core::response::ApiResponse,
    error::{Error, Result},
    utils::TextOrNumber,
};

/// Kind of identity a certificate is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierType {
    /// Bulgarian personal number.
    Egn,
    /// Personal number of a foreigner.
    Lnc,
    Email,
    Phone,
}

impl IdentifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Egn => "EGN",
            IdentifierType::Lnc => "LNC",
            IdentifierType::Email => "EMAIL",
            IdentifierType::Phone => "PHONE",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /auth`, exchanging a profile id and the OTP sent to the user
/// for a client token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub profile_id: String,
    pub otp: TextOrNumber,
}

impl AuthRequest {
    pub fn new(profile_id: impl Into<String>, otp: impl Into<TextOrNumber>) -> Self {
        Self {
            profile_id: profile_id.into(),
            otp: otp.into(),
        }
    }
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("profile_id", &self.profile_id)
            .field("otp", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    /// Usable as [Identity::ClientToken](crate::core::identity::Identity::ClientToken).
    pub client_token: String,
}

pub type AuthResponse = ApiResponse<AuthData>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateByIdentityData {
    pub encoded_cert: String,
    pub cert_req_id: i64,
    /// Devices the signer can confirm signatures on.
    #[serde(default)]
    pub devices: Vec<String>,
}

impl CertificateByIdentityData {
    pub fn certificate(&self) -> Result<Certificate> {
        decode_certificate(&self.encoded_cert)
    }
}

pub type CertificateByIdentity = ApiResponse<CertificateByIdentityData>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateByProfileData {
    pub encoded_cert: String,
}

impl CertificateByProfileData {
    pub fn certificate(&self) -> Result<Certificate> {
        decode_certificate(&self.encoded_cert)
    }
}

pub type CertificateByProfile = ApiResponse<CertificateByProfileData>;

/// Decode a base64 DER certificate as returned in `encodedCert`.
pub fn decode_certificate(encoded: &str) -> Result<Certificate> {
    let encoded: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let der = BASE64_STANDARD
        .decode(encoded)
        .map_err(|e| Error::Certificate(format!("invalid base64: {e}")))?;
    Certificate::from_der(&der).map_err(|e| Error::Certificate(format!("invalid DER: {e}")))
}
