//! The `rpToClientAuthorization` header, identifying the signer on whose
//! behalf a relying party submits a sign request.
//!
//! BORICA accepts four mutually exclusive encodings:
//!
//! | identity                       | header value                 |
//! |--------------------------------|------------------------------|
//! | personal identification number | `personalId:{id}`            |
//! | profile id + one-time password | `profileId:{profileId}:{otp}` |
//! | client token (see `/auth`)     | `clientToken:{token}`        |
//! | certificate id                 | `certId:{id}`                |

use std::fmt;

use http::{HeaderName, HeaderValue};

use crate::{
    error::{Error, IdentityError},
    utils::TextOrNumber,
};

/// Header carrying the signer identity. Header names are case-insensitive on
/// the wire; `http` requires them in lowercase.
pub const RP_TO_CLIENT_AUTHORIZATION: HeaderName =
    HeaderName::from_static("rptoclientauthorization");

/// The signer identity of a sign request.
#[derive(Clone, PartialEq, Eq)]
pub enum Identity {
    /// Personal identification number (EGN/LNC) of the signer.
    PersonalId(String),
    /// BORICA profile id together with the OTP sent to the signer.
    ProfileOtp {
        profile_id: String,
        otp: TextOrNumber,
    },
    /// Token obtained through the `/auth` exchange.
    ClientToken(String),
    /// Identifier of the signer's cloud certificate.
    CertId(TextOrNumber),
}

impl Identity {
    pub fn personal_id(id: impl Into<String>) -> Self {
        Self::PersonalId(id.into())
    }

    pub fn profile_otp(profile_id: impl Into<String>, otp: impl Into<TextOrNumber>) -> Self {
        Self::ProfileOtp {
            profile_id: profile_id.into(),
            otp: otp.into(),
        }
    }

    pub fn client_token(token: impl Into<String>) -> Self {
        Self::ClientToken(token.into())
    }

    pub fn cert_id(id: impl Into<TextOrNumber>) -> Self {
        Self::CertId(id.into())
    }

    /// The raw header value, e.g. `clientToken:abc`.
    pub fn header_value(&self) -> String {
        match self {
            Identity::PersonalId(id) => format!("personalId:{id}"),
            Identity::ProfileOtp { profile_id, otp } => format!("profileId:{profile_id}:{otp}"),
            Identity::ClientToken(token) => format!("clientToken:{token}"),
            Identity::CertId(id) => format!("certId:{id}"),
        }
    }

    pub(crate) fn to_header(&self) -> Result<(HeaderName, HeaderValue), Error> {
        let mut value = HeaderValue::from_str(&self.header_value())?;
        if matches!(self, Identity::ProfileOtp { .. } | Identity::ClientToken(_)) {
            value.set_sensitive(true);
        }
        Ok((RP_TO_CLIENT_AUTHORIZATION, value))
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::PersonalId(id) => f.debug_tuple("PersonalId").field(id).finish(),
            Identity::ProfileOtp { profile_id, .. } => f
                .debug_struct("ProfileOtp")
                .field("profile_id", profile_id)
                .field("otp", &"<redacted>")
                .finish(),
            Identity::ClientToken(_) => f.debug_tuple("ClientToken").field(&"<redacted>").finish(),
            Identity::CertId(id) => f.debug_tuple("CertId").field(id).finish(),
        }
    }
}

/// Loosely collected identity inputs, e.g. from a form or CLI flags, of which
/// exactly one must be set.
#[derive(Clone, Default)]
pub struct IdentityParams {
    pub personal_id: Option<String>,
    pub profile_id_with_otp: Option<(String, TextOrNumber)>,
    pub client_token: Option<String>,
    pub cert_id: Option<TextOrNumber>,
}

impl fmt::Debug for IdentityParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityParams")
            .field("personal_id", &self.personal_id)
            .field(
                "profile_id_with_otp",
                &self
                    .profile_id_with_otp
                    .as_ref()
                    .map(|(profile_id, _)| (profile_id, "<redacted>")),
            )
            .field("client_token", &self.client_token.as_ref().map(|_| "<redacted>"))
            .field("cert_id", &self.cert_id)
            .finish()
    }
}

impl TryFrom<IdentityParams> for Identity {
    type Error = IdentityError;

    fn try_from(params: IdentityParams) -> Result<Self, Self::Error> {
        let IdentityParams {
            personal_id,
            profile_id_with_otp,
            client_token,
            cert_id,
        } = params;

        let mut supplied = Vec::new();
        if personal_id.is_some() {
            supplied.push("personal_id");
        }
        if profile_id_with_otp.is_some() {
            supplied.push("profile_id_with_otp");
        }
        if client_token.is_some() {
            supplied.push("client_token");
        }
        if cert_id.is_some() {
            supplied.push("cert_id");
        }
        if supplied.len() > 1 {
            return Err(IdentityError::Conflicting(supplied));
        }

        if let Some(id) = personal_id {
            Ok(Identity::PersonalId(id))
        } else if let Some((profile_id, otp)) = profile_id_with_otp {
            Ok(Identity::ProfileOtp { profile_id, otp })
        } else if let Some(token) = client_token {
            Ok(Identity::ClientToken(token))
        } else if let Some(id) = cert_id {
            Ok(Identity::CertId(id))
        } else {
            Err(IdentityError::Missing)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_encodings() {
        assert_eq!(
            Identity::personal_id("7901010000").header_value(),
            "personalId:7901010000"
        );
        assert_eq!(
            Identity::profile_otp("PROFILE-1", 123456u32).header_value(),
            "profileId:PROFILE-1:123456"
        );
        assert_eq!(
            Identity::profile_otp("PROFILE-1", "012345").header_value(),
            "profileId:PROFILE-1:012345"
        );
        assert_eq!(
            Identity::client_token("token-xyz").header_value(),
            "clientToken:token-xyz"
        );
        assert_eq!(Identity::cert_id(42u32).header_value(), "certId:42");
    }

    #[test]
    fn exactly_one_identity_is_accepted() {
        let identity = Identity::try_from(IdentityParams {
            client_token: Some("token-xyz".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(identity, Identity::client_token("token-xyz"));

        let identity = Identity::try_from(IdentityParams {
            profile_id_with_otp: Some(("p".into(), 1u32.into())),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(identity, Identity::profile_otp("p", 1u32));
    }

    #[test]
    fn missing_identity_is_rejected() {
        assert_eq!(
            Identity::try_from(IdentityParams::default()).unwrap_err(),
            IdentityError::Missing
        );
    }

    #[test]
    fn conflicting_identities_are_rejected() {
        let err = Identity::try_from(IdentityParams {
            personal_id: Some("7901010000".into()),
            client_token: Some("token".into()),
            cert_id: Some(3u32.into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            IdentityError::Conflicting(vec!["personal_id", "client_token", "cert_id"])
        );
        assert!(err.to_string().contains("personal_id, client_token, cert_id"));
    }

    #[test]
    fn secrets_are_redacted() {
        let debug = format!("{:?}", Identity::profile_otp("PROFILE-1", "654321"));
        assert!(debug.contains("PROFILE-1"));
        assert!(!debug.contains("654321"));

        let debug = format!("{:?}", Identity::client_token("secret-token"));
        assert!(!debug.contains("secret-token"));

        let debug = format!(
            "{:?}",
            IdentityParams {
                profile_id_with_otp: Some(("PROFILE-1".into(), "654321".into())),
                client_token: Some("secret-token".into()),
                ..Default::default()
            }
        );
        assert!(debug.contains("PROFILE-1"));
        assert!(!debug.contains("654321"));
        assert!(!debug.contains("secret-token"));

        let (name, value) = Identity::client_token("t").to_header().unwrap();
        assert_eq!(name, RP_TO_CLIENT_AUTHORIZATION);
        assert!(value.is_sensitive());
    }

    #[test]
    fn header_value_must_be_visible_ascii() {
        let err = Identity::client_token("bad\ntoken").to_header().unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }
}
