use std::time::Duration;

use http::{header::InvalidHeaderValue, StatusCode};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the CQES client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The `rpToClientAuthorization` identity could not be determined.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Caller input violates a precondition checked before any request is sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A header value contains characters that cannot be sent over HTTP.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// The request payload could not be serialized to JSON.
    #[error("unable to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("unable to deserialize response body: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The API returned a non-success status without a structured error body.
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// The API returned a non-success status with a `code` and `message`.
    #[error("{code}: {message} (HTTP {status})")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },

    /// A successful response did not carry what the operation needs.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Signing did not complete before the polling deadline.
    #[error("polling timed out after {0:?}")]
    PollTimeout(Duration),

    /// The HTTP round trip failed before a response was received.
    #[error("http transport failure: {0:#}")]
    Transport(#[source] anyhow::Error),

    /// The HTTP client could not be built, e.g. unreadable client certificate.
    #[error("unable to configure http client: {0:#}")]
    Setup(#[source] anyhow::Error),

    /// Configuration is incomplete or holds an unusable value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A certificate returned by the API could not be decoded.
    #[error("certificate decoding failed: {0}")]
    Certificate(String),
}

impl Error {
    /// The HTTP status of the failed call, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Exactly one identity method must accompany a sign request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("no identity supplied, specify exactly one of: personal_id, profile_id_with_otp, client_token, cert_id")]
    Missing,

    #[error("conflicting identities supplied ({}), specify exactly one", .0.join(", "))]
    Conflicting(Vec<&'static str>),
}
