//! This library provides a typed async client for BORICA's Cloud Qualified
//! Electronic Signature (CQES) API.
//!
//! # Usage
//!
//! ```ignore
//! use borica_cqes::{BoricaClient, Config, Identity, PollOptions, SignContent, SignRequest};
//! use borica_cqes::core::sign::SignTarget;
//!
//! let config = Config::new(
//!     "https://cqes-rpuat.b-trust.bg/signing-api/v2".parse()?,
//!     "rp-123",
//!     "/etc/rp/client.pem",
//!     "/etc/rp/client.key",
//! );
//! let client = BoricaClient::new(config)?;
//!
//! // Submit a document on behalf of a signer.
//! let request = SignRequest::single(SignContent::binary(
//!     "Sign the service contract",
//!     "contract.pdf",
//!     std::fs::read("contract.pdf")?,
//! ));
//! let accepted = client
//!     .signing()
//!     .send_sign_request(&request, &Identity::personal_id("7901010000"))
//!     .await?;
//!
//! // Wait for the signer to confirm on their phone.
//! let status = client
//!     .signing()
//!     .poll_until_signed(
//!         &SignTarget::CallbackId(accepted.data.callback_id),
//!         PollOptions::default(),
//!     )
//!     .await?;
//!
//! // Download the signed document.
//! for content_id in status.signed_content_ids() {
//!     let signed = client.signing().download_signed_content(content_id).await?;
//! }
//! ```
//!
//! [`SigningService::sign_and_download`] wraps these three steps.
//!
//! Callers without an async runtime can use [`BlockingClient`], which mirrors
//! every service method.
//!
//! # Signer Identity
//!
//! Every `POST /sign` carries the `rpToClientAuthorization` header naming the
//! signer in exactly one of four ways, see [`Identity`]. Callers holding
//! loosely collected inputs can convert an [`IdentityParams`] which rejects
//! zero or several identities with [`IdentityError`].
//!
//! A client token for [`Identity::ClientToken`] is obtained by exchanging a
//! profile id and OTP with [`CertificateService::get_client_token`].
//!
//! # Transport
//!
//! All calls go through the [`AsyncHttpClient`] trait. [`BoricaClient::new`]
//! uses [`ReqwestClient`], authenticating with the relying party's client
//! certificate (mutual TLS). Every request carries `accept`,
//! `Accept-language` and `relyingPartyID` headers.
//!
//! [`SigningService::sign_and_download`]: crate::client::SigningService::sign_and_download
//! [`CertificateService::get_client_token`]: crate::client::CertificateService::get_client_token
//! [`AsyncHttpClient`]: crate::core::util::AsyncHttpClient
//! [`ReqwestClient`]: crate::core::util::ReqwestClient

pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use client::{BlockingClient, BoricaClient, PollOptions};
pub use config::{BaseUrl, Config, TlsVerification};
pub use core::{
    content::{ContentFormat, HashAlgorithm, SignContent, SignatureType},
    identity::{Identity, IdentityParams},
    language::Language,
    sign::{Payer, SignRequest},
};
pub use error::{Error, IdentityError, Result};
