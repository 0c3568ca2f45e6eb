use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    core::{content::SignContent, response::ApiResponse},
    utils::{NonEmptyVec, TextOrNumber},
};

/// `code` of a sign status response once every content item is signed.
pub const COMPLETED: &str = "COMPLETED";

/// Who is billed for the signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Payer {
    Client,
    #[default]
    RelyingParty,
}

/// Body of `POST /sign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    pub contents: NonEmptyVec<SignContent>,
    /// Relying party's own reference, usable with `GET /sign/rpcallbackid/{id}`.
    #[serde(default)]
    pub relying_party_callback_id: Option<TextOrNumber>,
    #[serde(rename = "callbackURL", default)]
    pub callback_url: Option<Url>,
    #[serde(default)]
    pub payer: Payer,
    #[serde(default)]
    pub is_login: bool,
}

impl SignRequest {
    pub fn new(contents: NonEmptyVec<SignContent>) -> Self {
        Self {
            contents,
            relying_party_callback_id: None,
            callback_url: None,
            payer: Payer::default(),
            is_login: false,
        }
    }

    /// A request for a single content item.
    pub fn single(content: SignContent) -> Self {
        Self::new(NonEmptyVec::new(content))
    }

    pub fn with_relying_party_callback_id(mut self, id: impl Into<TextOrNumber>) -> Self {
        self.relying_party_callback_id = Some(id.into());
        self
    }

    /// URL notified by BORICA when the signing completes.
    pub fn with_callback_url(mut self, url: Url) -> Self {
        self.callback_url = Some(url);
        self
    }

    pub fn with_payer(mut self, payer: Payer) -> Self {
        self.payer = payer;
        self
    }

    /// Mark the request as a login (authentication) rather than a document signature.
    pub fn login(mut self) -> Self {
        self.is_login = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignAcceptedData {
    /// Identifier to poll the status with.
    pub callback_id: String,
    pub validity: String,
}

/// Response of `POST /sign`.
pub type SignAccepted = ApiResponse<SignAcceptedData>;

/// Progress of a single content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignStatus {
    InProgress,
    Signed,
    /// A status this client does not know about, as sent.
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureItem {
    pub status: SignStatus,
    /// Content id of the signed document, to be used with `GET /sign/content/{id}`.
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub signature_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignStatusData {
    /// Signer certificate, base64.
    #[serde(default)]
    pub cert: Option<String>,
    pub signatures: Vec<SignatureItem>,
}

/// Response of `GET /sign/{callbackId}` and `GET /sign/rpcallbackid/{id}`.
///
/// While signing is in progress `data` may be missing or partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignStatusResponse {
    #[serde(default)]
    pub data: Option<SignStatusData>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SignStatusResponse {
    pub fn is_completed(&self) -> bool {
        self.code.as_deref() == Some(COMPLETED)
    }

    pub fn signatures(&self) -> &[SignatureItem] {
        self.data
            .as_ref()
            .map(|data| data.signatures.as_slice())
            .unwrap_or_default()
    }

    /// Content ids of the signed items, in request order.
    pub fn signed_content_ids(&self) -> impl Iterator<Item = &str> {
        self.signatures()
            .iter()
            .filter(|item| item.status == SignStatus::Signed)
            .filter_map(|item| item.signature.as_deref())
    }
}

/// Poll target of a sign request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignTarget {
    /// The `callbackId` returned by BORICA on submission.
    CallbackId(String),
    /// The `relyingPartyCallbackId` chosen by the relying party.
    RpCallbackId(String),
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn sign_request_wire_format() {
        let request = SignRequest::single(SignContent::text("c", "f.txt", "t"))
            .with_relying_party_callback_id(17u32)
            .with_callback_url("https://rp.example.com/cb".parse().unwrap());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["relyingPartyCallbackId"], 17);
        assert_eq!(value["callbackURL"], "https://rp.example.com/cb");
        assert_eq!(value["payer"], "RELYING_PARTY");
        assert_eq!(value["isLogin"], false);
        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_contents_are_rejected() {
        let result = serde_json::from_value::<SignRequest>(json!({ "contents": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn in_progress_status_without_data() {
        let status: SignStatusResponse =
            serde_json::from_value(json!({ "code": "IN_PROGRESS", "data": null })).unwrap();
        assert!(!status.is_completed());
        assert!(status.signatures().is_empty());
    }

    #[test]
    fn completed_status() {
        let status: SignStatusResponse = serde_json::from_value(json!({
            "data": {
                "cert": "MIIB",
                "signatures": [
                    { "status": "SIGNED", "signature": "content-1", "signatureType": "SIGNATURE" },
                    { "status": "IN_PROGRESS" },
                    { "status": "REJECTED" }
                ]
            },
            "responseCode": "COMPLETED",
            "code": "COMPLETED",
            "message": "ok"
        }))
        .unwrap();
        assert!(status.is_completed());
        assert_eq!(
            status.signatures()[2].status,
            SignStatus::Other("REJECTED".into())
        );
        assert_eq!(
            serde_json::to_value(&status.signatures()[2]).unwrap()["status"],
            "REJECTED"
        );
        assert_eq!(
            status.signed_content_ids().collect::<Vec<_>>(),
            vec!["content-1"]
        );
    }
}
