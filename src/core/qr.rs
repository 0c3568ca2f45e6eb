use base64::prelude::*;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    core::{content::SignContent, response::ApiResponse, sign::Payer},
    utils::TextOrNumber,
};

/// Body of `POST /signviaqr`.
///
/// `qr_height` and `qr_width` size the returned QR image; BORICA picks a
/// default when they are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRequest {
    #[serde(default)]
    pub qr_height: Option<u32>,
    #[serde(default)]
    pub qr_width: Option<u32>,
    pub request: QrInnerRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrInnerRequest {
    pub content: SignContent,
    #[serde(default)]
    pub relying_party_callback_id: Option<TextOrNumber>,
    #[serde(rename = "callbackURL", default)]
    pub callback_url: Option<Url>,
    #[serde(default)]
    pub payer: Payer,
    #[serde(default)]
    pub is_login: bool,
}

impl QrRequest {
    pub fn new(content: SignContent) -> Self {
        Self {
            qr_height: None,
            qr_width: None,
            request: QrInnerRequest {
                content,
                relying_party_callback_id: None,
                callback_url: None,
                payer: Payer::default(),
                is_login: false,
            },
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.qr_width = Some(width);
        self.qr_height = Some(height);
        self
    }

    pub fn with_relying_party_callback_id(mut self, id: impl Into<TextOrNumber>) -> Self {
        self.request.relying_party_callback_id = Some(id.into());
        self
    }

    pub fn with_callback_url(mut self, url: Url) -> Self {
        self.request.callback_url = Some(url);
        self
    }

    pub fn with_payer(mut self, payer: Payer) -> Self {
        self.request.payer = payer;
        self
    }

    pub fn login(mut self) -> Self {
        self.request.is_login = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrAcceptedData {
    pub callback_id: String,
    /// Base64 encoded QR image.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub qr_image: String,
    /// The text encoded in the QR image.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub qr_plain: String,
    pub validity: String,
}

impl QrAcceptedData {
    /// Decode [QrAcceptedData::qr_image], `None` when BORICA sent no image.
    pub fn qr_image_bytes(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        if self.qr_image.is_empty() {
            return None;
        }
        Some(BASE64_STANDARD.decode(self.qr_image.trim()))
    }
}

/// Response of `POST /signviaqr`.
pub type QrAccepted = ApiResponse<QrAcceptedData>;

fn null_as_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_wire_format() {
        let request = QrRequest::new(SignContent::text("c", "f.txt", "t"))
            .with_size(200, 100)
            .with_relying_party_callback_id("rp-1");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["qrWidth"], 200);
        assert_eq!(value["qrHeight"], 100);
        assert_eq!(value["request"]["relyingPartyCallbackId"], "rp-1");
        assert_eq!(value["request"]["content"]["contentFormat"], "TEXT");
        assert_eq!(value["request"]["callbackURL"], serde_json::Value::Null);
    }

    #[test]
    fn missing_or_null_qr_fields_default_to_empty() {
        let data: QrAcceptedData = serde_json::from_value(json!({
            "callbackId": "cb-1",
            "qrImage": null,
            "validity": "2025-12-31",
        }))
        .unwrap();
        assert_eq!(data.qr_image, "");
        assert_eq!(data.qr_plain, "");
        assert!(data.qr_image_bytes().is_none());
    }

    #[test]
    fn qr_image_is_decoded() {
        let data: QrAcceptedData = serde_json::from_value(json!({
            "callbackId": "cb-1",
            "qrImage": "iVBORw==",
            "qrPlain": "https://qr.example/cb-1",
            "validity": "2025-12-31",
        }))
        .unwrap();
        assert_eq!(
            data.qr_image_bytes().unwrap().unwrap(),
            vec![0x89, b'P', b'N', b'G']
        );
    }
}
