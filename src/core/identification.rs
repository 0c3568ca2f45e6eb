//! Payloads of BORICA's remote identification flow.
//!
//! A natural person is identified in a web (video or mobile) session, after
//! which a one-time certificate (OTC) is issued to sign documents in a
//! single sign session:
//!
//! 1. `POST /identification/web/websession/start` yields a [WebSession].
//! 2. `POST /identification/web/sessions/by-otc-request/{webSessionId}` with a
//!    [RegistrationRequest] yields a [Registration].
//! 3. `GET /identification/web/{resultId}/result/{processState}/{sessionId}`
//!    reports the outcome.
//! 4. `POST /identification/web/signsession/start` with an [OtcSignRequest]
//!    starts signing with the one-time certificate.
//!
//! Responses are kept as an [UntypedObject]. The identifiers the flow needs
//! are read through accessors that accept them either at the top level or
//! inside the `data` envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use url::Url;

use crate::{
    core::{language::Language, object::UntypedObject},
    utils::TextOrNumber,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSessionRequest {
    /// Notified by BORICA when the identification finishes.
    pub request_callback_url: Url,
    /// Shown to the person being identified.
    pub identification_reason: String,
}

/// Response of `POST /identification/web/websession/start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebSession(pub UntypedObject);

impl WebSession {
    pub fn web_session_id(&self) -> Option<&str> {
        enveloped(&self.0, "webSessionId")?.as_str()
    }

    /// Identifier to fetch the outcome with, see
    /// [IdentificationService::get_web_result](crate::client::IdentificationService::get_web_result).
    pub fn result_id(&self) -> Option<TextOrNumber> {
        match enveloped(&self.0, "resultId")? {
            Json::Number(n) => n.as_u64().map(TextOrNumber::Number),
            Json::String(s) => Some(TextOrNumber::Text(s.clone())),
            _ => None,
        }
    }
}

/// Body of `POST /identification/web/sessions/by-otc-request/{webSessionId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub cancel_url: Url,
    #[serde(default)]
    pub device_fingerprint: UntypedObject,
    #[serde(default)]
    pub external_ref: String,
    pub success_url: Url,
    pub user_language: Language,
    pub verify_email_address: bool,
    pub verify_phone_number: bool,
    /// Show the general terms and data protection notice.
    pub show_gtc_gdp: bool,
    pub show_main_info: bool,
}

impl RegistrationRequest {
    pub fn new(success_url: Url, cancel_url: Url) -> Self {
        Self {
            cancel_url,
            device_fingerprint: UntypedObject::default(),
            external_ref: String::new(),
            success_url,
            user_language: Language::Bg,
            verify_email_address: true,
            verify_phone_number: true,
            show_gtc_gdp: true,
            show_main_info: true,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.user_language = language;
        self
    }

    pub fn with_device_fingerprint(mut self, fingerprint: UntypedObject) -> Self {
        self.device_fingerprint = fingerprint;
        self
    }

    pub fn with_external_ref(mut self, external_ref: impl Into<String>) -> Self {
        self.external_ref = external_ref.into();
        self
    }

    pub fn verify_email_address(mut self, verify: bool) -> Self {
        self.verify_email_address = verify;
        self
    }

    pub fn verify_phone_number(mut self, verify: bool) -> Self {
        self.verify_phone_number = verify;
        self
    }

    pub fn show_gtc_gdp(mut self, show: bool) -> Self {
        self.show_gtc_gdp = show;
        self
    }

    pub fn show_main_info(mut self, show: bool) -> Self {
        self.show_main_info = show;
        self
    }
}

/// Response of `POST /identification/web/sessions/by-otc-request/{webSessionId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registration(pub UntypedObject);

impl Registration {
    pub fn session_id(&self) -> Option<&str> {
        enveloped(&self.0, "sessionId")?.as_str()
    }
}

/// Result of an identification or sign session. Its shape depends on the
/// process state it was requested for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebResult(pub UntypedObject);

/// Body of `POST /identification/web/signsession/start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtcSignRequest {
    /// Identifier of the identified person.
    pub identificator: String,
    pub sign_session_id: String,
    pub documents_for_sign: Vec<UntypedObject>,
    pub send_signed_documents_by_email: bool,
    pub success_url: Url,
    pub cancel_url: Url,
}

impl OtcSignRequest {
    pub fn new(
        identificator: impl Into<String>,
        sign_session_id: impl Into<String>,
        documents_for_sign: Vec<UntypedObject>,
        success_url: Url,
        cancel_url: Url,
    ) -> Self {
        Self {
            identificator: identificator.into(),
            sign_session_id: sign_session_id.into(),
            documents_for_sign,
            send_signed_documents_by_email: true,
            success_url,
            cancel_url,
        }
    }

    pub fn send_signed_documents_by_email(mut self, send: bool) -> Self {
        self.send_signed_documents_by_email = send;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtcSignSession(pub UntypedObject);

/// A field either at the top level or inside the `data` envelope.
fn enveloped<'a>(object: &'a UntypedObject, key: &str) -> Option<&'a Json> {
    object.0.get(key).or_else(|| object.0.get("data")?.get(key))
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn url(s: &str) -> Url {
        s.parse().unwrap()
    }

    #[test]
    fn registration_defaults() {
        let request = RegistrationRequest::new(
            url("https://rp.example.com/ok"),
            url("https://rp.example.com/cancel"),
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "cancelUrl": "https://rp.example.com/cancel",
                "deviceFingerprint": {},
                "externalRef": "",
                "successUrl": "https://rp.example.com/ok",
                "userLanguage": "bg",
                "verifyEmailAddress": true,
                "verifyPhoneNumber": true,
                "showGtcGdp": true,
                "showMainInfo": true,
            })
        );
    }

    #[test]
    fn web_session_keeps_unknown_fields() {
        let session: WebSession = serde_json::from_value(json!({
            "webSessionId": "ws-1",
            "resultId": 981,
            "redirectUrl": "https://idp.example/ws-1",
        }))
        .unwrap();
        assert_eq!(session.web_session_id(), Some("ws-1"));
        assert_eq!(session.result_id(), Some(TextOrNumber::Number(981)));
        assert_eq!(
            session.0.get_str("redirectUrl"),
            Some("https://idp.example/ws-1")
        );
    }

    #[test]
    fn enveloped_identifiers_are_found() {
        let session: WebSession = serde_json::from_value(json!({
            "data": { "webSessionId": "ws-1", "resultId": "r-1" },
            "responseCode": "OK",
            "code": "OK",
            "message": "ok"
        }))
        .unwrap();
        assert_eq!(session.web_session_id(), Some("ws-1"));
        assert_eq!(session.result_id(), Some(TextOrNumber::from("r-1")));

        let registration: Registration =
            serde_json::from_value(json!({ "data": { "sessionId": "s-1" } })).unwrap();
        assert_eq!(registration.session_id(), Some("s-1"));

        let registration: Registration = serde_json::from_value(json!({ "status": "PENDING" })).unwrap();
        assert_eq!(registration.session_id(), None);
    }

    #[test]
    fn otc_sign_request_wire_format() {
        let mut document = UntypedObject::new();
        document.insert("fileName", "contract.pdf");
        let request = OtcSignRequest::new(
            "7901010000",
            "ss-1",
            vec![document],
            url("https://rp.example.com/ok"),
            url("https://rp.example.com/cancel"),
        )
        .send_signed_documents_by_email(false);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["identificator"], "7901010000");
        assert_eq!(value["signSessionId"], "ss-1");
        assert_eq!(value["documentsForSign"], json!([{ "fileName": "contract.pdf" }]));
        assert_eq!(value["sendSignedDocumentsByEmail"], false);
    }
}
