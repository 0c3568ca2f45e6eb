use url::Url;

use crate::{
    core::identification::{
        OtcSignRequest, OtcSignSession, Registration, RegistrationRequest, WebResult, WebSession,
        WebSessionRequest,
    },
    error::Result,
    utils::TextOrNumber,
};

use super::{non_empty, transport::Transport};

/// Remote identification and one-time certificate signing.
#[derive(Debug, Clone, Copy)]
pub struct IdentificationService<'a> {
    transport: &'a Transport,
}

impl<'a> IdentificationService<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Initiate a web identification session.
    pub async fn start_web_session(
        &self,
        request_callback_url: Url,
        identification_reason: impl Into<String>,
    ) -> Result<WebSession> {
        let request = WebSessionRequest {
            request_callback_url,
            identification_reason: identification_reason.into(),
        };
        self.transport
            .post(
                &["identification", "web", "websession", "start"],
                &request,
                None,
            )
            .await
    }

    /// Create a registration session for an OTC identification.
    pub async fn create_registration(
        &self,
        web_session_id: &str,
        request: &RegistrationRequest,
    ) -> Result<Registration> {
        non_empty("web_session_id", web_session_id)?;
        self.transport
            .post(
                &[
                    "identification",
                    "web",
                    "sessions",
                    "by-otc-request",
                    web_session_id,
                ],
                request,
                None,
            )
            .await
    }

    /// Fetch the result of an identification or sign session.
    ///
    /// `only_metadata`, when given, is appended as a trailing `true`/`false`
    /// path segment.
    pub async fn get_web_result(
        &self,
        result_id: &TextOrNumber,
        process_state: &str,
        session_id: &str,
        only_metadata: Option<bool>,
    ) -> Result<WebResult> {
        let result_id = result_id.to_string();
        non_empty("result_id", &result_id)?;
        non_empty("process_state", process_state)?;
        non_empty("session_id", session_id)?;

        let mut path = vec![
            "identification",
            "web",
            result_id.as_str(),
            "result",
            process_state,
            session_id,
        ];
        if let Some(only_metadata) = only_metadata {
            path.push(if only_metadata { "true" } else { "false" });
        }
        self.transport.get(&path).await
    }

    /// Begin an OTC signing session for a previously identified person.
    pub async fn start_otc_sign(&self, request: &OtcSignRequest) -> Result<OtcSignSession> {
        non_empty("identificator", &request.identificator)?;
        non_empty("sign_session_id", &request.sign_session_id)?;
        self.transport
            .post(
                &["identification", "web", "signsession", "start"],
                request,
                None,
            )
            .await
    }
}
