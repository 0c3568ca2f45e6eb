use tracing::{debug, warn};

use crate::{
    core::{
        identity::Identity,
        qr::{QrAccepted, QrRequest},
        sign::{SignAccepted, SignRequest, SignStatus, SignStatusResponse, SignTarget},
    },
    error::{Error, Result},
};

use super::{
    non_empty,
    poll::{poll, PollOptions, Step},
    transport::Transport,
};

/// A signed document downloaded after completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDocument {
    /// Content id the document was downloaded with.
    pub content_id: String,
    pub signature_type: Option<String>,
    pub content: Vec<u8>,
}

/// Submitting, tracking and downloading signatures.
#[derive(Debug, Clone, Copy)]
pub struct SigningService<'a> {
    transport: &'a Transport,
}

impl<'a> SigningService<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Submit a sign request via `POST /sign`.
    ///
    /// The returned `callback_id` is used to poll for completion.
    pub async fn send_sign_request(
        &self,
        request: &SignRequest,
        identity: &Identity,
    ) -> Result<SignAccepted> {
        debug!(
            "submitting sign request with {} content item(s)",
            request.contents.len()
        );
        self.transport
            .post(&["sign"], request, Some(identity))
            .await
    }

    /// `GET /sign/{callbackId}`
    pub async fn get_sign_result(&self, callback_id: &str) -> Result<SignStatusResponse> {
        non_empty("callback_id", callback_id)?;
        self.transport.get(&["sign", callback_id]).await
    }

    /// `GET /sign/rpcallbackid/{rpCallbackId}`
    pub async fn get_sign_result_by_rp_callback_id(
        &self,
        rp_callback_id: &str,
    ) -> Result<SignStatusResponse> {
        non_empty("rp_callback_id", rp_callback_id)?;
        self.transport
            .get(&["sign", "rpcallbackid", rp_callback_id])
            .await
    }

    pub async fn get_status(&self, target: &SignTarget) -> Result<SignStatusResponse> {
        match target {
            SignTarget::CallbackId(id) => self.get_sign_result(id).await,
            SignTarget::RpCallbackId(id) => self.get_sign_result_by_rp_callback_id(id).await,
        }
    }

    /// Poll the sign status until its `code` is `COMPLETED`.
    ///
    /// # Errors
    /// [Error::PollTimeout] when the signer has not confirmed in time.
    pub async fn poll_until_signed(
        &self,
        target: &SignTarget,
        options: PollOptions,
    ) -> Result<SignStatusResponse> {
        let service = *self;
        poll(options, move || async move {
            let status = service.get_status(target).await?;
            Ok(if status.is_completed() {
                Step::Done(status)
            } else {
                Step::Pending
            })
        })
        .await
    }

    /// Download a signed document via `GET /sign/content/{contentId}`.
    ///
    /// Content is retained by BORICA for ten years when it was submitted with
    /// `to_be_archived`, otherwise for seven days.
    pub async fn download_signed_content(&self, content_id: &str) -> Result<Vec<u8>> {
        non_empty("content_id", content_id)?;
        self.transport
            .get_bytes(&["sign", "content", content_id])
            .await
    }

    /// Start a QR signing flow via `POST /signviaqr`.
    pub async fn send_sign_request_via_qr(&self, request: &QrRequest) -> Result<QrAccepted> {
        self.transport.post(&["signviaqr"], request, None).await
    }

    /// Submit, wait for the signer to confirm, then download every signed document.
    pub async fn sign_and_download(
        &self,
        request: &SignRequest,
        identity: &Identity,
        options: PollOptions,
    ) -> Result<Vec<SignedDocument>> {
        let accepted = self.send_sign_request(request, identity).await?;
        let target = SignTarget::CallbackId(accepted.data.callback_id);
        let status = self.poll_until_signed(&target, options).await?;

        let mut documents = Vec::new();
        for item in status.signatures() {
            if item.status != SignStatus::Signed {
                warn!("skipping signature item in state {:?}", item.status);
                continue;
            }
            let Some(content_id) = item.signature.as_deref() else {
                warn!("completed signature item has no content id, skipping");
                continue;
            };
            let content = self.download_signed_content(content_id).await?;
            documents.push(SignedDocument {
                content_id: content_id.to_owned(),
                signature_type: item.signature_type.clone(),
                content,
            });
        }

        if documents.is_empty() {
            return Err(Error::UnexpectedResponse(
                "signing completed without any signed content".into(),
            ));
        }
        Ok(documents)
    }
}
