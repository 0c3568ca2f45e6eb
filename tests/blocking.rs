use std::time::Duration;

use borica_cqes::{
    core::{certificate::AuthRequest, sign::SignTarget},
    BlockingClient, Identity, PollOptions, SignContent, SignRequest,
};
use http::Method;
use serde_json::json;


use mock::{json, path, MockHttpClient, Recorded};

#[test]
fn blocking_sign_and_download() {
    let http_client = MockHttpClient::new(|request: &Recorded| {
        let p = request.path.as_str();
        if request.method == Method::POST && p == path("sign") {
            (
                202,
                json(json!({
                    "data": { "callbackId": "cb-1", "validity": "2026-10-16T12:05:00" },
                    "responseCode": "ACCEPTED",
                    "code": "ACCEPTED",
                    "message": "ok"
                })),
            )
        } else if p == path("sign/cb-1") {
            (
                200,
                json(json!({
                    "data": { "signatures": [{ "status": "SIGNED", "signature": "content-1" }] },
                    "responseCode": "COMPLETED",
                    "code": "COMPLETED",
                    "message": "ok"
                })),
            )
        } else if p == path("sign/content/content-1") {
            (200, b"signed".to_vec())
        } else {
            (404, Vec::new())
        }
    });
    let client = BlockingClient::from_async(mock::client(&http_client)).unwrap();

    let documents = client
        .signing()
        .sign_and_download(
            &SignRequest::single(SignContent::text("c", "f.txt", "t")),
            &Identity::personal_id("7901010000"),
            PollOptions::new(Duration::from_millis(5), Duration::from_secs(5)),
        )
        .unwrap();
    assert_eq!(documents[0].content, b"signed");

    let status = client
        .signing()
        .get_status(&SignTarget::CallbackId("cb-1".into()))
        .unwrap();
    assert!(status.is_completed());
    assert_eq!(http_client.requests().len(), 4);
}

#[test]
fn blocking_errors_are_returned() {
    let http_client = MockHttpClient::new(|_: &Recorded| {
        (
            401,
            json(json!({ "code": "INVALID_OTP", "message": "OTP expired" })),
        )
    });
    let client = BlockingClient::from_async(mock::client(&http_client)).unwrap();

    let err = client
        .certificates()
        .get_client_token(&AuthRequest::new("profile-1", 123456u32))
        .unwrap_err();
    assert_eq!(err.to_string(), "INVALID_OTP: OTP expired (HTTP 401 Unauthorized)");
}
