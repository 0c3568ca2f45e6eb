use std::{fmt, sync::Arc};

use http::{
    header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE},
    HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{
    config::{BaseUrl, Config},
    core::{identity::Identity, response::ErrorBody, util::AsyncHttpClient},
    error::{Error, Result},
};

/// Header identifying the relying party on every call.
pub const RELYING_PARTY_ID: HeaderName = HeaderName::from_static("relyingpartyid");

const APPLICATION_JSON: &str = "application/json";

/// Shapes every call to the API: absolute URL, default headers, status mapping.
#[derive(Clone)]
pub(crate) struct Transport {
    base_url: BaseUrl,
    default_headers: HeaderMap,
    http_client: Arc<dyn AsyncHttpClient + Send + Sync>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(
        config: &Config,
        http_client: Arc<dyn AsyncHttpClient + Send + Sync>,
    ) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        default_headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(config.default_language.as_str()),
        );
        default_headers.insert(
            RELYING_PARTY_ID,
            HeaderValue::from_str(&config.relying_party_id)?,
        );

        Ok(Self {
            base_url: config.base_url.clone(),
            default_headers,
            http_client,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        let body = self
            .execute(Method::GET, path, HeaderMap::new(), Vec::new())
            .await?;
        serde_json::from_slice(&body).map_err(Error::Deserialization)
    }

    /// GET a binary payload, returned as is.
    pub(crate) async fn get_bytes(&self, path: &[&str]) -> Result<Vec<u8>> {
        self.execute(Method::GET, path, HeaderMap::new(), Vec::new())
            .await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &[&str],
        body: &B,
        identity: Option<&Identity>,
    ) -> Result<T> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        if let Some(identity) = identity {
            let (name, value) = identity.to_header()?;
            headers.insert(name, value);
        }

        let body = serde_json::to_vec(body).map_err(Error::Serialization)?;
        let body = self.execute(Method::POST, path, headers, body).await?;
        serde_json::from_slice(&body).map_err(Error::Deserialization)
    }

    async fn execute(
        &self,
        method: Method,
        path: &[&str],
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let url = self.base_url.endpoint(path);

        let mut builder = Request::builder().method(method.clone()).uri(url.as_str());
        if let Some(request_headers) = builder.headers_mut() {
            request_headers.extend(self.default_headers.clone());
            request_headers.extend(headers);
        }
        let request = builder
            .body(body)
            .map_err(|e| Error::InvalidRequest(format!("unable to build request: {e}")))?;

        debug!("{method} {}", url.path());
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        let body = response.into_body();
        if !(status.is_client_error() || status.is_server_error()) {
            debug!("{method} {} -> {status}", url.path());
            return Ok(body);
        }

        warn!("{method} {} failed with {status}", url.path());
        Err(error_for_status(status, body))
    }
}

fn error_for_status(status: StatusCode, body: Vec<u8>) -> Error {
    match ErrorBody::parse(&body) {
        Some(ErrorBody { code, message }) => Error::Api {
            status,
            code,
            message,
        },
        None => Error::Http {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        },
    }
}
