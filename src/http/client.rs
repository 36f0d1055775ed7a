use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Instant;

use crate::auth::SharedSession;
use crate::config::ApiConfig;

use super::error::ApiError;
use super::response::ErrorBody;

/// Whether a call must carry the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Attach the token when signed in, send anonymously otherwise.
    Optional,
    /// Fail with [`ApiError::Unauthenticated`] before sending if signed out.
    Required,
}

/// Thin wrapper over `reqwest` that adds JSON and bearer headers and maps
/// failures into [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SharedSession,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: SharedSession) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|err| ApiError::Network(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path, auth)?;
        self.send_json(request).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B, auth: Auth) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::PUT, path, auth)?
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body);
        self.send_json(request).await
    }

    /// Multipart POST; the form sets its own boundary content type.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        auth: Auth,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path, auth)?.multipart(form);
        self.send_json(request).await
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> Result<RequestBuilder, ApiError> {
        let url = self.config.api_url(path);
        tracing::debug!(%method, %url, "dispatching request");

        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        apply_auth(builder, self.session.snapshot().bearer(), auth)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let started = Instant::now();
        let response = request.send().await.map_err(|err| {
            tracing::error!(error = %err, "request failed before a response arrived");
            ApiError::Network(err.to_string())
        })?;
        let response = check_status(response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Network(format!("Failed to read response: {err}")))?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            size = bytes.len(),
            "response received"
        );

        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

fn apply_auth(
    builder: RequestBuilder,
    bearer: Result<&str, ApiError>,
    auth: Auth,
) -> Result<RequestBuilder, ApiError> {
    match (bearer, auth) {
        (Ok(token), _) => Ok(builder.bearer_auth(token)),
        (Err(_), Auth::Optional) => Ok(builder),
        (Err(err), Auth::Required) => Err(err),
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.bytes().await.unwrap_or_default();
    let message = ErrorBody::message_from(&raw);
    tracing::warn!(status = status.as_u16(), message = ?message, "server rejected request");
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}
