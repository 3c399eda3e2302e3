//! API transport client.
//!
//! Issues HTTP requests against the configured base URL with the default
//! header set, enforces the 15-second timeout, and converts every failure
//! mode into a typed [`ApiError`]:
//!
//! - non-2xx response → [`ApiError::Status`] with the HTTP status and the
//!   structured detail payload when the body carries one;
//! - timeout or connection fault → [`ApiError::Timeout`] /
//!   [`ApiError::Network`], both reporting status `0`;
//! - undecodable 2xx body → [`ApiError::Decode`].
//!
//! Callers distinguish authorization failures (401/403) from everything else
//! through [`ApiError::is_auth_error`].

use std::time::Duration;

use reqwest::{
    Method, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::{ApiEnvironment, REQUEST_TIMEOUT},
    error::{ApiError, ApiResult, ErrorDetail},
};

/// HTTP client for the dashboard backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ApiClient {
    /// Client over an explicit base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Client for one of the configured environments.
    pub fn from_environment(environment: ApiEnvironment) -> ApiResult<Self> {
        Self::new(environment.base_url())
    }

    /// Client with an explicit timeout. Production code uses
    /// [`REQUEST_TIMEOUT`]; tests shorten it.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    /// Attach a bearer token to every subsequent request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute(Method::PATCH, path, Some(body)).await
    }

    /// DELETE returning no payload. The response body, if any, is discarded.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.send(Method::DELETE, path, None::<&()>).await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn execute<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let response = self.send(method, path, body).await?;
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Network(e.to_string())
            }
        })
    }

    /// Pass 2xx responses through; turn everything else into
    /// [`ApiError::Status`] with the detail payload when the body has one.
    async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status: StatusCode = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorDetail>(&body).ok())
            .filter(|detail| *detail != ErrorDetail::default());

        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}
