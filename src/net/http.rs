//! Request values and the transport seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiRequest` is a plain value so request-rewriting steps (the bearer
//! authenticator) can clone and amend it without touching the caller's copy.
//! `Transport` is the only place bytes leave the client: `BrowserTransport`
//! uses `gloo-net` under `hydrate`, tests substitute recording fakes.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::Serialize;

use super::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// An outgoing HTTP request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, already encoded.
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Encode `payload` as the JSON body and set `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `payload` cannot be serialized.
    pub fn json<T: Serialize>(self, payload: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        let mut request = self.with_header("Content-Type", "application/json");
        request.body = Some(body);
        Ok(request)
    }

    /// Set `name` to `value`, replacing any existing header of that name
    /// (case-insensitive).
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Look up a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests. Futures are `!Send`; the client is single-threaded.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Perform `request` and return whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when no response was received. Non-2xx
    /// statuses are not errors at this layer.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `fetch`-backed transport for the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let outgoing = match &request.body {
                Some(body) => builder.body(body.as_str()),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            log::debug!("http: {} {}", request.method.as_str(), request.url);
            let resp = outgoing.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::debug!("http: {} {} skipped outside the browser", request.method.as_str(), request.url);
            Err(ApiError::Unavailable)
        }
    }
}
