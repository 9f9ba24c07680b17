// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for REST calls.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests through reqwest for production
//! - Mock transports for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Reading the response body failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A file sent as a multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(FilePart),
}

/// A request relative to the API origin. Cloned when it has to be replayed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Body,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Get,
            path: path.into(),
            body: Body::Empty,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Delete,
            path: path.into(),
            body: Body::Empty,
        }
    }

    /// POST with a JSON body.
    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> TransportResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(ApiRequest {
            method: Method::Post,
            path: path.into(),
            body: Body::Json(value),
        })
    }

    pub fn multipart(path: impl Into<String>, part: FilePart) -> Self {
        ApiRequest {
            method: Method::Post,
            path: path.into(),
            body: Body::Multipart(part),
        }
    }
}

/// Raw response: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Body as text, for error messages.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport trait for REST-like communication.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with mock implementations. Takes `&self` so that
/// many requests can be in flight at once.
pub trait Transport: Send + Sync {
    /// Send `request`, with `token` as the `Authorization` header if present.
    fn send(
        &self,
        request: ApiRequest,
        token: Option<String>,
    ) -> Pin<Box<dyn Future<Output = TransportResult<ApiResponse>> + Send + '_>>;
}

/// HTTP transport implementation using reqwest.
pub struct ReqwestTransport {
    http: reqwest::Client,
    origin: String,
}

impl ReqwestTransport {
    /// Create a transport for the API rooted at `origin`.
    pub fn new(origin: &str, timeout: Duration) -> TransportResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(ReqwestTransport {
            http,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute URL for a path relative to the origin.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: ApiRequest,
        token: Option<String>,
    ) -> Pin<Box<dyn Future<Output = TransportResult<ApiResponse>> + Send + '_>> {
        Box::pin(async move {
            let url = self.url(&request.path);
            let mut builder = match request.method {
                Method::Get => self.http.get(&url),
                Method::Post => self.http.post(&url),
                Method::Delete => self.http.delete(&url),
            };

            if let Some(token) = token {
                builder = builder.header(reqwest::header::AUTHORIZATION, token);
            }

            builder = match request.body {
                Body::Empty => builder,
                Body::Json(value) => builder.json(&value),
                Body::Multipart(part) => {
                    let file = reqwest::multipart::Part::bytes(part.bytes)
                        .file_name(part.file_name)
                        .mime_str(&part.mime)
                        .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                    builder.multipart(reqwest::multipart::Form::new().part(part.field, file))
                }
            };

            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::RequestFailed(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;

            Ok(ApiResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}
