//! HTTP client implementation
//!
//! This module provides the core HTTP adapter for the SDK: URL building,
//! request/response logging, and error normalization. Requests are never retried.

use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use reqwest::{header, Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// The HTTP client for making API requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<SdkConfig>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        for (name, value) in &config.custom_headers {
            let name = header::HeaderName::try_from(name.as_str())
                .map_err(|e| SdkError::Configuration(format!("Invalid header name: {}", e)))?;
            let value = header::HeaderValue::try_from(value.as_str())
                .map_err(|e| SdkError::Configuration(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| SdkError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Build the full URL for an endpoint. Trailing slashes in `path` are kept.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_root(),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        let text = self.send_text(Method::GET, path, Option::<()>::None).await?;
        decode(&text)
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: B,
    ) -> SdkResult<T> {
        let text = self.send_text(Method::POST, path, Some(body)).await?;
        decode(&text)
    }

    /// Make a DELETE request. Any success body is discarded.
    pub async fn delete(&self, path: &str) -> SdkResult<()> {
        self.send(Method::DELETE, path, Option::<()>::None).await?;
        Ok(())
    }

    /// Make a GET request and return the raw body bytes
    pub async fn get_bytes(&self, path: &str) -> SdkResult<Vec<u8>> {
        let response = self.send(Method::GET, path, Option::<()>::None).await?;
        let bytes = response.bytes().await.map_err(SdkError::from_transport)?;
        debug!(bytes = bytes.len(), "Received binary body");
        Ok(bytes.to_vec())
    }

    async fn send_text<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> SdkResult<String> {
        let response = self.send(method, path, body).await?;
        let text = response.text().await.map_err(SdkError::from_transport)?;

        if self.config.enable_logging {
            debug!("Response body: {}", text);
        }

        Ok(text)
    }

    /// Send one request; non-success statuses are turned into [`SdkError::Api`].
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> SdkResult<Response> {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);

        if let Some(body) = body {
            let body_json = serde_json::to_string(&body)?;
            if self.config.enable_logging {
                debug!("Request body: {}", body_json);
            }
            request = request.body(body_json);
        }

        debug!("Request: {} {}", method, url);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, timeout = e.is_timeout(), "Request failed: {} {}", method, url);
                return Err(SdkError::from_transport(e));
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), "Response: {} {}", method, url);

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        if self.config.enable_logging {
            debug!("Error body: {}", text);
        }
        Err(SdkError::from_response(status.as_u16(), &text))
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> SdkResult<T> {
    serde_json::from_str(text).map_err(SdkError::from)
}
