use reqwest::{header, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    client::ArticleService,
    error::{ClientError, ResponseError},
};

/// A single call against the article endpoint.
pub struct HttpRequest {
    method: Method,
    body: Option<serde_json::Value>,
    custom_headers: HashMap<String, String>,
}

impl HttpRequest {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            custom_headers: HashMap::new(),
        }
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            body: None,
            custom_headers: HashMap::new(),
        }
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(key.into(), value.into());
        self
    }
}

#[async_trait::async_trait]
pub trait HttpClient {
    async fn request<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ClientError>;
    async fn request_json(&self, req: HttpRequest) -> Result<serde_json::Value, ClientError>;
    async fn request_empty(&self, req: HttpRequest) -> Result<(), ClientError>;
}

#[async_trait::async_trait]
impl HttpClient for ArticleService {
    async fn request<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ClientError> {
        let res = self.execute_request(req).await?;
        let text = res.text().await?;
        Ok(serde_json::from_str::<T>(&text)?)
    }

    async fn request_json(&self, req: HttpRequest) -> Result<serde_json::Value, ClientError> {
        self.request::<serde_json::Value>(req).await
    }

    async fn request_empty(&self, req: HttpRequest) -> Result<(), ClientError> {
        self.execute_request(req).await?;
        Ok(())
    }
}

impl ArticleService {
    /// Sends one request. Failures are returned as-is, nothing is retried.
    #[instrument(skip(self, req), fields(method = %req.method, endpoint = %self.endpoint))]
    async fn execute_request(&self, req: HttpRequest) -> Result<Response, ClientError> {
        match self.execute_single_request(&req).await {
            Ok(response) => {
                info!("HTTP request completed successfully");
                self.record_success();
                Ok(response)
            }
            Err(e) => {
                error!("HTTP request failed: {}", e);
                self.record_failure(&e.to_string());
                Err(e)
            }
        }
    }

    async fn execute_single_request(&self, req: &HttpRequest) -> Result<Response, ClientError> {
        let url = self.endpoint.clone();

        let mut request_builder = match req.method {
            Method::GET => self.http_client.get(url),
            Method::POST => self.http_client.post(url),
            _ => {
                return Err(ResponseError::invalid(format!(
                    "Unsupported HTTP method: {:?}",
                    req.method
                ))
                .into())
            }
        };

        request_builder =
            request_builder.header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());

        for (key, value) in &req.custom_headers {
            request_builder = request_builder.header(key, value);
        }

        if let Some(body) = &req.body {
            debug!("Adding JSON body to request");
            request_builder = request_builder.json(body);
        }

        debug!("Sending HTTP request");
        let res = request_builder.send().await.map_err(|e| {
            warn!("Network error occurred: {}", e);
            ClientError::RequestError(e)
        })?;

        let status = res.status();
        if !status.is_success() {
            warn!(
                "Received HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            let body_text = res.text().await.unwrap_or_default();
            return Err(ResponseError::http_status(status, body_text).into());
        }

        debug!("HTTP request completed with status: {}", status);

        Ok(res)
    }
}
