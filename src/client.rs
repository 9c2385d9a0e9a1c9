use std::{
    sync::atomic::{AtomicU64, Ordering},
    sync::Arc,
    time::Instant,
};

use bon::Builder;
use reqwest::Url;
use tracing::{debug, info};

use crate::{
    error::ClientError,
    paths::{API_URL_ENV, DEFAULT_API_URL},
};

#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub endpoint: Url,
    pub last_successful_request: Option<Instant>,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub last_error: Option<(Instant, String)>,
}

/// Client for the remote article service.
///
/// The service is a single endpoint: `GET` lists every article, `POST` carries
/// a `method` discriminator for mutations. It has no notion of credentials.
#[derive(Debug, Clone, Builder)]
pub struct ArticleService {
    pub(crate) endpoint: Url,
    #[builder(default = reqwest::Client::new())]
    pub(crate) http_client: reqwest::Client,
    #[builder(skip = Arc::new(AtomicU64::new(0)))]
    total_requests: Arc<AtomicU64>,
    #[builder(skip = Arc::new(AtomicU64::new(0)))]
    failed_requests: Arc<AtomicU64>,
    #[builder(skip = Arc::new(parking_lot::RwLock::new(None)))]
    last_successful_request: Arc<parking_lot::RwLock<Option<Instant>>>,
    #[builder(skip = Arc::new(parking_lot::RwLock::new(None)))]
    last_error: Arc<parking_lot::RwLock<Option<(Instant, String)>>>,
}

impl ArticleService {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        Ok(Self::builder().endpoint(endpoint).build())
    }

    /// Reads the endpoint from `ECG_API_URL`, falling back to the hub's own.
    pub fn load_from_env() -> Result<Self, ClientError> {
        match std::env::var(API_URL_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => {
                debug!("Using endpoint from {}", API_URL_ENV);
                Self::new(endpoint.trim())
            }
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Record a successful request
    pub(crate) fn record_success(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        *self.last_successful_request.write() = Some(Instant::now());
    }

    /// Record a failed request
    pub(crate) fn record_failure(&self, error: &str) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
        *self.last_error.write() = Some((Instant::now(), error.to_string()));
    }

    pub fn health_status(&self) -> HealthStatus {
        HealthStatus {
            endpoint: self.endpoint.clone(),
            last_successful_request: *self.last_successful_request.read(),
            total_requests: self.total_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            last_error: self.last_error.read().clone(),
        }
    }

    pub fn reset_health_metrics(&self) {
        self.total_requests.store(0, Ordering::Relaxed);
        self.failed_requests.store(0, Ordering::Relaxed);
        *self.last_successful_request.write() = None;
        *self.last_error.write() = None;
        info!("Request statistics reset");
    }
}
