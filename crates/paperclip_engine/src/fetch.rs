use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput, Resource};

const CATEGORIES_URL: &str =
    "https://raw.githubusercontent.com/leboncoin/paperclip/master/categories.json";
const ADS_URL: &str = "https://raw.githubusercontent.com/leboncoin/paperclip/master/listing.json";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            // raw.githubusercontent.com serves JSON as text/plain.
            allowed_content_types: vec![
                "application/json".to_string(),
                "text/plain".to_string(),
            ],
        }
    }
}

/// Where each [`Resource`] is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub categories_url: String,
    pub ads_url: String,
}

impl Endpoints {
    pub fn url(&self, resource: Resource) -> &str {
        match resource {
            Resource::Categories => &self.categories_url,
            Resource::Ads => &self.ads_url,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            categories_url: CATEGORIES_URL.to_string(),
            ads_url: ADS_URL.to_string(),
        }
    }
}

/// Retrieves the raw body of one resource.
///
/// Failure is always reported as an error, never as an empty body, so callers
/// can tell "zero results" from "could not fetch".
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, resource: Resource) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    endpoints: Endpoints,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings, endpoints: Endpoints) -> Self {
        Self {
            settings,
            endpoints,
        }
    }

    fn build_client(&self, resource: Resource) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(
                self.settings.redirect_limit,
            ))
            .build()
            .map_err(|err| FetchError::new(resource, FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, resource: Resource) -> Result<FetchOutput, FetchError> {
        let url = self.endpoints.url(resource);
        let parsed = reqwest::Url::parse(url).map_err(|err| {
            FetchError::new(resource, FailureKind::InvalidUrl, err.to_string())
        })?;
        let client = self.build_client(resource)?;

        engine_debug!("GET {} for {}", parsed, resource);
        let response = client
            .get(parsed)
            .send()
            .await
            .map_err(|err| map_reqwest_error(resource, err))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::new(
                resource,
                FailureKind::NotFound,
                format!("{url} returned {status}"),
            ));
        }
        if !status.is_success() {
            return Err(FetchError::new(
                resource,
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    resource,
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                engine_warn!("{} served unexpected content type {}", resource, ct);
                return Err(FetchError::new(
                    resource,
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| map_reqwest_error(resource, err))?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    resource,
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let metadata = FetchMetadata {
            resource,
            original_url: url.to_string(),
            final_url,
            content_type,
            byte_len: bytes.len() as u64,
        };
        engine_debug!("{} fetched: {} bytes", resource, metadata.byte_len);

        Ok(FetchOutput { bytes, metadata })
    }
}

fn map_reqwest_error(resource: Resource, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(resource, FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(resource, FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(resource, FailureKind::Network, err.to_string())
}
