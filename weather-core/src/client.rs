//! HTTP client for the dashboard API.
//!
//! Each call is a single GET with a fixed timeout. Failures are returned to
//! the caller as-is: no retry, no fallback value.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    config::ClientSettings,
    model::{HealthStatus, WeatherReport},
};

/// Country filter applied by [`WeatherApi::get_by_city`] when none is given.
pub const DEFAULT_COUNTRY: &str = "AU";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("City name must not be empty")]
    EmptyCity,

    #[error("Request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status { url: String, status: StatusCode, body: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Read operations offered by the dashboard API.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// `GET /api/weather/`: every configured location.
    async fn get_all(&self) -> Result<Vec<WeatherReport>, ApiError>;

    /// `GET /api/weather/{city}?country=..`, country defaulting to [`DEFAULT_COUNTRY`].
    async fn get_by_city(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<WeatherReport, ApiError>;

    /// `GET /api/health`
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpWeatherApi {
    base_url: Url,
    http: Client,
}

impl HttpWeatherApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: settings.base_url.clone(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: settings.base_url.clone(),
                reason: "not a base URL".to_string(),
            });
        }

        let http = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always has a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        debug!(url = %url, "GET");

        let res = self.http.get(url.clone()).query(query).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout { url: url.to_string(), source: e }
            } else {
                ApiError::Transport(e)
            }
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout { url: url.to_string(), source: e }
            } else {
                ApiError::Transport(e)
            }
        })?;

        debug!(url = %url, status = %status, bytes = body.len(), "response");

        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|source| ApiError::Decode { url: url.to_string(), source })
    }
}

#[async_trait]
impl WeatherApi for HttpWeatherApi {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<WeatherReport>, ApiError> {
        // Trailing slash is part of the route.
        let url = self.endpoint(&["api", "weather", ""]);
        self.get_json(url, &[]).await
    }

    #[instrument(skip(self))]
    async fn get_by_city(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<WeatherReport, ApiError> {
        // An empty segment would hit the collection route instead.
        if city.trim().is_empty() {
            return Err(ApiError::EmptyCity);
        }

        let url = self.endpoint(&["api", "weather", city]);
        let country = country.unwrap_or(DEFAULT_COUNTRY);
        self.get_json(url, &[("country", country)]).await
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&["api", "health"]);
        self.get_json(url, &[]).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
