//! Client for a Nominatim-shaped forward-geocoding service.
//!
//! Resolves a free-form place string to a `(lat, lon)` pair. Timeouts and
//! transport errors are reported to the caller as `Ok(None)` on the "not
//! found" path is the orchestrator's job, not this client's: this client
//! only distinguishes "upstream gave us nothing" from "the request itself
//! failed".

use crate::{ApiError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for a forward-geocoding service.
#[derive(Clone)]
pub struct GeocoderClient {
    client: Client,
    base_url: String,
}

impl GeocoderClient {
    /// Create a new client.
    ///
    /// `contact` is sent as the `User-Agent`, per Nominatim's usage policy;
    /// callers should pass something identifying the deployment and an
    /// operator contact, not a generic string.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` cannot be built, which
    /// only happens if the TLS backend fails to initialize.
    #[must_use]
    pub fn new(contact: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(contact.into())
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(any(test, feature = "test-util"))]
    #[doc(hidden)]
    pub fn with_base_url(contact: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(contact);
        client.base_url = base_url.into();
        client
    }

    /// Resolve a free-form query to the first geocoder match, if any.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Option<GeocodeMatch>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let body = response.text().await?;
        let matches: Vec<GeocodeMatch> = serde_json::from_str(&body)?;
        Ok(matches.into_iter().next())
    }
}

/// A single forward-geocoding result.
///
/// Nominatim returns `lat`/`lon` as JSON strings, not numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeMatch {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}
