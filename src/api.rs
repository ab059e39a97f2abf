//! Typed client for the library server's JSON API.
//!
//! The backend owns the data: library scanning, chapter pairing, settings
//! persistence, and image serving all live server-side. This module wraps
//! its endpoints in typed methods:
//!
//! - `GET /api/library` — all series
//! - `GET /api/series/{name}` — one series with its chapter list
//! - `GET /api/chapter/{series}/{num}` — a chapter with pages and pairs
//! - `POST /api/chapter/{series}/{num}/offset` — flip dual-mode pairing
//! - `GET /api/settings` / `POST /api/settings` — reader preferences
//! - `GET /api/image/{id}` — page image bytes
//!
//! Every call is a single attempt: failures map to [`Error`](crate::Error)
//! and are surfaced by callers as a visible error state, never retried.
//!
//! # Examples
//!
//! ```rust
//! use yomu::api::ApiClient;
//!
//! # async fn example() -> yomu::Result<()> {
//! let client = ApiClient::new("http://localhost:5000");
//! let library = client.library().await?;
//! println!("{} series", library.len());
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    error::Result,
    types::{Chapter, Series, Settings},
};

/// Global HTTP client instance with optimized configuration.
///
/// Configured with a 30-second timeout, connection pooling, compression
/// support, and a custom User-Agent. Created lazily on first use and
/// shared by every [`ApiClient`] clone.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("Yomu/0.1.0")
        .pool_max_idle_per_host(10)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("Failed to build HTTP client")
});

/// Response payload of the settings POST endpoint.
#[derive(Debug, serde::Deserialize)]
struct SettingsUpdateResponse {
    #[allow(dead_code)]
    success: bool,
    settings: Settings,
}

/// Response payload of the offset toggle endpoint.
#[derive(Debug, serde::Deserialize)]
struct OffsetToggleResponse {
    has_offset: bool,
}

/// Client for one library server.
///
/// Holds only the server base URL: the reqwest client is global, so
/// `ApiClient` is cheap to clone and hand to background preload tasks.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the server at `base_url` (no trailing slash
    /// required).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yomu::api::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// The server base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches all series in the library.
    pub async fn library(&self) -> Result<Vec<Series>> {
        self.get_json("/api/library").await
    }

    /// Fetches one series with its chapter list.
    pub async fn series(&self, name: &str) -> Result<Series> {
        let endpoint = format!("/api/series/{}", urlencoding::encode(name));
        self.get_json(&endpoint).await
    }

    /// Fetches a chapter with its pages, spread pairs, and navigation info.
    pub async fn chapter(&self, series: &str, num: &str) -> Result<Chapter> {
        let endpoint = format!(
            "/api/chapter/{}/{}",
            urlencoding::encode(series),
            urlencoding::encode(num)
        );
        self.get_json(&endpoint).await
    }

    /// Toggles the dual-mode pairing offset for a chapter.
    ///
    /// Returns the new `has_offset` state as reported by the server. The
    /// reader reloads the chapter afterwards to pick up the new pairing;
    /// pairs are never recomputed locally.
    pub async fn toggle_offset(&self, series: &str, num: &str) -> Result<bool> {
        let endpoint = format!(
            "/api/chapter/{}/{}/offset",
            urlencoding::encode(series),
            urlencoding::encode(num)
        );
        let response: OffsetToggleResponse = self.post_json(&endpoint, &serde_json::json!({})).await?;
        Ok(response.has_offset)
    }

    /// Fetches the current reader settings.
    pub async fn settings(&self) -> Result<Settings> {
        self.get_json("/api/settings").await
    }

    /// Persists reader settings, returning them as the server stored them.
    pub async fn save_settings(&self, settings: &Settings) -> Result<Settings> {
        let response: SettingsUpdateResponse = self.post_json("/api/settings", settings).await?;
        Ok(response.settings)
    }

    /// Fetches raw page image bytes.
    ///
    /// Used by the preloader to warm the server's and client's caches near
    /// chapter boundaries; the TUI renders placeholders and does not decode
    /// the bytes.
    pub async fn page_image(&self, id: &str) -> Result<Bytes> {
        // Image ids are relative paths; their slashes are routing, not data.
        let endpoint = format!("/api/image/{}", id);
        let response = CLIENT
            .get(format!("{}{}", self.base_url, endpoint))
            .send()
            .await?;
        let response = Self::check_status(response, &endpoint)?;
        Ok(response.bytes().await?)
    }

    /// The URL a page image is served from, for external viewers.
    pub fn image_url(&self, id: &str) -> String {
        format!("{}/api/image/{}", self.base_url, id)
    }

    /// Performs a single GET request and decodes the JSON response.
    async fn get_json<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = CLIENT
            .get(format!("{}{}", self.base_url, endpoint))
            .send()
            .await?;
        let response = Self::check_status(response, endpoint)?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Performs a single POST request with a JSON body and decodes the
    /// JSON response.
    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        let response = CLIENT
            .post(format!("{}{}", self.base_url, endpoint))
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(response, endpoint)?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Maps non-success statuses: 404 to `NotFound`, the rest to `Server`.
    fn check_status(response: reqwest::Response, endpoint: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(crate::Error::not_found(endpoint.to_string()))
        } else {
            Err(crate::Error::server(endpoint, format!("HTTP {}", status)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = ApiClient::new("http://localhost:5000///");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_image_url_keeps_path_segments() {
        let client = ApiClient::new("http://localhost:5000");
        assert_eq!(
            client.image_url("one-piece/chapter-1/001.jpg"),
            "http://localhost:5000/api/image/one-piece/chapter-1/001.jpg"
        );
    }
}
