//! Error types and result handling for yomu operations.
//!
//! All fallible operations in yomu return a [`Result<T>`], a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Network Errors**: connection issues, timeouts, HTTP transport errors
//! - **Server Errors**: non-2xx responses from the library server
//! - **Not Found**: missing series, chapters, or images (404 responses)
//! - **JSON Errors**: deserialization failures on API responses
//! - **IO Errors**: file system or other IO operations
//!
//! Per the reading client's error policy, failures are caught at the call
//! site, logged, and surfaced to the user; nothing is retried.
//!
//! # Examples
//!
//! ```rust
//! use yomu::api::ApiClient;
//! use yomu::error::{Result, Error};
//!
//! # async fn example() -> Result<()> {
//! let client = ApiClient::new("http://localhost:5000");
//!
//! match client.series("missing-series").await {
//!     Ok(series) => println!("Found {}", series.name),
//!     Err(Error::NotFound(msg)) => println!("Not found: {}", msg),
//!     Err(Error::Network(e)) => println!("Network error: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Type alias for Results with yomu errors.
///
/// All public APIs in yomu return this Result type.
///
/// # Examples
///
/// ```rust
/// use yomu::{Result, Error};
///
/// fn example_operation() -> Result<String> {
///     Ok("Success".to_string())
/// }
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::not_found("Chapter 12"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all yomu operations.
///
/// Covers every failure mode of talking to the library server, from network
/// issues to unexpected response shapes. Each variant provides specific
/// context about what went wrong.
#[derive(Error, Debug)]
pub enum Error {
    /// Network-related errors from HTTP operations.
    ///
    /// Wraps errors from the underlying HTTP client (reqwest): connection
    /// timeouts, DNS resolution failures, TLS errors, and transport errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx responses from the library server, with the endpoint that
    /// produced them.
    ///
    /// 404 responses are mapped to [`NotFound`](Error::NotFound) instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yomu::Error;
    ///
    /// let error = Error::server("/api/settings", "HTTP 500 Internal Server Error");
    /// ```
    #[error("Server error [{endpoint}]: {message}")]
    Server { endpoint: String, message: String },

    /// Resource not found errors.
    ///
    /// Used when a requested series, chapter, or image does not exist on
    /// the server.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yomu::Error;
    ///
    /// let error = Error::not_found("Series 'one-piece'");
    /// let error = Error::not_found("Chapter 999 of 'one-piece'");
    /// ```
    #[error("Not found: {0}")]
    NotFound(String),

    /// File system and IO operation errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization and deserialization errors.
    ///
    /// Wraps serde_json errors from decoding API responses or encoding
    /// settings payloads.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error messages.
    ///
    /// Used for errors that do not fit any other category.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a server error for the given endpoint.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yomu::Error;
    ///
    /// let error = Error::server("/api/library", "HTTP 502 Bad Gateway");
    /// ```
    pub fn server(endpoint: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Server {
            endpoint: endpoint.into(),
            message: msg.into(),
        }
    }

    /// Creates a not found error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yomu::Error;
    ///
    /// let error = Error::not_found("Series 'abc123'");
    /// ```
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }
}
