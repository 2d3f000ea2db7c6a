use crate::storage::database::StoreError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// A file as returned by the GitHub contents API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContentResponse {
    /// Base64 file bytes, wrapped with newlines by GitHub.
    pub content: Option<String>,
    pub encoding: Option<String>,
    pub path: Option<String>,
    pub sha: Option<String>,
}

impl ContentResponse {
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            encoding: Some("base64".to_string()),
            path: None,
            sha: None,
        }
    }
}

/// The companion app's `package.json`. Only `version` matters here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReleaseManifest {
    pub version: String,
}

#[derive(Debug)]
pub enum UpdateError {
    ApiError(String),
    RequestError(reqwest::Error),
    DecodeError(String),
    ManifestError(String),
    StorageUnavailable,
    NotOffered(String),
    StoreFailure(StoreError),
    NavigationError(String),
    SnoozeOutOfRange(i64),
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::ApiError(status) => write!(f, "Contents API returned {}", status),
            UpdateError::RequestError(e) => write!(f, "Request failed: {}", e),
            UpdateError::DecodeError(msg) => write!(f, "Could not decode content: {}", msg),
            UpdateError::ManifestError(msg) => write!(f, "Invalid release manifest: {}", msg),
            UpdateError::StorageUnavailable => write!(f, "Local storage is not available"),
            UpdateError::NotOffered(action) => {
                write!(f, "'{}' is not offered in the current state", action)
            }
            UpdateError::StoreFailure(e) => write!(f, "Storage error: {}", e),
            UpdateError::NavigationError(msg) => write!(f, "Could not open URL: {}", msg),
            UpdateError::SnoozeOutOfRange(ms) => {
                write!(f, "Snooze of {} ms is out of range", ms)
            }
        }
    }
}

impl Error for UpdateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UpdateError::RequestError(e) => Some(e),
            UpdateError::StoreFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpdateError {
    fn from(e: reqwest::Error) -> Self {
        UpdateError::RequestError(e)
    }
}

impl From<base64::DecodeError> for UpdateError {
    fn from(e: base64::DecodeError) -> Self {
        UpdateError::DecodeError(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for UpdateError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        UpdateError::DecodeError(e.to_string())
    }
}

impl From<serde_json::Error> for UpdateError {
    fn from(e: serde_json::Error) -> Self {
        UpdateError::ManifestError(e.to_string())
    }
}

impl From<StoreError> for UpdateError {
    fn from(e: StoreError) -> Self {
        UpdateError::StoreFailure(e)
    }
}
