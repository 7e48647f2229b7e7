//! Error module for the Rusty Sync library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum SyncError {
    /// Error for invalid parameters, e.g., a negative coincidence window.
    InvalidParameter(String),
    /// Error for invalid spike times, e.g., NaN or infinite values.
    InvalidTimes(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyncError::InvalidParameter(e) => write!(f, "Invalid parameter: {}", e),
            SyncError::InvalidTimes(e) => write!(f, "Invalid spike times: {}", e),
            SyncError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for SyncError {}
