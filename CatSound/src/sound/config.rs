//! Loader configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::wav::PcmFormat;

/// How raw CAT payloads are interpreted.
///
/// ```json
/// { "format": { "channels": 1, "sample_rate": 8000, "bits_per_sample": 8 },
///   "strip_name_prefix": false }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Format policy for payloads without a WAV header
    pub format: PcmFormat,
    /// Remove the file name stored in front of each entry before decoding
    pub strip_name_prefix: bool,
}

impl LoaderConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the format is invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the format policy.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the problem.
    pub fn validate(&self) -> Result<()> {
        self.format.validate().map_err(|message| Error::Config {
            message: message.to_string(),
        })
    }
}
