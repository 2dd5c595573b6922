//! `[share]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [share]
//! base_url = "https://example.github.io/playground/"
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Permalink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Page the permalink fragment is attached to.
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5277/".to_string(),
        }
    }
}

impl ShareConfig {
    const BASE_URL: FieldPath = FieldPath::new("share.base_url");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(err) = Url::parse(&self.base_url) {
            diag.error_with_hint(
                Self::BASE_URL,
                format!("`{}` is not a valid URL: {err}", self.base_url),
                "use an absolute URL such as https://example.com/playground/",
            );
        }
    }

    /// Parsed base URL.
    pub fn base(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }
}
