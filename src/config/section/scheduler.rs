//! `[scheduler]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scheduler]
//! quiescence_ms = 2000    # recompile once edits have been quiet this long
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Recompilation scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Quiescence window in milliseconds.
    pub quiescence_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quiescence_ms: 2000,
        }
    }
}

impl SchedulerConfig {
    const QUIESCENCE: FieldPath = FieldPath::new("scheduler.quiescence_ms");

    pub fn quiescence(&self) -> Duration {
        Duration::from_millis(self.quiescence_ms)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.quiescence_ms == 0 {
            diag.error_with_hint(
                Self::QUIESCENCE,
                "must be greater than zero",
                "use 2000 for the default two second window",
            );
        }
    }
}
