//! EmitterConfig: optional knobs for an [`Emitter`](crate::Emitter).
//!
//! Nothing here changes dispatch semantics. The label tags log output and the
//! leak threshold only produces a warning; registration is never refused.

use serde::{Deserialize, Serialize};

use crate::error::{EmitterError, Result};

/// Diagnostic configuration for an emitter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitterConfig {
    /// Attached to every tracing event the emitter logs.
    pub label: Option<String>,
    /// Warn once an event holds more than this many listeners.
    pub leak_warning_threshold: Option<usize>,
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_leak_warning_threshold(mut self, threshold: usize) -> Self {
        self.leak_warning_threshold = Some(threshold);
        self
    }

    /// Parse and validate a JSON config, e.g.
    /// `{"label": "ui", "leakWarningThreshold": 10}`.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.leak_warning_threshold == Some(0) {
            return Err(EmitterError::InvalidConfig(
                "leakWarningThreshold must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}
