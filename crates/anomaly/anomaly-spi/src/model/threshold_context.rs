//! Threshold sensitivity policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnomalyError;

/// Selects how many standard deviations above the mean count as anomalous.
///
/// `Normal` uses a multiplier of 2, `Heightened` a multiplier of 3. Parsing
/// treats `"normal"` as [`ThresholdContext::Normal`] and every other label
/// (`"emergency"`, `"maintenance"`, ...) as [`ThresholdContext::Heightened`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdContext {
    #[default]
    Normal,
    Heightened,
}

impl ThresholdContext {
    /// Standard deviation multiplier for this context.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Normal => 2.0,
            Self::Heightened => 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Heightened => "heightened",
        }
    }
}

impl fmt::Display for ThresholdContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThresholdContext {
    type Err = AnomalyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "normal" {
            Ok(Self::Normal)
        } else {
            Ok(Self::Heightened)
        }
    }
}
