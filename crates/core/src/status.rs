// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network status as published by the connectivity monitor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Link quality classification.
///
/// The reachability probe only produces `Poor` and `Good`; `Fair` and
/// `Excellent` exist for status sources with a finer signal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LinkStrength {
    #[default]
    Poor,
    Fair,
    Good,
    Excellent,
}

impl LinkStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStrength::Poor => "poor",
            LinkStrength::Fair => "fair",
            LinkStrength::Good => "good",
            LinkStrength::Excellent => "excellent",
        }
    }
}

impl fmt::Display for LinkStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkStrength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poor" => Ok(LinkStrength::Poor),
            "fair" => Ok(LinkStrength::Fair),
            "good" => Ok(LinkStrength::Good),
            "excellent" => Ok(LinkStrength::Excellent),
            _ => Err(Error::InvalidStrength(s.to_string())),
        }
    }
}

/// Snapshot of connectivity. Each probe replaces the whole value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub is_connected: bool,
    pub strength: LinkStrength,
    /// Metered-link hint.
    pub is_expensive: bool,
}

impl NetworkStatus {
    /// Disconnected, poor link. Also the value before the first probe.
    pub fn offline() -> Self {
        NetworkStatus {
            is_connected: false,
            strength: LinkStrength::Poor,
            is_expensive: false,
        }
    }

    /// Connected with the given link strength.
    pub fn online(strength: LinkStrength) -> Self {
        NetworkStatus {
            is_connected: true,
            strength,
            is_expensive: false,
        }
    }

    /// Returns true when only urgent work should be attempted.
    pub fn is_degraded(&self) -> bool {
        self.strength == LinkStrength::Poor
    }
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_connected {
            write!(f, "connected ({} link", self.strength)?;
            if self.is_expensive {
                f.write_str(", metered")?;
            }
            f.write_str(")")
        } else {
            f.write_str("disconnected")
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
