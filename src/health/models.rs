use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Degraded => "Degraded",
            Self::Unhealthy => "Unhealthy",
        }
    }

    pub fn is_healthy(&self) -> bool {
        *self == Self::Healthy
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckEntry {
    pub name: String,
    pub status: HealthStatus,
}

/// Outcome of running a selection of checks.
///
/// `checks` keeps registry order no matter in which order the checks finished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateReport {
    pub status: HealthStatus,
    pub checks: Vec<CheckEntry>,
}

impl AggregateReport {
    pub fn new() -> Self {
        Self {
            status: HealthStatus::Healthy,
            checks: Vec::new(),
        }
    }

    pub fn add_check(&mut self, name: String, status: HealthStatus) {
        if !status.is_healthy() {
            self.status = HealthStatus::Unhealthy;
        }
        self.checks.push(CheckEntry { name, status });
    }

    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }
}

impl Default for AggregateReport {
    fn default() -> Self {
        Self::new()
    }
}
