//! Health report for the application context

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Aggregated health of the running client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// `true` when every component is healthy
    pub is_healthy: bool,

    /// Fraction of healthy components, 0.0 to 1.0
    pub score: f64,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp (seconds) when the report was taken
    pub timestamp: i64,
}

impl HealthReport {
    pub fn from_components(components: Vec<ComponentHealth>) -> Self {
        let healthy = components.iter().filter(|c| c.is_healthy).count();
        let score =
            if components.is_empty() { 1.0 } else { healthy as f64 / components.len() as f64 };

        Self {
            is_healthy: healthy == components.len(),
            score,
            components,
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn component(&self, name: &str) -> Option<&ComponentHealth> {
        self.components.iter().find(|c| c.name == name)
    }
}

/// Health of a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component identifier (e.g. "api", "session")
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
