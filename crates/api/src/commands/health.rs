//! Health check command

use tracing::warn;

use crate::context::AppContext;
use crate::utils::health::{ComponentHealth, HealthReport};

/// Get application health
///
/// # Example Response
/// ```json
/// {
///   "is_healthy": false,
///   "score": 0.5,
///   "components": [
///     { "name": "api", "is_healthy": false, "message": "connection refused" },
///     { "name": "session", "is_healthy": true, "message": null }
///   ],
///   "timestamp": 1698765432
/// }
/// ```
pub async fn get_app_health(context: &AppContext) -> HealthReport {
    let api = match context.api.health_check().await {
        Ok(true) => ComponentHealth::healthy("api"),
        Ok(false) => ComponentHealth::unhealthy("api", "Server reported unhealthy"),
        Err(err) => {
            warn!(error = %err, "API health check failed");
            ComponentHealth::unhealthy("api", err.to_string())
        }
    };

    let state = context.session.state();
    let session = match state.error_message() {
        Some(message) => ComponentHealth::unhealthy("session", message),
        None => ComponentHealth::healthy("session"),
    };

    HealthReport::from_components(vec![api, session])
}
