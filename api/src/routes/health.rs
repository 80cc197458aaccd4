use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, HttpResponse};

use onboard_infra::database::DatabasePool;
use onboard_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

/// Handler for GET /health
///
/// Reports liveness, plus database reachability when a pool is registered.
/// Returns 503 when any dependency is unhealthy.
pub async fn health_check(pool: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let mut services = HashMap::new();

    if let Some(pool) = pool {
        let started = Instant::now();
        let (status, message) = match pool.health_check().await {
            Ok(true) => (HealthStatus::Healthy, None),
            Ok(false) => (HealthStatus::Unhealthy, Some("unexpected health check result".to_string())),
            Err(e) => {
                tracing::warn!(error = %e, event = "health_check_failed", "Database health check failed");
                (HealthStatus::Unhealthy, Some("database unreachable".to_string()))
            }
        };
        services.insert(
            "database".to_string(),
            ServiceHealth {
                status,
                message,
                response_time_ms: Some(started.elapsed().as_millis() as u64),
            },
        );
    }

    let body = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    match body.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::Ok().json(body),
    }
}
