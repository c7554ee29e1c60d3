//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use citeshelf_common::DbPool;
use serde::Serialize;
use std::time::Instant;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub checks: ReadyChecks,
}

#[derive(Serialize)]
pub struct ReadyChecks {
    pub database: StoreCheck,
}

/// Outcome of a single store round-trip
#[derive(Serialize)]
pub struct StoreCheck {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreCheck {
    async fn run(db: &DbPool) -> Self {
        let start = Instant::now();

        match db.ping().await {
            Ok(()) => Self {
                status: "up",
                latency_ms: Some(start.elapsed().as_millis() as u64),
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Readiness check failed");
                Self {
                    status: "down",
                    latency_ms: None,
                    error: Some(e.public_message()),
                }
            }
        }
    }

    fn is_up(&self) -> bool {
        self.error.is_none()
    }
}

/// Liveness - always returns healthy if server is running
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.config.observability.service_name.clone(),
        version: citeshelf_common::VERSION,
    })
}

/// Readiness - 503 while the publication store is unreachable
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let database = StoreCheck::run(&state.db).await;

    let (code, status) = if database.is_up() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(ReadyResponse {
            status,
            checks: ReadyChecks { database },
        }),
    )
}
