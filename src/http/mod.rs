//! # HTTP Surface
//!
//! A thin adapter over [`BurrowPool`]:
//!
//! | Route          | Response |
//! |----------------|----------|
//! | `GET /health`  | `OK` |
//! | `GET /`        | JSON array with the current status of every burrow |
//! | `POST /rent`   | `{"burrow": ..., "error": ...}`, exactly one of them set |
//!
//! A failed rentout is still answered with `200 OK`; the failure is reported in
//! the `error` field.

use crate::clients::BurrowPool;
use crate::model::Burrow;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Deadline applied to every `POST /rent`.
pub const DEFAULT_RENT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<dyn BurrowPool>,
    pub rent_timeout: Duration,
}

impl AppState {
    pub fn new(pool: Arc<dyn BurrowPool>) -> Self {
        Self {
            pool,
            rent_timeout: DEFAULT_RENT_TIMEOUT,
        }
    }

    pub fn with_rent_timeout(mut self, timeout: Duration) -> Self {
        self.rent_timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentResponse {
    pub burrow: Option<Burrow>,
    pub error: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(show_status))
        .route("/rent", post(rent_burrow))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn show_status(State(state): State<AppState>) -> Json<Vec<Burrow>> {
    let burrows = state.pool.current_status().await;
    debug!(count = burrows.len(), "Serving status");
    Json(burrows)
}

async fn rent_burrow(State(state): State<AppState>) -> Json<RentResponse> {
    match state.pool.rentout(state.rent_timeout).await {
        Ok(burrow) => Json(RentResponse {
            burrow: Some(burrow),
            error: None,
        }),
        Err(e) => {
            warn!(error = %e, "Rent request failed");
            Json(RentResponse {
                burrow: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockPool;
    use crate::framework::RentError;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app(mock: &MockPool) -> Router {
        router(AppState::new(Arc::new(mock.clone())))
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(&MockPool::new())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"OK");
    }

    #[tokio::test]
    async fn test_show_status() {
        let mock = MockPool::with_burrows(vec![
            Burrow::new("Burrow 1", 2.5, 1.2, 10),
            Burrow::new("Burrow 2", 0.0, 1.0, 0).occupied(),
        ]);

        let response = app(&mock)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let burrows: Vec<Burrow> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(burrows.len(), 2);
        assert_eq!(burrows[0].name, "Burrow 1");
        assert!(burrows[1].occupied);
    }

    #[tokio::test]
    async fn test_rent_success() {
        let mock = MockPool::new();
        mock.expect_rentout()
            .return_ok(Burrow::new("Burrow 1", 2.5, 1.2, 10).occupied());

        let response = app(&mock)
            .oneshot(Request::post("/rent").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let rent: RentResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(rent.burrow.map(|b| b.name).as_deref(), Some("Burrow 1"));
        assert!(rent.error.is_none());
        mock.verify();
    }

    #[tokio::test]
    async fn test_rent_failure_reports_error() {
        let mock = MockPool::new();
        mock.expect_rentout().return_err(RentError::NoBurrowAvailable);

        let response = app(&mock)
            .oneshot(Request::post("/rent").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let rent: RentResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(rent.burrow.is_none());
        assert_eq!(rent.error.as_deref(), Some("no burrow available"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_rent_requires_post() {
        let response = app(&MockPool::new())
            .oneshot(Request::get("/rent").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
