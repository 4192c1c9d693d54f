mod health;
mod users;

pub use health::health_check;
pub use users::{get_by_status, get_by_uuid};

use aside::{Invocation, Outcome};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Render an invocation as HTTP. Hit and live paths produce identical
/// bodies; the source tag is not exposed to callers.
fn respond<T: Serialize>(invocation: Invocation<T>) -> Response {
    match invocation.outcome {
        Outcome::Success { status, payload } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
            match payload {
                Some(payload) => (status, Json(payload)).into_response(),
                None => status.into_response(),
            }
        }
        Outcome::Failure { status, detail } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(serde_json::json!({ "error": detail }))).into_response()
        }
    }
}
