use super::respond;
use crate::state::AppState;
use aside::{CachePlan, Outcome};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

fn by_status_plan() -> CachePlan {
    CachePlan::new("test-all", "Test.GetByStatus")
}

fn by_id_plan() -> CachePlan {
    CachePlan::new("test-by-id", "Test.Get")
}

#[derive(Deserialize)]
pub struct StatusFilter {
    status: Option<bool>,
}

/// GET /tests?status=
pub async fn get_by_status(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> Result<Response, StatusCode> {
    info!("GET /tests status={:?}", filter.status);

    let status_value = filter.status.map(|s| s.to_string());
    let args = [("status", status_value.as_deref())];

    let data = state.data.clone();
    let served = state
        .cache
        .intercept(&by_status_plan(), &args, || async move {
            let users = match filter.status {
                None => data.get_all().await,
                Some(true) => data.get_actives().await,
                Some(false) => data.get_inactives().await,
            };
            Outcome::ok(users)
        })
        .await
        .map_err(|e| {
            error!("cache backend failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(respond(served))
}

/// GET /tests/{uuid}
pub async fn get_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Response, StatusCode> {
    info!("GET /tests/{}", uuid);

    let uuid_value = uuid.to_string();
    let args = [("uuid", Some(uuid_value.as_str()))];

    let data = state.data.clone();
    let served = state
        .cache
        .intercept(&by_id_plan(), &args, || async move {
            match data.get_by_id(&uuid).await {
                Some(user) => Outcome::ok(user),
                None => Outcome::not_found(format!("no user with id {uuid}")),
            }
        })
        .await
        .map_err(|e| {
            error!("cache backend failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(respond(served))
}
