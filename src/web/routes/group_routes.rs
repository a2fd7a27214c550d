use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::{
    db::services::group_service,
    web::{error::AppError, AppState},
};

pub fn create_group_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_groups).delete(delete_group))
}

async fn list_groups(State(app_state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let groups = group_service::list_groups(&app_state.db_pool).await?;
    Ok(Json(serde_json::json!({
        "groups": groups,
        "count": groups.len(),
    })))
}

#[derive(Deserialize)]
struct DeleteParams {
    id: Option<String>,
}

// Unsubscribe a group. Deleting an id that was never registered (or was
// already removed) still reports success.
async fn delete_group(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Value>, AppError> {
    let id = params
        .id
        .ok_or_else(|| AppError::InvalidInput("ID required".to_string()))?;

    let removed = group_service::delete_group(&app_state.db_pool, &id).await?;
    info!(group_id = %id, removed, "Processed group unsubscribe.");

    Ok(Json(serde_json::json!({ "success": true })))
}
