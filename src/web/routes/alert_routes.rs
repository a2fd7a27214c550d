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
    alerting::{
        dispatch::{execute, AlertOutcome},
        policy,
    },
    db::services::group_service,
    notifications::flex,
    web::{error::AppError, AppState},
};

pub fn create_alert_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(trigger_alert))
}

#[derive(Deserialize)]
struct AlertParams {
    /// Explicit target for a manual/test send; bypasses suppression.
    #[serde(rename = "targetId")]
    target_id: Option<String>,
}

// Alert trigger, hit by the scheduler (no target) or an operator (with one).
// Flow: live reading -> policy decision -> single dispatch. The registry is
// only consulted when the decision is a broadcast.
async fn trigger_alert(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<AlertParams>,
) -> Result<Json<Value>, AppError> {
    let reading = app_state.sensor.latest_reading().await?;
    let decision = policy::decide(reading.pm25, params.target_id.as_deref());

    let group_ids: Vec<String> = match decision {
        policy::AlertDecision::Broadcast => group_service::list_groups(&app_state.db_pool)
            .await?
            .into_iter()
            .map(|g| g.group_id)
            .collect(),
        _ => Vec::new(),
    };

    let message = flex::build_alert_message(&reading, &app_state.config.dashboard_url);
    let outcome = execute(app_state.line.as_ref(), decision, &message, &group_ids).await?;

    match outcome {
        AlertOutcome::Suppressed => {
            info!(pm25 = reading.pm25, "Alert suppressed, PM2.5 below threshold (saved quota).");
            Ok(Json(serde_json::json!({
                "message": "suppressed",
                "pm25": reading.pm25,
            })))
        }
        AlertOutcome::NoRecipients => Ok(Json(serde_json::json!({
            "message": "no recipients",
            "pm25": reading.pm25,
        }))),
        AlertOutcome::Pushed { platform_response } => Ok(Json(serde_json::json!({
            "success": true,
            "pm25": reading.pm25,
            "lineResponse": platform_response,
        }))),
        AlertOutcome::Broadcast { report } => {
            if report.all_failed() {
                return Err(AppError::DeliveryFailed(report.failures.join("; ")));
            }
            Ok(Json(serde_json::json!({
                "success": true,
                "pm25": reading.pm25,
                "delivery": report,
            })))
        }
    }
}
