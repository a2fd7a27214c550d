use axum::{
    body::Bytes,
    extract::State,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    db::services::group_service,
    web::{error::AppError, AppState},
};

pub fn create_webhook_router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(receive_events).get(latest_group))
}

#[derive(Deserialize)]
struct WebhookPayload {
    events: Vec<Value>,
}

/// Extracts the conversation id from one platform event. Only group and room
/// sources count; 1:1 user chats and anything malformed yield `None`.
pub(crate) fn conversation_id(event: &Value) -> Option<String> {
    let source = &event["source"];
    match source["type"].as_str()? {
        "group" | "room" => source["groupId"]
            .as_str()
            .or_else(|| source["roomId"].as_str())
            .map(str::to_string),
        _ => None,
    }
}

// Inbound LINE webhook. Events are processed independently: a malformed event
// or a registry hiccup for one event is logged and dropped, and the batch is
// still acknowledged so the platform does not redeliver it forever. Only an
// unparseable outer body fails the whole request.
async fn receive_events(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let payload: WebhookPayload =
        serde_json::from_slice(&body).map_err(|e| AppError::MalformedPayload(e.to_string()))?;

    for event in &payload.events {
        let Some(group_id) = conversation_id(event) else {
            debug!("Skipping webhook event without a group/room source.");
            continue;
        };

        match group_service::upsert_group(&app_state.db_pool, &group_id).await {
            Ok(true) => info!(group_id = %group_id, "Registered new group from webhook."),
            Ok(false) => debug!(group_id = %group_id, "Group already registered."),
            Err(e) => {
                warn!(group_id = %group_id, error = %e, "Registry unavailable, dropping webhook event.");
            }
        }
    }

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

// Admin convenience: the group that most recently invited the bot.
async fn latest_group(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let latest = group_service::latest_group(&app_state.db_pool).await?;
    Ok(Json(serde_json::json!({ "latestGroup": latest })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn group_event_yields_group_id() {
        let event = json!({ "source": { "type": "group", "groupId": "G1" } });
        assert_eq!(conversation_id(&event), Some("G1".to_string()));
    }

    #[test]
    fn room_event_yields_room_id() {
        let event = json!({ "source": { "type": "room", "roomId": "R9" } });
        assert_eq!(conversation_id(&event), Some("R9".to_string()));
    }

    #[test]
    fn user_chat_is_not_eligible() {
        let event = json!({ "source": { "type": "user", "userId": "U5" } });
        assert_eq!(conversation_id(&event), None);
    }

    #[test]
    fn malformed_events_are_skipped() {
        assert_eq!(conversation_id(&json!({})), None);
        assert_eq!(conversation_id(&json!({ "source": {} })), None);
        assert_eq!(conversation_id(&json!({ "source": { "type": "group" } })), None);
        assert_eq!(conversation_id(&json!("not an object")), None);
    }
}
