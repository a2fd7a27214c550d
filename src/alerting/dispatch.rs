use serde_json::Value;
use tracing::info;

use super::policy::AlertDecision;
use crate::notifications::{AlertSender, MulticastReport, SenderError};

/// What actually happened for one alert run. `Suppressed` and `NoRecipients`
/// are success-path outcomes; they must never be reported as send failures.
#[derive(Debug)]
pub enum AlertOutcome {
    Suppressed,
    NoRecipients,
    Pushed { platform_response: Value },
    Broadcast { report: MulticastReport },
}

/// Executes a decision against the sender, exactly once. Suppressed runs and
/// broadcasts to an empty registry never touch the sender at all.
pub async fn execute<S: AlertSender + ?Sized>(
    sender: &S,
    decision: AlertDecision,
    message: &Value,
    group_ids: &[String],
) -> Result<AlertOutcome, SenderError> {
    match decision {
        AlertDecision::Suppress => Ok(AlertOutcome::Suppressed),
        AlertDecision::Unicast(target) => {
            info!(target = %target, "Sending alert push to explicit target.");
            let platform_response = sender.push(&target, message).await?;
            Ok(AlertOutcome::Pushed { platform_response })
        }
        AlertDecision::Broadcast => {
            if group_ids.is_empty() {
                info!("Broadcast requested but no groups are registered.");
                return Ok(AlertOutcome::NoRecipients);
            }
            info!(recipients = group_ids.len(), "Broadcasting alert to registered groups.");
            let report = sender.multicast(group_ids, message).await;
            Ok(AlertOutcome::Broadcast { report })
        }
    }
}
