use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use thiserror::Error;
use tracing::warn;

pub mod flex;
pub mod line;

/// LINE's documented per-call recipient cap for the multicast endpoint.
pub const MULTICAST_LIMIT: usize = 500;

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Platform returned non-success status {status}: {body}")]
    DeliveryFailed {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Platform unreachable: {0}")]
    DeliveryUnreachable(#[from] reqwest::Error),
}

/// Outcome of a chunked multicast. A failed chunk never aborts the remaining
/// chunks; callers get the full tally instead of a single error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MulticastReport {
    pub recipients: usize,
    pub chunks_succeeded: usize,
    pub chunks_failed: usize,
    pub failures: Vec<String>,
}

impl MulticastReport {
    pub fn all_failed(&self) -> bool {
        self.chunks_succeeded == 0 && self.chunks_failed > 0
    }
}

/// The outbound seam to the messaging platform. Production code uses
/// [`line::LineSender`]; tests substitute a recording fake.
#[async_trait]
pub trait AlertSender: Send + Sync {
    /// Unicast push to one user or group id. Returns the platform's response
    /// body so operators can see what the platform said about a test send.
    async fn push(&self, to: &str, message: &Value) -> Result<Value, SenderError>;

    /// Multicast to a list of ids, chunked at [`MULTICAST_LIMIT`].
    async fn multicast(&self, to: &[String], message: &Value) -> MulticastReport;
}

/// Splits `ids` into platform-sized chunks and sends each through
/// `send_chunk`, tallying successes and failures per chunk.
pub(crate) async fn send_chunked<F, Fut>(ids: &[String], mut send_chunk: F) -> MulticastReport
where
    F: FnMut(Vec<String>) -> Fut,
    Fut: Future<Output = Result<(), SenderError>>,
{
    let mut report = MulticastReport {
        recipients: ids.len(),
        ..Default::default()
    };

    for chunk in ids.chunks(MULTICAST_LIMIT) {
        match send_chunk(chunk.to_vec()).await {
            Ok(()) => report.chunks_succeeded += 1,
            Err(e) => {
                warn!(chunk_size = chunk.len(), error = %e, "Multicast chunk failed, continuing with remaining chunks.");
                report.chunks_failed += 1;
                report.failures.push(e.to_string());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("G{i}")).collect()
    }

    #[tokio::test]
    async fn single_chunk_for_small_lists() {
        let calls = AtomicUsize::new(0);
        let report = send_chunked(&ids(3), |chunk| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(chunk.len(), 3);
            async { Ok(()) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.recipients, 3);
        assert_eq!(report.chunks_succeeded, 1);
        assert_eq!(report.chunks_failed, 0);
    }

    #[tokio::test]
    async fn six_hundred_fifty_ids_split_into_500_and_150() {
        let sizes = std::sync::Mutex::new(Vec::new());
        let report = send_chunked(&ids(650), |chunk| {
            sizes.lock().unwrap().push(chunk.len());
            async { Ok(()) }
        })
        .await;

        assert_eq!(*sizes.lock().unwrap(), vec![500, 150]);
        assert_eq!(report.chunks_succeeded, 2);
        assert_eq!(report.chunks_failed, 0);
    }

    #[tokio::test]
    async fn failed_chunk_does_not_abort_remaining_chunks() {
        let calls = AtomicUsize::new(0);
        let report = send_chunked(&ids(650), |_chunk| {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 1 {
                    Err(SenderError::DeliveryFailed {
                        status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                        body: "quota exceeded".to_string(),
                    })
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(report.chunks_succeeded, 1);
        assert_eq!(report.chunks_failed, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("quota exceeded"));
        assert!(!report.all_failed());
    }

    #[tokio::test]
    async fn all_failed_is_reported() {
        let report = send_chunked(&ids(10), |_chunk| async {
            Err(SenderError::DeliveryFailed {
                status: reqwest::StatusCode::UNAUTHORIZED,
                body: "bad token".to_string(),
            })
        })
        .await;

        assert!(report.all_failed());
    }
}
