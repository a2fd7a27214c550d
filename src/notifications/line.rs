use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::{send_chunked, AlertSender, MulticastReport, SenderError};

const PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";
const MULTICAST_URL: &str = "https://api.line.me/v2/bot/message/multicast";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Sender for the LINE Messaging API. Each call is a real delivery with
/// platform-side effects, so nothing here retries on its own.
pub struct LineSender {
    client: Client,
    access_token: String,
}

#[derive(Serialize)]
struct PushBody<'a> {
    to: &'a str,
    messages: &'a [&'a Value],
}

#[derive(Serialize)]
struct MulticastBody<'a> {
    to: &'a [String],
    messages: &'a [&'a Value],
}

impl LineSender {
    pub fn new(access_token: String) -> Self {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            access_token,
        }
    }

    async fn multicast_chunk(&self, to: Vec<String>, message: &Value) -> Result<(), SenderError> {
        let body = MulticastBody {
            to: &to,
            messages: &[message],
        };

        let response = self
            .client
            .post(MULTICAST_URL)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(SenderError::DeliveryFailed { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl AlertSender for LineSender {
    async fn push(&self, to: &str, message: &Value) -> Result<Value, SenderError> {
        let body = PushBody {
            to,
            messages: &[message],
        };

        let response = self
            .client
            .post(PUSH_URL)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(SenderError::DeliveryFailed { status, body });
        }

        // LINE answers push with `{}` on success; pass it through untouched.
        Ok(response.json().await.unwrap_or(Value::Null))
    }

    async fn multicast(&self, to: &[String], message: &Value) -> MulticastReport {
        send_chunked(to, |chunk| self.multicast_chunk(chunk, message)).await
    }
}
