use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body for the chat endpoint. The submitted text is the sole
/// payload; no history is sent.
#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Thin client around the single chat endpoint.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the message and return the reply text.
    ///
    /// Connection failures, non-success statuses, and undecodable bodies all
    /// collapse into `None`; the caller substitutes the fallback bubble.
    /// Details land in the debug log only.
    pub async fn send_message(&self, text: &str) -> Option<String> {
        match self.try_send(text).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                debug!(endpoint = %self.endpoint, error = %e, "chat request failed");
                None
            }
        }
    }

    async fn try_send(
        &self,
        text: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("chat endpoint returned {status}").into());
        }

        let body: ChatReply = response.json().await?;
        Ok(body.reply)
    }
}
