pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::BotError;

/// Push-style chat delivery: a destination and a text, success or failure.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()>;
}

/// Delivers reports to the one configured chat.
pub struct Notifier<T> {
    transport: T,
    chat_id: String,
}

impl<T: ChatTransport> Notifier<T> {
    pub fn new(transport: T, chat_id: impl Into<String>) -> Self {
        Self {
            transport,
            chat_id: chat_id.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Send `message`, turning any transport error into `DeliveryFailure`.
    pub async fn notify(&self, message: &str) -> Result<(), BotError> {
        info!("Sending message to chat {}: {}", self.chat_id, message);

        match self.transport.send(&self.chat_id, message).await {
            Ok(()) => {
                debug!("Message delivered to chat {}", self.chat_id);
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to deliver message to chat {}: {:#}. Undelivered text: {}",
                    self.chat_id, e, message
                );
                Err(BotError::DeliveryFailure {
                    chat_id: self.chat_id.clone(),
                    reason: format!("{:#}", e),
                })
            }
        }
    }
}
