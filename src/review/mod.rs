pub mod client;
pub mod response;
pub mod status;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BotError;

pub use client::ApiClient;
pub use response::{check_response, current_date};
pub use status::parse_status;

/// Source of homework review statuses.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetch homeworks updated since `cursor` (epoch seconds).
    async fn fetch(&self, cursor: i64) -> Result<Value, BotError>;
}
