use thiserror::Error;

/// Everything that can go wrong while polling and relaying review statuses.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("missing required environment variables: {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    #[error("failed to reach review API at {endpoint}: {source}")]
    ConnectionFailure {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("review API responded with HTTP {status}: {body}")]
    UnexpectedResponseStatus { status: u16, body: String },

    #[error("review API returned a body that is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    SchemaViolation(String),

    #[error("homework record has no `{0}` field")]
    MissingField(&'static str),

    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),

    #[error("failed to deliver message to chat {chat_id}: {reason}")]
    DeliveryFailure { chat_id: String, reason: String },
}
