//! Errors raised while handling gateway events

use repbot_service::ServiceError;

/// Gateway adapter error type
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The gateway payload lacked a field the handler needs
    #[error("Missing field in gateway payload: {0}")]
    MissingField(&'static str),
}

impl BotError {
    /// Get error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Discord(_) => "DISCORD_ERROR",
            Self::Service(e) => e.error_code(),
            Self::MissingField(_) => "MISSING_FIELD",
        }
    }
}

/// Result type for gateway handlers
pub type BotResult<T> = Result<T, BotError>;
