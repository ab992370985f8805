use thiserror::Error;

/// Outcome class of a failed per-channel post or edit.
///
/// None of these abort a fan-out batch; each one is tallied separately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Channel or message not found")]
    NotFound,

    #[error("Missing access to channel")]
    Forbidden,

    #[error("Rate limited by Discord")]
    RateLimited,

    #[error("Discord rejected the request: {0}")]
    BadRequest(String),

    #[error("Channel is not a guild text channel")]
    NotGuildChannel,

    #[error("Unexpected delivery error: {0}")]
    Unknown(String),
}

impl DeliveryError {
    /// Maps a serenity error onto the delivery taxonomy using the HTTP status
    /// Discord answered with.
    pub fn from_serenity(err: &serenity::Error) -> Self {
        if let serenity::Error::Http(http_err) = err {
            match http_err.status_code().map(|status| status.as_u16()) {
                Some(404) => return Self::NotFound,
                Some(403) => return Self::Forbidden,
                Some(429) => return Self::RateLimited,
                Some(400) => return Self::BadRequest(http_err.to_string()),
                _ => {}
            }
        }

        Self::Unknown(err.to_string())
    }

    /// Whether the channel should be unsubscribed when bad-channel pruning is on.
    pub fn is_dead_channel(&self) -> bool {
        matches!(self, Self::NotFound | Self::Forbidden)
    }
}
