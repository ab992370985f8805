use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a Discord snowflake stored as String
    ///
    /// Snowflakes are persisted as strings and parsed back into `u64` at the
    /// repository boundary; a failure here means a corrupted row.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored announcement type does not name a known announcement kind
    #[error("Unknown announcement type '{0}'")]
    UnknownAnnouncementKind(String),
}
