use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Acknowledgement returned by the signal relay.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignalAcceptedDto {
    pub signal: String,
    pub announcement: String,
}
