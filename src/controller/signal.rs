use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppError,
    model::{announcement::AnnouncementKind, api::SignalAcceptedDto},
    state::AppState,
};

/// Liveness check for the relay.
pub async fn liveness() -> &'static str {
    "OK"
}

/// Accepts a reset signal from the relay client and triggers the dispatcher.
///
/// # Returns
/// - `202 Accepted` - Signal handed to the dispatcher
/// - `404 Not Found` - Unknown signal name
/// - `500 Internal Server Error` - Database error while triggering
pub async fn receive_signal(
    State(state): State<AppState>,
    Path(signal): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let kind = AnnouncementKind::from_signal_name(&signal)
        .ok_or_else(|| AppError::NotFound(format!("Unknown signal '{}'", signal)))?;

    let outcome = state.dispatcher.trigger(kind).await?;
    tracing::info!("Relay signal {}: {:?}", signal, outcome);

    Ok((
        StatusCode::ACCEPTED,
        Json(SignalAcceptedDto {
            signal,
            announcement: kind.profile().name.to_string(),
        }),
    ))
}
