use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    controller::signal::{liveness, receive_signal},
    state::AppState,
};

/// Routes of the loopback signal relay, with request tracing.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/{signal}", post(receive_signal))
        .layer(TraceLayer::new_for_http())
}
