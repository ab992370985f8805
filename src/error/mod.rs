//! Error types.
//!
//! `AppError` wraps the domain errors below and converts into a relay response.
//! Per-channel fan-out failures are not `AppError`s: they are classified into
//! `DeliveryError` and tallied without aborting the batch.

pub mod config;
pub mod delivery;
pub mod internal;
pub mod resolve;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{config::ConfigError, internal::InternalError, resolve::ResolveError},
    model::api::ErrorDto,
};

/// Every error a command, a relay request or a background task can end with.
///
/// Library errors convert in through `#[from]`, so `?` works across the
/// repositories, the watcher and the Discord calls.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// A stored value could not be turned back into a domain type.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Infographic link could not be resolved.
    #[error(transparent)]
    ResolveErr(#[from] ResolveError),

    /// Boxed, `serenity::Error` is large.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Binding or serving the signal relay failed.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Shown to the user as is; 404 on the relay.
    #[error("{0}")]
    NotFound(String),

    /// Shown to the user as is; 400 on the relay.
    #[error("{0}")]
    BadRequest(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Logs the wrapped error and answers 500 with a generic body.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("Signal relay request failed: {}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
