//! Infographic link watching.
//!
//! The infographic links are short URLs that redirect to the current image.
//! A new image is detected by following exactly one redirect hop and comparing
//! the target with the one stored on the settings row.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::LOCATION;
use sea_orm::DatabaseConnection;
use serenity::async_trait;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    data::post_settings::PostSettingsRepository,
    error::{resolve::ResolveError, AppError},
    model::{
        announcement::AnnouncementKind,
        post_settings::{PostSettings, PostSettingsDefaults, UrlCheck},
    },
};

/// Follows a link one redirect hop.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Returns the `Location` of a redirect response, or `url` itself for any
    /// other response.
    async fn resolve_one_hop(&self, url: &str) -> Result<String, ResolveError>;
}

/// Resolver backed by a reqwest client with automatic redirects disabled.
pub struct HttpLinkResolver {
    client: reqwest::Client,
}

impl HttpLinkResolver {
    /// The client must be built with `redirect::Policy::none()`, otherwise the
    /// final target is returned instead of the first hop.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkResolver for HttpLinkResolver {
    async fn resolve_one_hop(&self, url: &str) -> Result<String, ResolveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ResolveError::from_request(url, err))?;

        if !response.status().is_redirection() {
            return Ok(url.to_string());
        }

        let Some(location) = response.headers().get(LOCATION) else {
            return Ok(url.to_string());
        };

        let invalid = || ResolveError::InvalidLocation {
            url: url.to_string(),
            location: String::from_utf8_lossy(location.as_bytes()).into_owned(),
        };

        let location = location.to_str().map_err(|_| invalid())?;
        let target = Url::parse(url)
            .and_then(|base| base.join(location))
            .map_err(|_| invalid())?;

        Ok(target.to_string())
    }
}

/// Polls infographic links and records what it sees on the settings rows.
pub struct UrlWatcher<'a> {
    db: &'a DatabaseConnection,
    resolver: &'a dyn LinkResolver,
    interval: Duration,
}

impl<'a> UrlWatcher<'a> {
    pub fn new(db: &'a DatabaseConnection, resolver: &'a dyn LinkResolver, interval: Duration) -> Self {
        Self {
            db,
            resolver,
            interval,
        }
    }

    /// Checks the link of `kind` once and records the result.
    ///
    /// Creates the settings row with defaults when it does not exist yet.
    ///
    /// # Returns
    /// - `Ok(UrlCheck)` - Updated settings and whether the target changed
    /// - `Err(AppError::ResolveErr)` - The link could not be resolved
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn check(&self, kind: AnnouncementKind) -> Result<UrlCheck, AppError> {
        let repo = PostSettingsRepository::new(self.db);
        let settings = repo
            .get_or_create(kind, PostSettingsDefaults::for_kind(kind))
            .await?;

        let resolved = self.resolve(&settings.url).await?;

        repo.record_check(kind, &resolved, Utc::now()).await
    }

    /// Polls the link of `kind` until it points somewhere new.
    ///
    /// The caller must already hold the arm flag. The flag is released when a
    /// change is recorded or when `cancel` fires, whichever comes first.
    ///
    /// # Returns
    /// - `Ok(Some(PostSettings))` - The link changed; settings after the change
    /// - `Ok(None)` - Cancelled before a change was seen
    /// - `Err(AppError)` - Hard resolver error or database error; the flag is
    ///   left for the caller to release
    pub async fn poll_until_changed(
        &self,
        kind: AnnouncementKind,
        cancel: &CancellationToken,
    ) -> Result<Option<PostSettings>, AppError> {
        let repo = PostSettingsRepository::new(self.db);
        let settings = repo
            .get_or_create(kind, PostSettingsDefaults::for_kind(kind))
            .await?;
        let baseline = settings.redirect_target.as_deref();

        tracing::info!(
            "Watching {} for a new {} infographic",
            settings.url,
            kind.as_str()
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                repo.disarm(kind).await?;
                tracing::info!("Stopped watching {} infographic", kind.as_str());
                Ok(None)
            }
            changed = self.watch(kind, &settings.url, baseline) => changed.map(Some),
        }
    }

    async fn watch(
        &self,
        kind: AnnouncementKind,
        url: &str,
        baseline: Option<&str>,
    ) -> Result<PostSettings, AppError> {
        let repo = PostSettingsRepository::new(self.db);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let resolved = self.resolve(url).await?;
            let check = repo
                .record_watch_poll(kind, baseline, &resolved, Utc::now())
                .await?;

            if check.changed {
                tracing::info!(
                    "New {} infographic detected: {}",
                    kind.as_str(),
                    resolved
                );
                return Ok(check.settings);
            }

            tracing::debug!("No new {} infographic yet", kind.as_str());
        }
    }

    /// Resolves `url`, retrying peer disconnects immediately.
    async fn resolve(&self, url: &str) -> Result<String, ResolveError> {
        loop {
            match self.resolver.resolve_one_hop(url).await {
                Err(err) if err.is_transient() => {
                    tracing::warn!("{}, retrying", err);
                }
                result => return result,
            }
        }
    }
}
