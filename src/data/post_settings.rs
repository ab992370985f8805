//! Announcement settings repository.
//!
//! Each announcement kind owns exactly one settings row keyed by
//! `(announcement_type, 0)`. Rows are created lazily by `get_or_create` and are
//! never deleted. Every read-modify-write runs inside a transaction, and the
//! watcher arm flag is flipped with a conditional update so only one watch loop
//! per kind can ever hold it.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, SqlErr, TransactionTrait,
};

use crate::{
    error::AppError,
    model::{
        announcement::AnnouncementKind,
        post_settings::{PostSettings, PostSettingsDefaults, UrlCheck, SETTINGS_ROW_ID},
    },
};

use entity::post_settings::{ActiveModel, Column};

#[derive(Clone, Copy)]
enum CheckMode<'b> {
    Plain,
    Watch { baseline: Option<&'b str> },
}

/// Repository providing database operations for announcement settings.
pub struct PostSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostSettingsRepository<'a> {
    /// Creates a new PostSettingsRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `PostSettingsRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn key(kind: AnnouncementKind) -> (String, i32) {
        (kind.as_str().to_string(), SETTINGS_ROW_ID)
    }

    /// Gets the settings row for an announcement kind.
    ///
    /// # Returns
    /// - `Ok(Some(PostSettings))` - Settings row exists
    /// - `Ok(None)` - No settings row has been created yet
    /// - `Err(AppError)` - Database error or corrupt row
    pub async fn find(&self, kind: AnnouncementKind) -> Result<Option<PostSettings>, AppError> {
        entity::prelude::PostSettings::find_by_id(Self::key(kind))
            .one(self.db)
            .await?
            .map(PostSettings::from_entity)
            .transpose()
    }

    /// Gets the settings row for a kind, creating it from `defaults` if absent.
    ///
    /// Concurrent callers may race on the insert. The loser's unique-constraint
    /// violation is swallowed and the winner's row is re-fetched, so every caller
    /// observes the same single row.
    ///
    /// # Returns
    /// - `Ok(PostSettings)` - Existing or newly created settings
    /// - `Err(AppError)` - Database error
    pub async fn get_or_create(
        &self,
        kind: AnnouncementKind,
        defaults: PostSettingsDefaults,
    ) -> Result<PostSettings, AppError> {
        if let Some(settings) = self.find(kind).await? {
            return Ok(settings);
        }

        let new_row = ActiveModel {
            announcement_type: ActiveValue::Set(kind.as_str().to_string()),
            id: ActiveValue::Set(SETTINGS_ROW_ID),
            url: ActiveValue::Set(defaults.url),
            post_url: ActiveValue::Set(defaults.post_url),
            redirect_target: ActiveValue::Set(None),
            last_modified: ActiveValue::Set(None),
            last_checked: ActiveValue::Set(None),
            watcher_armed: ActiveValue::Set(false),
            autoannounce_enabled: ActiveValue::Set(defaults.autoannounce_enabled),
        };

        match new_row.insert(self.db).await {
            Ok(model) => PostSettings::from_entity(model),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::debug!(
                    "Settings row for {} created concurrently, re-fetching",
                    kind.as_str()
                );
                self.find(kind).await?.ok_or_else(|| {
                    AppError::NotFound(format!("Settings for {} vanished", kind.as_str()))
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Enables or disables automatic announcements for a kind.
    ///
    /// Creates the row with default URLs if it does not exist yet.
    pub async fn set_autoannounce(
        &self,
        kind: AnnouncementKind,
        enabled: bool,
    ) -> Result<PostSettings, AppError> {
        let mut defaults = PostSettingsDefaults::for_kind(kind);
        defaults.autoannounce_enabled = enabled;
        self.get_or_create(kind, defaults).await?;

        self.modify(kind, |active| {
            active.autoannounce_enabled = ActiveValue::Set(enabled);
        })
        .await
    }

    /// Replaces the infographic URL that the watcher polls.
    pub async fn set_url(&self, kind: AnnouncementKind, url: String) -> Result<PostSettings, AppError> {
        self.get_or_create(kind, PostSettingsDefaults::for_kind(kind))
            .await?;

        self.modify(kind, |active| {
            active.url = ActiveValue::Set(url);
        })
        .await
    }

    /// Replaces the URL the announcement title links to.
    pub async fn set_post_url(
        &self,
        kind: AnnouncementKind,
        post_url: String,
    ) -> Result<PostSettings, AppError> {
        self.get_or_create(kind, PostSettingsDefaults::for_kind(kind))
            .await?;

        self.modify(kind, |active| {
            active.post_url = ActiveValue::Set(post_url);
        })
        .await
    }

    /// Records a single poll of the infographic link.
    ///
    /// Always stamps `last_checked`. When `resolved` differs from the stored
    /// redirect target (or none is stored) the target is replaced and
    /// `last_modified` is set to the same instant.
    ///
    /// # Returns
    /// - `Ok(UrlCheck)` - Updated settings and whether the target changed
    /// - `Err(AppError::NotFound)` - Settings row does not exist
    pub async fn record_check(
        &self,
        kind: AnnouncementKind,
        resolved: &str,
        now: DateTime<Utc>,
    ) -> Result<UrlCheck, AppError> {
        self.apply_check(kind, resolved, now, CheckMode::Plain)
            .await
    }

    /// Records a poll made by an armed watch loop.
    ///
    /// The change is measured against `baseline`, the target seen when the watch
    /// was armed, so a one-off check that stored the new target in the meantime
    /// cannot hide the change from the watcher. A change releases the arm flag in
    /// the same transaction.
    pub async fn record_watch_poll(
        &self,
        kind: AnnouncementKind,
        baseline: Option<&str>,
        resolved: &str,
        now: DateTime<Utc>,
    ) -> Result<UrlCheck, AppError> {
        self.apply_check(kind, resolved, now, CheckMode::Watch { baseline })
            .await
    }

    async fn apply_check(
        &self,
        kind: AnnouncementKind,
        resolved: &str,
        now: DateTime<Utc>,
        mode: CheckMode<'_>,
    ) -> Result<UrlCheck, AppError> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::PostSettings::find_by_id(Self::key(kind))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No settings for {}", kind.as_str())))?;

        let target_moved = existing.redirect_target.as_deref() != Some(resolved);
        let missing_modified = existing.last_modified.is_none();
        let changed = match mode {
            CheckMode::Plain => target_moved,
            CheckMode::Watch { baseline } => baseline != Some(resolved),
        };

        let mut active: ActiveModel = existing.into();
        active.last_checked = ActiveValue::Set(Some(now));

        if target_moved {
            active.redirect_target = ActiveValue::Set(Some(resolved.to_string()));
        }
        if target_moved || missing_modified {
            active.last_modified = ActiveValue::Set(Some(now));
        }
        if changed && matches!(mode, CheckMode::Watch { .. }) {
            active.watcher_armed = ActiveValue::Set(false);
        }

        let model = active.update(&txn).await?;
        txn.commit().await?;

        Ok(UrlCheck {
            settings: PostSettings::from_entity(model)?,
            changed,
        })
    }

    /// Atomically claims the watcher slot for a kind.
    ///
    /// Flips `watcher_armed` from false to true with a single conditional update
    /// so two concurrent triggers can never both start a watch loop.
    ///
    /// # Returns
    /// - `Ok(true)` - The caller now owns the watch
    /// - `Ok(false)` - Another watch is already armed (or the row is missing)
    pub async fn try_arm(&self, kind: AnnouncementKind) -> Result<bool, AppError> {
        let result = entity::prelude::PostSettings::update_many()
            .col_expr(Column::WatcherArmed, Expr::value(true))
            .filter(Column::AnnouncementType.eq(kind.as_str()))
            .filter(Column::Id.eq(SETTINGS_ROW_ID))
            .filter(Column::WatcherArmed.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Releases the watcher slot for a kind.
    pub async fn disarm(&self, kind: AnnouncementKind) -> Result<(), AppError> {
        entity::prelude::PostSettings::update_many()
            .col_expr(Column::WatcherArmed, Expr::value(false))
            .filter(Column::AnnouncementType.eq(kind.as_str()))
            .filter(Column::Id.eq(SETTINGS_ROW_ID))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Clears every arm flag left behind by a previous process.
    ///
    /// # Returns
    /// - `Ok(kinds)` - The kinds whose rows were armed, now disarmed
    pub async fn take_stale_armed(&self) -> Result<Vec<AnnouncementKind>, AppError> {
        let txn = self.db.begin().await?;

        let armed = entity::prelude::PostSettings::find()
            .filter(Column::WatcherArmed.eq(true))
            .all(&txn)
            .await?;

        entity::prelude::PostSettings::update_many()
            .col_expr(Column::WatcherArmed, Expr::value(false))
            .filter(Column::WatcherArmed.eq(true))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        armed
            .iter()
            .map(|row| AnnouncementKind::from_db(&row.announcement_type).map_err(AppError::from))
            .collect()
    }

    /// Applies `change` to the settings row inside a transaction.
    async fn modify<F>(&self, kind: AnnouncementKind, change: F) -> Result<PostSettings, AppError>
    where
        F: FnOnce(&mut ActiveModel),
    {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::PostSettings::find_by_id(Self::key(kind))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No settings for {}", kind.as_str())))?;

        let mut active: ActiveModel = existing.into();
        change(&mut active);

        let model = active.update(&txn).await?;
        txn.commit().await?;

        PostSettings::from_entity(model)
    }
}
