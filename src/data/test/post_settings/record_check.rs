use super::*;

/// Tests the first ever check of a link.
///
/// Verifies that a row with no redirect target reports a change and stamps both
/// timestamps with the check time.
///
/// Expected: Ok with changed = true
#[tokio::test]
async fn first_check_records_target() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db).build().await?;

    let repo = PostSettingsRepository::new(db);
    let check = repo
        .record_check(AnnouncementKind::Daily, "https://cdn.example.com/a.png", at(9, 0))
        .await?;

    assert!(check.changed);
    assert_eq!(
        check.settings.redirect_target.as_deref(),
        Some("https://cdn.example.com/a.png")
    );
    assert_eq!(check.settings.last_modified, Some(at(9, 0)));
    assert_eq!(check.settings.last_checked, Some(at(9, 0)));

    Ok(())
}

/// Tests checking a link that keeps resolving to the same target, then changes.
///
/// Verifies that an unchanged target only moves `last_checked` forward, and a
/// later different target updates `last_modified` as well.
///
/// Expected: last_modified stays at T0 until the target changes at T2
#[tokio::test]
async fn last_modified_moves_only_on_change() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db)
        .redirect_target("https://cdn.example.com/a.png", at(8, 0))
        .build()
        .await?;

    let repo = PostSettingsRepository::new(db);

    let same = repo
        .record_check(AnnouncementKind::Daily, "https://cdn.example.com/a.png", at(9, 0))
        .await?;
    assert!(!same.changed);
    assert_eq!(same.settings.last_modified, Some(at(8, 0)));
    assert_eq!(same.settings.last_checked, Some(at(9, 0)));

    let moved = repo
        .record_check(AnnouncementKind::Daily, "https://cdn.example.com/b.png", at(10, 0))
        .await?;
    assert!(moved.changed);
    assert_eq!(
        moved.settings.redirect_target.as_deref(),
        Some("https://cdn.example.com/b.png")
    );
    assert_eq!(moved.settings.last_modified, Some(at(10, 0)));
    assert_eq!(moved.settings.last_checked, Some(at(10, 0)));

    Ok(())
}

/// Tests that a plain check never touches the arm flag.
///
/// Expected: watcher_armed stays true after a changing check
#[tokio::test]
async fn plain_check_keeps_arm_flag() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db).watcher_armed(true).build().await?;

    let repo = PostSettingsRepository::new(db);
    let check = repo
        .record_check(AnnouncementKind::Daily, "https://cdn.example.com/a.png", at(9, 0))
        .await?;

    assert!(check.changed);
    assert!(check.settings.watcher_armed);

    Ok(())
}

/// Tests that a watch poll releases the arm flag only when the target changes.
///
/// Expected: still armed after an unchanged poll, disarmed after a change
#[tokio::test]
async fn watch_poll_disarms_on_change() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db)
        .redirect_target("https://cdn.example.com/a.png", at(8, 0))
        .watcher_armed(true)
        .build()
        .await?;

    let repo = PostSettingsRepository::new(db);
    let baseline = Some("https://cdn.example.com/a.png");

    let same = repo
        .record_watch_poll(
            AnnouncementKind::Daily,
            baseline,
            "https://cdn.example.com/a.png",
            at(9, 0),
        )
        .await?;
    assert!(!same.changed);
    assert!(same.settings.watcher_armed);

    let moved = repo
        .record_watch_poll(
            AnnouncementKind::Daily,
            baseline,
            "https://cdn.example.com/b.png",
            at(9, 1),
        )
        .await?;
    assert!(moved.changed);
    assert!(!moved.settings.watcher_armed);
    assert_eq!(moved.settings.last_modified, Some(at(9, 1)));

    Ok(())
}

/// Tests a one-off check landing while a watch is armed.
///
/// Verifies that the watch still sees the change relative to the target it
/// armed with, even though the stored target was already updated.
///
/// Expected: watch poll reports changed and disarms
#[tokio::test]
async fn watch_poll_uses_baseline_not_stored_target() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db)
        .redirect_target("https://cdn.example.com/a.png", at(8, 0))
        .watcher_armed(true)
        .build()
        .await?;

    let repo = PostSettingsRepository::new(db);

    let interim = repo
        .record_check(AnnouncementKind::Daily, "https://cdn.example.com/b.png", at(9, 0))
        .await?;
    assert!(interim.changed);
    assert!(interim.settings.watcher_armed);

    let polled = repo
        .record_watch_poll(
            AnnouncementKind::Daily,
            Some("https://cdn.example.com/a.png"),
            "https://cdn.example.com/b.png",
            at(9, 1),
        )
        .await?;
    assert!(polled.changed);
    assert!(!polled.settings.watcher_armed);
    assert_eq!(polled.settings.last_modified, Some(at(9, 0)));
    assert_eq!(polled.settings.last_checked, Some(at(9, 1)));

    Ok(())
}

/// Tests checking a kind that has no settings row.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn fails_without_settings_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostSettingsRepository::new(db);
    let result = repo
        .record_check(AnnouncementKind::Weekly, "https://cdn.example.com/a.png", at(9, 0))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
