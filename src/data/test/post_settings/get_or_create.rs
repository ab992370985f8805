use super::*;

/// Tests creating a settings row on first access.
///
/// Verifies that the defaults are written and the row starts unarmed with no
/// redirect target.
///
/// Expected: Ok with a new row holding the defaults
#[tokio::test]
async fn creates_row_with_defaults() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostSettingsRepository::new(db);
    let settings = repo
        .get_or_create(
            AnnouncementKind::Daily,
            PostSettingsDefaults::for_kind(AnnouncementKind::Daily),
        )
        .await?;

    assert_eq!(settings.kind, AnnouncementKind::Daily);
    assert_eq!(settings.url, "https://kyber3000.com/Daily");
    assert_eq!(settings.post_url, "https://kyber3000.com/Dailypost");
    assert!(settings.redirect_target.is_none());
    assert!(!settings.watcher_armed);
    assert!(settings.autoannounce_enabled);

    let count = entity::prelude::PostSettings::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that an existing row wins over the defaults.
///
/// Verifies that calling get_or_create for a kind that already has a row
/// returns the stored values instead of overwriting them.
///
/// Expected: Ok with the stored url
#[tokio::test]
async fn returns_existing_row_unchanged() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db)
        .announcement_type("weekly")
        .url("https://example.com/custom")
        .autoannounce_enabled(false)
        .build()
        .await?;

    let repo = PostSettingsRepository::new(db);
    let settings = repo
        .get_or_create(
            AnnouncementKind::Weekly,
            PostSettingsDefaults::for_kind(AnnouncementKind::Weekly),
        )
        .await?;

    assert_eq!(settings.url, "https://example.com/custom");
    assert!(!settings.autoannounce_enabled);

    Ok(())
}

/// Tests concurrent first access from two tasks.
///
/// Verifies that racing callers both succeed and observe the same single row.
///
/// Expected: Ok for both with identical settings and one stored row
#[tokio::test]
async fn concurrent_calls_create_single_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostSettingsRepository::new(db);
    let defaults = PostSettingsDefaults::for_kind(AnnouncementKind::Weekend);

    let (first, second) = tokio::join!(
        repo.get_or_create(AnnouncementKind::Weekend, defaults.clone()),
        repo.get_or_create(AnnouncementKind::Weekend, defaults),
    );

    assert_eq!(first?, second?);

    let count = entity::prelude::PostSettings::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that kinds are stored independently.
///
/// Expected: one row per kind
#[tokio::test]
async fn creates_one_row_per_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostSettingsRepository::new(db);
    for kind in AnnouncementKind::ALL {
        let settings = repo
            .get_or_create(kind, PostSettingsDefaults::for_kind(kind))
            .await?;
        assert_eq!(settings.kind, kind);
    }

    let count = entity::prelude::PostSettings::find().count(db).await?;
    assert_eq!(count, 3);

    Ok(())
}
