use super::*;

/// Tests clearing arm flags left by a previous process.
///
/// Verifies that every armed kind is returned and no row stays armed.
///
/// Expected: Ok with the daily and weekend kinds
#[tokio::test]
async fn returns_and_clears_armed_kinds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db).watcher_armed(true).build().await?;
    PostSettingsFactory::new(db)
        .announcement_type("weekly")
        .build()
        .await?;
    PostSettingsFactory::new(db)
        .announcement_type("weekend")
        .watcher_armed(true)
        .build()
        .await?;

    let repo = PostSettingsRepository::new(db);
    let mut stale = repo.take_stale_armed().await?;
    stale.sort_by_key(|kind| kind.as_str());

    assert_eq!(stale, vec![AnnouncementKind::Daily, AnnouncementKind::Weekend]);

    for kind in AnnouncementKind::ALL {
        assert!(!repo.find(kind).await?.unwrap().watcher_armed);
    }

    Ok(())
}

/// Tests a clean startup.
///
/// Expected: Ok with no kinds
#[tokio::test]
async fn empty_when_nothing_armed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db).build().await?;

    let repo = PostSettingsRepository::new(db);
    assert!(repo.take_stale_armed().await?.is_empty());

    Ok(())
}
