use super::*;

/// Tests arming an idle row twice.
///
/// Verifies that the first call claims the watch and the second is refused.
///
/// Expected: true then false
#[tokio::test]
async fn arms_only_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db).build().await?;

    let repo = PostSettingsRepository::new(db);
    assert!(repo.try_arm(AnnouncementKind::Daily).await?);
    assert!(!repo.try_arm(AnnouncementKind::Daily).await?);

    let stored = repo.find(AnnouncementKind::Daily).await?.unwrap();
    assert!(stored.watcher_armed);

    Ok(())
}

/// Tests two triggers racing for the same kind.
///
/// Expected: exactly one caller wins
#[tokio::test]
async fn concurrent_arms_have_one_winner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db).build().await?;

    let repo = PostSettingsRepository::new(db);
    let (first, second) = tokio::join!(
        repo.try_arm(AnnouncementKind::Daily),
        repo.try_arm(AnnouncementKind::Daily),
    );

    assert!(first? ^ second?);

    Ok(())
}

/// Tests that disarming frees the slot again.
///
/// Expected: arm, disarm, arm all succeed
#[tokio::test]
async fn disarm_allows_rearm() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db).build().await?;

    let repo = PostSettingsRepository::new(db);
    assert!(repo.try_arm(AnnouncementKind::Daily).await?);
    repo.disarm(AnnouncementKind::Daily).await?;
    assert!(repo.try_arm(AnnouncementKind::Daily).await?);

    Ok(())
}

/// Tests that arming one kind leaves the others alone.
///
/// Expected: weekly row stays unarmed
#[tokio::test]
async fn arms_only_requested_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db).build().await?;
    PostSettingsFactory::new(db)
        .announcement_type("weekly")
        .build()
        .await?;

    let repo = PostSettingsRepository::new(db);
    assert!(repo.try_arm(AnnouncementKind::Daily).await?);

    let weekly = repo.find(AnnouncementKind::Weekly).await?.unwrap();
    assert!(!weekly.watcher_armed);

    Ok(())
}

/// Tests arming a kind with no settings row.
///
/// Expected: false
#[tokio::test]
async fn missing_row_is_not_armed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostSettingsRepository::new(db);
    assert!(!repo.try_arm(AnnouncementKind::Weekend).await?);

    Ok(())
}
