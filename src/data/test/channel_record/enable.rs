use super::*;

/// Tests subscribing a new channel.
///
/// Expected: Ok with an enabled record and no last message
#[tokio::test]
async fn creates_new_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ChannelRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ChannelRecordRepository::new(db);
    let record = repo.enable(42, 7, AnnouncementKind::Weekly).await?;

    assert_eq!(record.channel_id, 42);
    assert_eq!(record.server_id, 7);
    assert_eq!(record.kind, AnnouncementKind::Weekly);
    assert!(record.enabled);
    assert!(record.last_message_id.is_none());

    Ok(())
}

/// Tests re-enabling a disabled subscription.
///
/// Verifies that the existing row is reused and its last message survives so
/// the next correction can still edit it.
///
/// Expected: same id, enabled, last_message_id kept
#[tokio::test]
async fn reenables_existing_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ChannelRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = ChannelRecordFactory::new(db)
        .channel_id("42")
        .last_message_id("555")
        .enabled(false)
        .build()
        .await?;

    let repo = ChannelRecordRepository::new(db);
    let record = repo.enable(42, 7, AnnouncementKind::Daily).await?;

    assert_eq!(record.id, existing.id);
    assert!(record.enabled);
    assert_eq!(record.last_message_id, Some(555));

    let count = entity::prelude::ChannelRecord::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that one channel can subscribe to several kinds.
///
/// Expected: two distinct records
#[tokio::test]
async fn kinds_are_separate_subscriptions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ChannelRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ChannelRecordRepository::new(db);
    let daily = repo.enable(42, 7, AnnouncementKind::Daily).await?;
    let weekend = repo.enable(42, 7, AnnouncementKind::Weekend).await?;

    assert_ne!(daily.id, weekend.id);

    Ok(())
}

/// Tests disabling subscriptions.
///
/// Expected: Some for a subscribed channel, None for an unknown one
#[tokio::test]
async fn disable_marks_record_disabled() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ChannelRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ChannelRecordRepository::new(db);
    repo.enable(42, 7, AnnouncementKind::Daily).await?;

    let disabled = repo.disable(42, AnnouncementKind::Daily).await?;
    assert!(matches!(disabled, Some(ref record) if !record.enabled));

    assert!(repo.disable(43, AnnouncementKind::Daily).await?.is_none());
    assert!(repo.disable(42, AnnouncementKind::Weekly).await?.is_none());

    let stored = repo.find(42, AnnouncementKind::Daily).await?.unwrap();
    assert!(!stored.enabled);

    Ok(())
}
