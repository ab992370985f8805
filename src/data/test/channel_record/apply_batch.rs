use super::*;

/// Tests committing the result of a fan-out.
///
/// Verifies that new message ids and disables are written together.
///
/// Expected: first record gets the new message, second is disabled
#[tokio::test]
async fn persists_messages_and_disables() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ChannelRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let posted = ChannelRecordFactory::new(db)
        .last_message_id("100")
        .build()
        .await?;
    let dead = ChannelRecordFactory::new(db).build().await?;
    let untouched = ChannelRecordFactory::new(db)
        .last_message_id("300")
        .build()
        .await?;

    let repo = ChannelRecordRepository::new(db);
    repo.apply_batch(&ChannelBatchUpdate {
        last_messages: vec![(posted.id, 101)],
        disabled: vec![dead.id],
    })
    .await?;

    let records = repo.get_enabled(AnnouncementKind::Daily).await?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, posted.id);
    assert_eq!(records[0].last_message_id, Some(101));
    assert_eq!(records[1].id, untouched.id);
    assert_eq!(records[1].last_message_id, Some(300));

    let stored = entity::prelude::ChannelRecord::find_by_id(dead.id)
        .one(db)
        .await?
        .unwrap();
    assert!(!stored.enabled);

    Ok(())
}

/// Tests that an empty batch changes nothing.
///
/// Expected: Ok with records unchanged
#[tokio::test]
async fn empty_batch_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ChannelRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let record = ChannelRecordFactory::new(db)
        .last_message_id("100")
        .build()
        .await?;

    let repo = ChannelRecordRepository::new(db);
    repo.apply_batch(&ChannelBatchUpdate::default()).await?;

    let stored = repo.get_enabled(AnnouncementKind::Daily).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, record.id);
    assert_eq!(stored[0].last_message_id, Some(100));

    Ok(())
}
