use super::*;

/// Tests editing the response in place.
///
/// Expected: response replaced, description kept
#[tokio::test]
async fn updates_fields_in_place() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let original = create_user_command(db, "raid", "old").await?;

    let repo = UserCommandRepository::new(db);
    let updated = repo
        .update(
            "raid",
            EditUserCommandParam {
                new_response: Some("new".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "raid");
    assert_eq!(updated.response, "new");
    assert_eq!(updated.description, original.description);

    Ok(())
}

/// Tests renaming a command.
///
/// Expected: the old name is gone and the new one carries the old fields
#[tokio::test]
async fn renames_command() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_user_command(db, "raid", "https://example.com/raid").await?;

    let repo = UserCommandRepository::new(db);
    let renamed = repo
        .update(
            "raid",
            EditUserCommandParam {
                new_name: Some("raids".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(renamed.name, "raids");
    assert_eq!(renamed.response, "https://example.com/raid");
    assert!(repo.find_by_name("raid").await?.is_none());

    Ok(())
}

/// Tests renaming onto an existing command.
///
/// Expected: Err(AppError::BadRequest) and both commands intact
#[tokio::test]
async fn rejects_rename_collision() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_user_command(db, "raid", "a").await?;
    create_user_command(db, "dungeon", "b").await?;

    let repo = UserCommandRepository::new(db);
    let result = repo
        .update(
            "raid",
            EditUserCommandParam {
                new_name: Some("dungeon".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(repo.get_all().await?.len(), 2);

    Ok(())
}

/// Tests editing an unknown command.
///
/// Expected: Ok(None)
#[tokio::test]
async fn unknown_command_returns_none() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserCommandRepository::new(db);
    let result = repo
        .update("missing", EditUserCommandParam::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
