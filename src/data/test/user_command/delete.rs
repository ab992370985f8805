use super::*;

/// Tests deleting commands.
///
/// Expected: true for an existing command, false afterwards
#[tokio::test]
async fn deletes_existing_command() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_user_command(db, "raid", "a").await?;

    let repo = UserCommandRepository::new(db);
    assert!(repo.delete("raid").await?);
    assert!(!repo.delete("raid").await?);
    assert!(repo.find_by_name("raid").await?.is_none());

    Ok(())
}
