use super::*;

/// Tests creating commands and listing them.
///
/// Expected: commands listed by name
#[tokio::test]
async fn creates_and_lists_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserCommandRepository::new(db);
    repo.create(command("raid", "https://example.com/raid")).await?;
    repo.create(command("dungeon", "https://example.com/dungeon"))
        .await?;

    let names: Vec<String> = repo
        .get_all()
        .await?
        .into_iter()
        .map(|command| command.name)
        .collect();
    assert_eq!(names, vec!["dungeon", "raid"]);

    Ok(())
}

/// Tests creating a command whose name is taken.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_user_command(db, "raid", "first").await?;

    let repo = UserCommandRepository::new(db);
    let result = repo.create(command("raid", "second")).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(
        repo.find_by_name("raid").await?.unwrap().response,
        "first"
    );

    Ok(())
}
