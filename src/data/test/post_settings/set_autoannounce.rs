use super::*;

/// Tests disabling autoannounce for a kind that has no row yet.
///
/// Verifies that the row is created from the profile defaults with the flag off.
///
/// Expected: Ok with autoannounce_enabled = false and default urls
#[tokio::test]
async fn creates_row_when_absent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostSettingsRepository::new(db);
    let settings = repo
        .set_autoannounce(AnnouncementKind::Weekend, false)
        .await?;

    assert!(!settings.autoannounce_enabled);
    assert_eq!(settings.url, "https://kyber3000.com/Xur");

    Ok(())
}

/// Tests toggling autoannounce on an existing row.
///
/// Expected: flag flips, everything else is kept
#[tokio::test]
async fn toggles_existing_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    PostSettingsFactory::new(db)
        .url("https://example.com/custom")
        .redirect_target("https://cdn.example.com/a.png", at(8, 0))
        .build()
        .await?;

    let repo = PostSettingsRepository::new(db);
    let off = repo.set_autoannounce(AnnouncementKind::Daily, false).await?;
    assert!(!off.autoannounce_enabled);
    assert_eq!(off.url, "https://example.com/custom");
    assert_eq!(
        off.redirect_target.as_deref(),
        Some("https://cdn.example.com/a.png")
    );

    let on = repo.set_autoannounce(AnnouncementKind::Daily, true).await?;
    assert!(on.autoannounce_enabled);

    Ok(())
}

/// Tests replacing both urls.
///
/// Expected: the new urls are stored
#[tokio::test]
async fn updates_urls() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PostSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostSettingsRepository::new(db);
    repo.set_url(AnnouncementKind::Weekly, "https://example.com/gfx".to_string())
        .await?;
    let settings = repo
        .set_post_url(AnnouncementKind::Weekly, "https://example.com/post".to_string())
        .await?;

    assert_eq!(settings.url, "https://example.com/gfx");
    assert_eq!(settings.post_url, "https://example.com/post");

    Ok(())
}
