//! User-facing commands that show the current announcement embed.

use poise::CreateReply;

use crate::{
    bot::commands::Context, error::AppError, model::announcement::AnnouncementKind,
    service::announcement::AnnouncementService,
};

async fn send_current_embed(ctx: Context<'_>, kind: AnnouncementKind) -> Result<(), AppError> {
    ctx.defer().await?;

    let data = ctx.data();
    let embed = AnnouncementService::new(&data.db)
        .current_embed(kind, data.resolver.as_ref(), data.config.url_check_interval)
        .await?;

    ctx.send(CreateReply::default().embed(embed.to_create_embed()))
        .await?;

    Ok(())
}

/// Daily reset post and infographic
#[poise::command(slash_command)]
pub async fn daily(ctx: Context<'_>) -> Result<(), AppError> {
    send_current_embed(ctx, AnnouncementKind::Daily).await
}

/// Weekly reset post and infographic
#[poise::command(slash_command)]
pub async fn reset(ctx: Context<'_>) -> Result<(), AppError> {
    send_current_embed(ctx, AnnouncementKind::Weekly).await
}

/// Xur infographic and post
#[poise::command(slash_command)]
pub async fn xur(ctx: Context<'_>) -> Result<(), AppError> {
    send_current_embed(ctx, AnnouncementKind::Weekend).await
}
