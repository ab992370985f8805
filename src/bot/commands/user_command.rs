//! Control-guild management of admin-defined text commands.

use crate::{
    bot::commands::{check::is_admin, sync_commands, Context},
    error::AppError,
    model::user_command::EditUserCommandParam,
};

/// Manage custom text commands
#[poise::command(
    slash_command,
    guild_only,
    subcommands("add", "edit", "delete"),
    subcommand_required
)]
pub async fn command(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Re-registers the command list after the registry changed.
async fn resync(ctx: Context<'_>) -> Result<(), AppError> {
    sync_commands(
        &ctx.serenity_context().http,
        &ctx.framework().options().commands,
        ctx.data(),
    )
    .await
}

/// Add a text command
#[poise::command(slash_command, check = "is_admin")]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Command name"] name: String,
    #[description = "Shown in the command picker"] description: String,
    #[description = "Text the command replies with"] response: String,
) -> Result<(), AppError> {
    let data = ctx.data();
    let command = data
        .registry
        .add(&data.db, &name, description, response)
        .await?;
    resync(ctx).await?;

    ctx.say(format!("Added /{}", command.name)).await?;

    Ok(())
}

/// Edit a text command
#[poise::command(slash_command, check = "is_admin")]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Command to edit"] name: String,
    #[description = "New name"] new_name: Option<String>,
    #[description = "New description"] new_description: Option<String>,
    #[description = "New response"] new_response: Option<String>,
) -> Result<(), AppError> {
    let data = ctx.data();
    let command = data
        .registry
        .edit(
            &data.db,
            &name,
            EditUserCommandParam {
                new_name,
                new_description,
                new_response,
            },
        )
        .await?;
    resync(ctx).await?;

    ctx.say(format!("Updated /{}", command.name)).await?;

    Ok(())
}

/// Delete a text command
#[poise::command(slash_command, check = "is_admin")]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "Command to delete"] name: String,
) -> Result<(), AppError> {
    let data = ctx.data();
    data.registry.remove(&data.db, &name).await?;
    resync(ctx).await?;

    ctx.say(format!("Deleted /{}", name.trim().to_lowercase()))
        .await?;

    Ok(())
}
