use serenity::all::RoleId;

use crate::{bot::commands::Context, error::AppError};

/// Passes for members holding the admin role in the control guild.
pub async fn is_admin(ctx: Context<'_>) -> Result<bool, AppError> {
    let config = &ctx.data().config;

    if ctx.guild_id().map(|guild_id| guild_id.get()) != Some(config.control_discord_server_id) {
        return Ok(false);
    }

    let Some(member) = ctx.author_member().await else {
        return Ok(false);
    };

    Ok(member.roles.contains(&RoleId::new(config.admin_role)))
}
