use crate::{
    bot::commands::{Context, Toggle},
    data::channel_record::ChannelRecordRepository,
    error::AppError,
    model::announcement::AnnouncementKind,
};

/// Post reset announcements in this channel
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    default_member_permissions = "MANAGE_GUILD"
)]
pub async fn autopost(
    ctx: Context<'_>,
    #[description = "Announcement type"] kind: AnnouncementKind,
    #[description = "Enable or disable"] toggle: Toggle,
) -> Result<(), AppError> {
    let Some(guild_id) = ctx.guild_id() else {
        return Err(AppError::BadRequest(
            "Autoposts can only be set up in a server".to_string(),
        ));
    };
    let channel_id = ctx.channel_id().get();
    let repo = ChannelRecordRepository::new(&ctx.data().db);
    let name = kind.profile().name;

    let message = match toggle {
        Toggle::Enable => {
            repo.enable(channel_id, guild_id.get(), kind).await?;
            tracing::info!("Enabled {} autoposts in channel {}", kind.as_str(), channel_id);
            format!("{} announcements will be posted in this channel", name)
        }
        Toggle::Disable => match repo.disable(channel_id, kind).await? {
            Some(_) => {
                tracing::info!("Disabled {} autoposts in channel {}", kind.as_str(), channel_id);
                format!("{} announcements will no longer be posted here", name)
            }
            None => format!("{} announcements were not set up in this channel", name),
        },
    };
    ctx.say(message).await?;

    Ok(())
}
