//! Control-guild administration of the announcement types.

use serenity::all::CreateMessage;

use crate::{
    bot::commands::{check::is_admin, Context, Toggle},
    data::{channel_record::ChannelRecordRepository, post_settings::PostSettingsRepository},
    error::AppError,
    model::{
        announcement::AnnouncementKind, embed::progress_embed, post_settings::PostSettingsDefaults,
    },
    service::{
        announcement::AnnouncementService,
        discord::{DiscordAnnouncementSink, DiscordProgressReporter},
        dispatcher::TriggerOutcome,
        url_watcher::UrlWatcher,
    },
    util::parse::parse_http_url,
};

/// Manage the reset announcements
#[poise::command(
    slash_command,
    guild_only,
    subcommands("autoposts", "infogfx_url", "post_url", "update", "announce"),
    subcommand_required
)]
pub async fn announcement(_ctx: Context<'_>) -> Result<(), AppError> {
    Ok(())
}

/// Turn automatic announcements on or off
#[poise::command(slash_command, check = "is_admin")]
pub async fn autoposts(
    ctx: Context<'_>,
    #[description = "Announcement type"] kind: AnnouncementKind,
    #[description = "Enable or disable"] toggle: Toggle,
) -> Result<(), AppError> {
    let db = &ctx.data().db;
    let settings = PostSettingsRepository::new(db)
        .set_autoannounce(kind, toggle.is_enable())
        .await?;
    let subscribed = ChannelRecordRepository::new(db).count_enabled(kind).await?;

    ctx.say(autoposts_reply(
        kind.profile().name,
        settings.autoannounce_enabled,
        subscribed,
    ))
    .await?;

    Ok(())
}

fn autoposts_reply(name: &str, enabled: bool, subscribed: u64) -> String {
    let state = if enabled { "enabled" } else { "disabled" };
    let channels = if subscribed == 1 { "channel" } else { "channels" };

    format!(
        "{} autoposts {} ({} {} subscribed)",
        name, state, subscribed, channels
    )
}

/// Show or change the infographic link that is watched for updates
#[poise::command(slash_command, check = "is_admin")]
pub async fn infogfx_url(
    ctx: Context<'_>,
    #[description = "Announcement type"] kind: AnnouncementKind,
    #[description = "New infographic URL"] url: Option<String>,
) -> Result<(), AppError> {
    let repo = PostSettingsRepository::new(&ctx.data().db);
    let profile = kind.profile();

    let message = match url {
        Some(url) => {
            let settings = repo.set_url(kind, parse_http_url(&url)?).await?;
            format!("{} infographic URL set to <{}>", profile.name, settings.url)
        }
        None => {
            let settings = repo
                .get_or_create(kind, PostSettingsDefaults::for_kind(kind))
                .await?;
            format!(
                "{} infographic URL is <{}>\nDefault: <{}>",
                profile.name, settings.url, profile.default_gfx_url
            )
        }
    };
    ctx.say(message).await?;

    Ok(())
}

/// Show or change the link the announcement title points to
#[poise::command(slash_command, check = "is_admin")]
pub async fn post_url(
    ctx: Context<'_>,
    #[description = "Announcement type"] kind: AnnouncementKind,
    #[description = "New post URL"] url: Option<String>,
) -> Result<(), AppError> {
    let repo = PostSettingsRepository::new(&ctx.data().db);
    let profile = kind.profile();

    let message = match url {
        Some(url) => {
            let settings = repo.set_post_url(kind, parse_http_url(&url)?).await?;
            format!("{} post URL set to <{}>", profile.name, settings.post_url)
        }
        None => {
            let settings = repo
                .get_or_create(kind, PostSettingsDefaults::for_kind(kind))
                .await?;
            format!(
                "{} post URL is <{}>\nDefault: <{}>",
                profile.name, settings.post_url, profile.default_post_url
            )
        }
    };
    ctx.say(message).await?;

    Ok(())
}

/// Re-check the infographic and edit every posted announcement to match
#[poise::command(slash_command, check = "is_admin")]
pub async fn update(
    ctx: Context<'_>,
    #[description = "Announcement type"] kind: AnnouncementKind,
) -> Result<(), AppError> {
    ctx.defer().await?;

    let data = ctx.data();
    let http = ctx.serenity_context().http.clone();
    let title = format!("{} correction", kind.profile().name);

    let check = UrlWatcher::new(&data.db, data.resolver.as_ref(), data.config.url_check_interval)
        .check(kind)
        .await?;
    ctx.say(if check.changed {
        "Found a new infographic, correcting announcements"
    } else {
        "Infographic unchanged, correcting announcements"
    })
    .await?;

    let status = ctx
        .channel_id()
        .send_message(
            &http,
            CreateMessage::new().embed(progress_embed(&title, &[], "Starting")),
        )
        .await?;
    let reporter = DiscordProgressReporter::new(http.clone(), status.channel_id, status.id, title);
    let sink = DiscordAnnouncementSink::new(http);

    let report = AnnouncementService::new(&data.db)
        .correct(kind, &sink, &reporter, data.config.disable_bad_channels)
        .await?;
    tracing::info!("{} correction: {}", kind.as_str(), report.summary());

    ctx.say(report.summary()).await?;

    Ok(())
}

/// Send the current announcement out to every subscribed channel now
#[poise::command(slash_command, check = "is_admin")]
pub async fn announce(
    ctx: Context<'_>,
    #[description = "Announcement type"] kind: AnnouncementKind,
) -> Result<(), AppError> {
    let outcome = ctx.data().dispatcher.announce_now(kind).await?;

    let message = match outcome {
        TriggerOutcome::Disabled => format!("{} autoposts are disabled", kind.profile().name),
        _ => "Announcements being sent out now".to_string(),
    };
    ctx.say(message).await?;

    Ok(())
}
