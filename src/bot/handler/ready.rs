//! Ready event handlers.
//!
//! The bot's presence shows roughly how many users it reaches, summed from
//! the cached guilds' member counts and refreshed periodically.

use std::time::Duration;

use serenity::all::{ActivityData, Cache, Context, GuildId, Ready};

/// How often the presence is recomputed from the cache.
pub const PRESENCE_REFRESH: Duration = Duration::from_secs(30 * 60);

/// Handles the ready event when the bot connects to Discord.
pub async fn handle_ready(_ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );
}

/// Starts the presence refresh once the guild cache is filled.
///
/// `first_ready` is false on reconnects, where the refresh task is already
/// running.
pub async fn handle_cache_ready(ctx: Context, guilds: Vec<GuildId>, first_ready: bool) {
    tracing::debug!("Cache ready for {} guilds", guilds.len());

    if !first_ready {
        return;
    }

    tokio::spawn(async move {
        refresh_presence(
            PRESENCE_REFRESH,
            || reached_users(&ctx.cache),
            |activity| ctx.set_activity(Some(activity)),
        )
        .await;
    });
}

/// Sets the presence now and then again every `period`.
async fn refresh_presence<U, S>(period: Duration, users: U, set_activity: S)
where
    U: Fn() -> u64,
    S: Fn(ActivityData),
{
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        let users = users();
        tracing::debug!("Refreshing presence, ~{} users", users);
        set_activity(presence(users));
    }
}

fn reached_users(cache: &Cache) -> u64 {
    cache
        .guilds()
        .into_iter()
        .filter_map(|guild_id| cache.guild(guild_id).map(|guild| guild.member_count))
        .sum()
}

fn presence(users: u64) -> ActivityData {
    ActivityData::listening(format!("{} users : )", users))
}
