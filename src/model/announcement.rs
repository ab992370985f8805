//! Announcement kinds and the per-kind configuration that drives them.
//!
//! Every announcement type behaves the same way: it watches an infographic
//! link, posts an embed and corrects it on demand. What differs is captured in
//! an [`AnnouncementProfile`]: the validity window, the embed text and the
//! default URLs.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};

use crate::error::internal::InternalError;

/// Hour (UTC) at which the game's daily and weekly content resets.
pub const RESET_HOUR: i64 = 17;

/// Embed colour used for every announcement.
pub const ANNOUNCEMENT_COLOR: u32 = 0xEC42A5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, poise::ChoiceParameter)]
pub enum AnnouncementKind {
    #[name = "Daily reset"]
    Daily,
    #[name = "Weekly reset"]
    Weekly,
    #[name = "Weekend (Xur)"]
    Weekend,
}

impl AnnouncementKind {
    pub const ALL: [AnnouncementKind; 3] = [Self::Daily, Self::Weekly, Self::Weekend];

    /// Value stored in the `announcement_type` columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Weekend => "weekend",
        }
    }

    /// Path segment used by the loopback signal relay.
    pub fn signal_name(&self) -> &'static str {
        match self {
            Self::Daily => "daily-reset-signal",
            Self::Weekly => "weekly-reset-signal",
            Self::Weekend => "weekend-reset-signal",
        }
    }

    pub fn from_signal_name(signal: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.signal_name() == signal)
    }

    /// Parses a stored `announcement_type` value.
    pub fn from_db(value: &str) -> Result<Self, InternalError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| InternalError::UnknownAnnouncementKind(value.to_string()))
    }

    pub fn profile(&self) -> &'static AnnouncementProfile {
        match self {
            Self::Daily => &DAILY,
            Self::Weekly => &WEEKLY,
            Self::Weekend => &WEEKEND,
        }
    }
}

/// Period during which an announcement's content is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Per-kind configuration for an announcement type.
pub struct AnnouncementProfile {
    /// Human readable name used in admin responses.
    pub name: &'static str,
    /// Name of the user-facing slash command showing the current embed.
    pub command_name: &'static str,
    pub command_description: &'static str,
    /// Title template, see [`AnnouncementProfile::render`] for placeholders.
    pub embed_title: &'static str,
    /// Description template, see [`AnnouncementProfile::render`] for placeholders.
    pub embed_description: &'static str,
    pub default_gfx_url: &'static str,
    pub default_post_url: &'static str,
    /// Six-field cron expression (UTC) at which the kind's reset happens.
    pub reset_schedule: &'static str,
    pub validity_period: fn(DateTime<Utc>) -> ValidityWindow,
}

impl AnnouncementProfile {
    /// Fills a template with the validity window.
    ///
    /// Supported placeholders: `{start_day_name}`, `{start_month}`, `{start_day}`,
    /// `{end_day_name}`, `{end_month}` and `{end_day}`.
    pub fn render(template: &str, window: &ValidityWindow) -> String {
        template
            .replace("{start_day_name}", &window.start.format("%A").to_string())
            .replace("{start_month}", &window.start.format("%B").to_string())
            .replace("{start_day}", &window.start.day().to_string())
            .replace("{end_day_name}", &window.end.format("%A").to_string())
            .replace("{end_month}", &window.end.format("%B").to_string())
            .replace("{end_day}", &window.end.day().to_string())
    }
}

static DAILY: AnnouncementProfile = AnnouncementProfile {
    name: "Daily reset",
    command_name: "daily",
    command_description: "Daily reset post and infographic",
    embed_title: "Daily Reset Post and Infographic",
    embed_description: "**Valid** {start_day_name}, {start_month} {start_day}",
    default_gfx_url: "https://kyber3000.com/Daily",
    default_post_url: "https://kyber3000.com/Dailypost",
    reset_schedule: "0 0 17 * * *",
    validity_period: day_period,
};

static WEEKLY: AnnouncementProfile = AnnouncementProfile {
    name: "Weekly reset",
    command_name: "reset",
    command_description: "Weekly reset post and infographic",
    embed_title: "Weekly Reset Post and Infographic",
    embed_description: "**From** {start_day_name}, {start_month} {start_day}\n\
                        **Till** {end_day_name}, {end_month} {end_day}",
    default_gfx_url: "https://kyber3000.com/Reset",
    default_post_url: "https://kyber3000.com/Resetpost",
    reset_schedule: "0 0 17 * * Tue",
    validity_period: week_period,
};

static WEEKEND: AnnouncementProfile = AnnouncementProfile {
    name: "Xur",
    command_name: "xur",
    command_description: "Xur infographic and post",
    embed_title: "Xur's Inventory and Location",
    embed_description: "**Arrives:** {start_day_name}, {start_month} {start_day}\n\
                        **Departs:** {end_day_name}, {end_month} {end_day}",
    default_gfx_url: "https://kyber3000.com/Xur",
    default_post_url: "https://kyber3000.com/Xurpost",
    reset_schedule: "0 0 17 * * Fri",
    validity_period: weekend_period,
};

/// Most recent daily reset at or before `at`.
fn last_daily_reset(at: DateTime<Utc>) -> DateTime<Utc> {
    let midnight = Utc.from_utc_datetime(&at.date_naive().and_time(NaiveTime::default()));
    let reset = midnight + Duration::hours(RESET_HOUR);

    if reset > at {
        reset - Duration::days(1)
    } else {
        reset
    }
}

/// Most recent reset falling on `weekday` at or before `at`.
fn last_weekly_reset(at: DateTime<Utc>, weekday: Weekday) -> DateTime<Utc> {
    let reset = last_daily_reset(at);
    let days_back = (reset.weekday().num_days_from_monday() + 7
        - weekday.num_days_from_monday())
        % 7;

    reset - Duration::days(days_back as i64)
}

pub fn day_period(at: DateTime<Utc>) -> ValidityWindow {
    let start = last_daily_reset(at);
    ValidityWindow {
        start,
        end: start + Duration::days(1),
    }
}

pub fn week_period(at: DateTime<Utc>) -> ValidityWindow {
    let start = last_weekly_reset(at, Weekday::Tue);
    ValidityWindow {
        start,
        end: start + Duration::days(7),
    }
}

/// Xur arrives with the Friday reset and leaves with the Tuesday reset.
pub fn weekend_period(at: DateTime<Utc>) -> ValidityWindow {
    let start = last_weekly_reset(at, Weekday::Fri);
    ValidityWindow {
        start,
        end: start + Duration::days(4),
    }
}
