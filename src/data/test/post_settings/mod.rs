use crate::{
    data::post_settings::PostSettingsRepository,
    error::AppError,
    model::{announcement::AnnouncementKind, post_settings::PostSettingsDefaults},
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory::post_settings::PostSettingsFactory};

mod get_or_create;
mod record_check;
mod set_autoannounce;
mod take_stale_armed;
mod try_arm;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, hour, minute, 0).unwrap()
}
