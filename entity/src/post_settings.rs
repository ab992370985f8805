use sea_orm::entity::prelude::*;

/// Singleton settings row for one announcement type.
///
/// Keyed by `(announcement_type, id)` where `id` is always `0`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub announcement_type: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub url: String,
    pub post_url: String,
    pub redirect_target: Option<String>,
    pub last_modified: Option<DateTimeUtc>,
    pub last_checked: Option<DateTimeUtc>,
    pub watcher_armed: bool,
    pub autoannounce_enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
