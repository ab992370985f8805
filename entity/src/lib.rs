//! SeaORM entities for the polarity database.

pub mod prelude;

pub mod channel_record;
pub mod post_settings;
pub mod user_command;
