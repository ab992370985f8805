//! Domain models shared by the data, service and bot layers.
//!
//! Models are converted from SeaORM entities at the repository boundary via
//! `from_entity` so the layers above never touch entity types.

pub mod announcement;
pub mod api;
pub mod channel_record;
pub mod embed;
pub mod post_settings;
pub mod user_command;
