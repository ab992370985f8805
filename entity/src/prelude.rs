pub use super::channel_record::Entity as ChannelRecord;
pub use super::post_settings::Entity as PostSettings;
pub use super::user_command::Entity as UserCommand;
