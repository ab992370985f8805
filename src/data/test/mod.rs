mod post_settings;
mod user_command;
