pub mod channel_record;
pub mod post_settings;
pub mod user_command;

#[cfg(test)]
mod test;
