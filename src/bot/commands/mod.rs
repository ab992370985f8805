//! Built-in slash commands.
//!
//! `announcement` and `command` are administration commands registered only in
//! the control guild. Everything else, including the admin-defined text
//! commands, is registered globally.

use serenity::all::{Command as GlobalCommand, CreateCommand, GuildId, Http};

use crate::{error::AppError, state::AppState};

pub mod announcement;
pub mod autopost;
pub mod check;
pub mod embed;
pub mod user_command;

pub type Context<'a> = poise::Context<'a, AppState, AppError>;
pub type Command = poise::Command<AppState, AppError>;

/// Commands that only make sense in the control guild.
const CONTROL_COMMANDS: [&str; 2] = ["announcement", "command"];

/// Subscription switch used by the autopost commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum Toggle {
    Enable,
    Disable,
}

impl Toggle {
    pub fn is_enable(self) -> bool {
        self == Self::Enable
    }
}

pub fn all() -> Vec<Command> {
    vec![
        announcement::announcement(),
        user_command::command(),
        autopost::autopost(),
        embed::daily(),
        embed::reset(),
        embed::xur(),
    ]
}

/// Names user commands may not take.
pub fn builtin_names() -> Vec<String> {
    all().into_iter().map(|command| command.name).collect()
}

fn is_control_command(command: &Command) -> bool {
    CONTROL_COMMANDS.contains(&command.name.as_str())
}

/// Registers the built-in and admin-defined commands with Discord.
///
/// Replaces the whole global list, so it is called again after every change to
/// the user commands. With `TEST_ENV` set everything goes to the control guild
/// instead, where changes show up immediately.
pub async fn sync_commands(
    http: &Http,
    commands: &[Command],
    state: &AppState,
) -> Result<(), AppError> {
    let control_guild = GuildId::new(state.config.control_discord_server_id);

    let (control, mut global): (Vec<CreateCommand>, Vec<CreateCommand>) = {
        let (control, global): (Vec<&Command>, Vec<&Command>) =
            commands.iter().partition(|command| is_control_command(command));

        (
            control
                .into_iter()
                .filter_map(Command::create_as_slash_command)
                .collect(),
            global
                .into_iter()
                .filter_map(Command::create_as_slash_command)
                .collect(),
        )
    };

    let user_commands = state.registry.list().await;
    global.extend(
        user_commands
            .iter()
            .map(|command| CreateCommand::new(&command.name).description(&command.description)),
    );

    tracing::info!(
        "Registering {} control and {} global commands",
        control.len(),
        global.len()
    );

    if state.config.test_env {
        control_guild
            .set_commands(http, control.into_iter().chain(global).collect())
            .await?;
    } else {
        control_guild.set_commands(http, control).await?;
        GlobalCommand::set_global_commands(http, global).await?;
    }

    Ok(())
}
