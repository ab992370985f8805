use crate::{
    data::user_command::UserCommandRepository,
    error::AppError,
    model::user_command::{EditUserCommandParam, UserCommand},
};
use test_utils::{builder::TestBuilder, factory::create_user_command};

mod create;
mod delete;
mod update;

fn command(name: &str, response: &str) -> UserCommand {
    UserCommand {
        name: name.to_string(),
        description: format!("{} command", name),
        response: response.to_string(),
    }
}
