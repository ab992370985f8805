//! Answers admin-defined text commands.

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, Interaction,
};

use crate::{error::AppError, service::command_registry::expand_links, state::AppState};

/// Replies to a user command with its response, links followed one hop.
///
/// Interactions for built-in commands are ignored here; poise answers them.
pub async fn handle_interaction_create(state: &AppState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let Some(user_command) = state.registry.get(&command.data.name).await else {
        return;
    };

    if let Err(e) = respond(state, &ctx, &command, &user_command.response).await {
        tracing::error!("Failed to answer /{}: {}", command.data.name, e);
    }
}

async fn respond(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    response: &str,
) -> Result<(), AppError> {
    // Following links can take longer than the interaction deadline.
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await?;

    let content = expand_links(state.resolver.as_ref(), response).await;

    command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;

    Ok(())
}
