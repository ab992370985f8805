use poise::{CreateReply, FrameworkError};
use serenity::all::{Client, GatewayIntents};

use crate::{bot::commands, bot::handler::Handler, error::AppError, state::AppState};

/// Builds the Discord client with the poise framework and the event handler.
///
/// Commands are synced with Discord once the framework sets up, so the
/// returned client must still be started by the caller.
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError::DiscordErr)` - Failed to build the client
pub async fn init_bot(state: AppState) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;
    let token = state.config.discord_token.clone();
    let handler = Handler::new(state.clone());

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                commands::sync_commands(&ctx.http, &framework.options().commands, &state).await?;
                Ok(state)
            })
        })
        .build();

    let client = Client::builder(&token, intents)
        .framework(framework)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Reports command failures back to the invoking user.
///
/// `BadRequest` and `NotFound` carry a message meant for the user. Anything
/// else is logged and answered with a generic message.
async fn on_error(error: FrameworkError<'_, AppState, AppError>) {
    match error {
        FrameworkError::Command { error, ctx, .. } => {
            let message = match error {
                AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
                err => {
                    tracing::error!("/{} failed: {}", ctx.command().qualified_name, err);
                    "Something went wrong, the error has been logged.".to_string()
                }
            };

            if let Err(e) = ctx
                .send(CreateReply::default().content(message).ephemeral(true))
                .await
            {
                tracing::warn!("Failed to report command error: {}", e);
            }
        }
        FrameworkError::CommandCheckFailed {
            error: None, ctx, ..
        } => {
            if let Err(e) = ctx
                .send(
                    CreateReply::default()
                        .content("You are not allowed to use this command here.")
                        .ephemeral(true),
                )
                .await
            {
                tracing::warn!("Failed to report failed check: {}", e);
            }
        }
        // Admin-defined commands are answered by the event handler.
        FrameworkError::UnknownInteraction { interaction, .. } => {
            tracing::debug!("Leaving /{} to the event handler", interaction.data.name);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Failed to handle framework error: {}", e);
            }
        }
    }
}
