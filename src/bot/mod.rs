//! Discord bot: slash commands and gateway events.
//!
//! Built-in commands are poise commands sharing [`AppState`](crate::state::AppState)
//! as framework data. Admin-defined text commands are not known at compile
//! time, so the serenity event handler answers those interactions itself.
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is requested. Announcements go out over REST and commands
//! arrive as interactions, so no message or member events are needed.

pub mod commands;
pub mod handler;
pub mod start;
