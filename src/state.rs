//! Application state shared by the signal relay and the bot commands.
//!
//! Initialized once during startup, then cloned into Axum's state extraction
//! and into the poise framework data. Every field is cheap to clone:
//! - `DatabaseConnection` is a connection pool
//! - the resolver and config sit behind an `Arc`
//! - `SignalDispatcher` and `CommandRegistry` share their state through an `Arc`

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    service::{
        command_registry::CommandRegistry, dispatcher::SignalDispatcher,
        url_watcher::LinkResolver,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// Follows infographic and command links one redirect hop.
    pub resolver: Arc<dyn LinkResolver>,

    /// Receives reset signals from the scheduler, the relay and admins.
    pub dispatcher: SignalDispatcher,

    /// Admin-defined text commands.
    pub registry: CommandRegistry,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        resolver: Arc<dyn LinkResolver>,
        dispatcher: SignalDispatcher,
        registry: CommandRegistry,
        config: Arc<Config>,
    ) -> Self {
        Self {
            db,
            resolver,
            dispatcher,
            registry,
            config,
        }
    }
}
