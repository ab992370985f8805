//! Admin-defined text commands.
//!
//! The registry keeps the commands in memory for dispatch and writes every
//! change through to the database. The write lock is held across the database
//! call so the table and the rows never disagree.

use std::{
    collections::{BTreeMap, HashSet},
    sync::{Arc, LazyLock},
};

use regex::Regex;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::{
    data::user_command::UserCommandRepository,
    error::AppError,
    model::user_command::{EditUserCommandParam, UserCommand},
    service::url_watcher::LinkResolver,
};

/// Discord's limit on command descriptions.
const MAX_DESCRIPTION_LEN: usize = 100;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]{1,32}$").expect("command name pattern"));

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>]+").expect("url pattern"));

#[derive(Clone)]
pub struct CommandRegistry {
    commands: Arc<RwLock<BTreeMap<String, UserCommand>>>,
    /// Names taken by built-in commands.
    reserved: Arc<HashSet<String>>,
}

impl CommandRegistry {
    pub fn new<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: Arc::new(RwLock::new(BTreeMap::new())),
            reserved: Arc::new(reserved.into_iter().map(Into::into).collect()),
        }
    }

    /// Replaces the in-memory table with the stored commands.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of commands loaded
    pub async fn load(&self, db: &DatabaseConnection) -> Result<usize, AppError> {
        let stored = UserCommandRepository::new(db).get_all().await?;

        let mut commands = self.commands.write().await;
        *commands = stored
            .into_iter()
            .map(|command| (command.name.clone(), command))
            .collect();

        tracing::info!("Loaded {} user commands", commands.len());

        Ok(commands.len())
    }

    /// All commands ordered by name.
    pub async fn list(&self) -> Vec<UserCommand> {
        self.commands.read().await.values().cloned().collect()
    }

    pub async fn get(&self, name: &str) -> Option<UserCommand> {
        self.commands.read().await.get(name).cloned()
    }

    /// Adds a command after normalizing and validating it.
    ///
    /// # Returns
    /// - `Ok(UserCommand)` - The stored command
    /// - `Err(AppError::BadRequest)` - Invalid or taken name, or invalid description
    pub async fn add(
        &self,
        db: &DatabaseConnection,
        name: &str,
        description: String,
        response: String,
    ) -> Result<UserCommand, AppError> {
        let name = self.available_name(name)?;
        validate_description(&description)?;

        let mut commands = self.commands.write().await;
        let command = UserCommandRepository::new(db)
            .create(UserCommand {
                name,
                description,
                response,
            })
            .await?;
        commands.insert(command.name.clone(), command.clone());

        Ok(command)
    }

    /// Edits a command, renaming it when requested.
    ///
    /// # Returns
    /// - `Ok(UserCommand)` - The command after the edit
    /// - `Err(AppError::NotFound)` - No command named `name`
    /// - `Err(AppError::BadRequest)` - Nothing to change, or invalid new values
    pub async fn edit(
        &self,
        db: &DatabaseConnection,
        name: &str,
        mut param: EditUserCommandParam,
    ) -> Result<UserCommand, AppError> {
        if param.is_empty() {
            return Err(AppError::BadRequest("Nothing to change".to_string()));
        }

        let name = normalize_name(name)?;
        if let Some(new_name) = param.new_name.take() {
            param.new_name = Some(self.available_name(&new_name)?);
        }
        if let Some(description) = &param.new_description {
            validate_description(description)?;
        }

        let mut commands = self.commands.write().await;
        let command = UserCommandRepository::new(db)
            .update(&name, param)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No command named `{}`", name)))?;

        commands.remove(&name);
        commands.insert(command.name.clone(), command.clone());

        Ok(command)
    }

    /// # Returns
    /// - `Ok(())` - The command was removed
    /// - `Err(AppError::NotFound)` - No command named `name`
    pub async fn remove(&self, db: &DatabaseConnection, name: &str) -> Result<(), AppError> {
        let name = normalize_name(name)?;

        let mut commands = self.commands.write().await;
        if !UserCommandRepository::new(db).delete(&name).await? {
            return Err(AppError::NotFound(format!("No command named `{}`", name)));
        }
        commands.remove(&name);

        Ok(())
    }

    fn available_name(&self, name: &str) -> Result<String, AppError> {
        let name = normalize_name(name)?;

        if self.reserved.contains(&name) {
            return Err(AppError::BadRequest(format!(
                "`{}` is a built-in command",
                name
            )));
        }

        Ok(name)
    }
}

/// Lowercases a command name and checks it against Discord's naming rules.
pub fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim().to_lowercase();

    if !NAME_PATTERN.is_match(&name) {
        return Err(AppError::BadRequest(format!(
            "`{}` is not a valid command name (1-32 of a-z, 0-9, - and _)",
            name
        )));
    }

    Ok(name)
}

fn validate_description(description: &str) -> Result<(), AppError> {
    let len = description.trim().chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LEN {
        return Err(AppError::BadRequest(format!(
            "Description must be 1-{} characters",
            MAX_DESCRIPTION_LEN
        )));
    }

    Ok(())
}

/// Replaces every link in `response` with where it redirects to, one hop.
///
/// Links that fail to resolve are left as they are.
pub async fn expand_links(resolver: &dyn LinkResolver, response: &str) -> String {
    let mut expanded = String::with_capacity(response.len());
    let mut last = 0;

    for link in URL_PATTERN.find_iter(response) {
        expanded.push_str(&response[last..link.start()]);

        match resolver.resolve_one_hop(link.as_str()).await {
            Ok(target) => expanded.push_str(&target),
            Err(e) => {
                tracing::warn!("Keeping unresolved link in command response: {}", e);
                expanded.push_str(link.as_str());
            }
        }

        last = link.end();
    }

    expanded.push_str(&response[last..]);
    expanded
}
