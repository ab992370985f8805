use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder,
    TransactionTrait,
};

use crate::{
    error::AppError,
    model::user_command::{EditUserCommandParam, UserCommand},
};

use entity::user_command::{ActiveModel, Column};

/// Repository for admin-defined text commands.
pub struct UserCommandRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserCommandRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all commands ordered by name.
    pub async fn get_all(&self) -> Result<Vec<UserCommand>, AppError> {
        let commands = entity::prelude::UserCommand::find()
            .order_by_asc(Column::Name)
            .all(self.db)
            .await?;

        Ok(commands.into_iter().map(UserCommand::from_entity).collect())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<UserCommand>, AppError> {
        let command = entity::prelude::UserCommand::find_by_id(name.to_string())
            .one(self.db)
            .await?;

        Ok(command.map(UserCommand::from_entity))
    }

    /// Creates a command.
    ///
    /// # Returns
    /// - `Ok(UserCommand)` - The created command
    /// - `Err(AppError::BadRequest)` - A command with that name already exists
    pub async fn create(&self, command: UserCommand) -> Result<UserCommand, AppError> {
        if self.find_by_name(&command.name).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "Command `{}` already exists",
                command.name
            )));
        }

        let model = ActiveModel {
            name: ActiveValue::Set(command.name),
            description: ActiveValue::Set(command.description),
            response: ActiveValue::Set(command.response),
        }
        .insert(self.db)
        .await?;

        Ok(UserCommand::from_entity(model))
    }

    /// Updates a command, renaming it when `new_name` is given.
    ///
    /// The name is the primary key, so a rename replaces the row inside a
    /// transaction.
    ///
    /// # Returns
    /// - `Ok(Some(UserCommand))` - The updated command
    /// - `Ok(None)` - No command named `name`
    /// - `Err(AppError::BadRequest)` - The new name is already taken
    pub async fn update(
        &self,
        name: &str,
        param: EditUserCommandParam,
    ) -> Result<Option<UserCommand>, AppError> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::UserCommand::find_by_id(name.to_string())
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let model = match param.new_name.filter(|new_name| new_name != name) {
            Some(new_name) => {
                if entity::prelude::UserCommand::find_by_id(new_name.clone())
                    .one(&txn)
                    .await?
                    .is_some()
                {
                    return Err(AppError::BadRequest(format!(
                        "Command `{}` already exists",
                        new_name
                    )));
                }

                let replacement = ActiveModel {
                    name: ActiveValue::Set(new_name),
                    description: ActiveValue::Set(
                        param
                            .new_description
                            .unwrap_or_else(|| existing.description.clone()),
                    ),
                    response: ActiveValue::Set(
                        param
                            .new_response
                            .unwrap_or_else(|| existing.response.clone()),
                    ),
                };
                existing.delete(&txn).await?;
                replacement.insert(&txn).await?
            }
            None => {
                let mut active: ActiveModel = existing.into();
                if let Some(description) = param.new_description {
                    active.description = ActiveValue::Set(description);
                }
                if let Some(response) = param.new_response {
                    active.response = ActiveValue::Set(response);
                }
                active.update(&txn).await?
            }
        };

        txn.commit().await?;

        Ok(Some(UserCommand::from_entity(model)))
    }

    /// Deletes a command.
    ///
    /// # Returns
    /// - `Ok(true)` - The command was deleted
    /// - `Ok(false)` - No command named `name`
    pub async fn delete(&self, name: &str) -> Result<bool, AppError> {
        let result = entity::prelude::UserCommand::delete_by_id(name.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
