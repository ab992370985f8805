//! User command factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_snowflake;

/// Creates a text command with a unique description and the given response.
pub async fn create_user_command(
    db: &DatabaseConnection,
    name: &str,
    response: &str,
) -> Result<entity::user_command::Model, DbErr> {
    entity::user_command::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        description: ActiveValue::Set(format!("Test command {}", next_snowflake())),
        response: ActiveValue::Set(response.to_string()),
    }
    .insert(db)
    .await
}
