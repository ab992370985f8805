use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, DbBackend, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Collects the tables a test needs and creates them in a fresh database.
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(entity::prelude::UserCommand)
///     .build()
///     .await?;
/// let db = test.db.as_ref().unwrap();
/// ```
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a `CREATE TABLE` for `entity`, generated for SQLite.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        self.tables
            .push(Schema::new(DbBackend::Sqlite).create_table_from_entity(entity));
        self
    }

    /// Settings and channel records, everything the watcher and the fan-out touch.
    pub fn with_announcement_tables(self) -> Self {
        self.with_table(PostSettings).with_table(ChannelRecord)
    }

    /// Opens the database and creates the queued tables.
    ///
    /// The connection is opened even when no table was queued.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.database().await?;
        context.create_tables(self.tables).await?;

        Ok(context)
    }
}
