use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::{entities::setting, error::StorageError};

/// Durable string settings keyed by name.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Settings persisted in the local SQLite database.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    db: DatabaseConnection,
}

impl SqliteKeyValueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = setting::Entity::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(row.map(|r| r.content))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let model = setting::ActiveModel {
            name: Set(key.to_string()),
            content: Set(value.to_string()),
            updated_at: Set(jiff::Timestamp::now().as_second()),
        };

        setting::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(setting::Column::Name)
                    .update_columns([setting::Column::Content, setting::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
