use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::db::error::StoreError;
use crate::db::store::{Collection, DocumentStore, Filter};

type Documents = HashMap<Collection, Vec<(Uuid, Value)>>;

/// In-process document store. Used for local runs and tests.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<Documents>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Documents>, StoreError> {
        self.documents
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Documents>, StoreError> {
        self.documents
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError> {
        let documents = self.read()?;
        Ok(documents
            .get(&collection)
            .map(|rows| {
                rows.iter()
                    .filter(|(_, body)| filter.matches(body))
                    .map(|(_, body)| body.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        collection: Collection,
        id: Uuid,
        document: Value,
    ) -> Result<(), StoreError> {
        let mut documents = self.write()?;
        let rows = documents.entry(collection).or_default();
        if rows.iter().any(|(existing, _)| *existing == id) {
            return Err(StoreError::Duplicate {
                collection: collection.name(),
                id: id.to_string(),
            });
        }
        rows.push((id, document));
        Ok(())
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Value,
    ) -> Result<bool, StoreError> {
        let Value::Object(changes) = changes else {
            return Err(StoreError::Encode(
                "update changes must be a JSON object".to_string(),
            ));
        };

        let mut documents = self.write()?;
        let Some((_, body)) = documents
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|(existing, _)| *existing == id))
        else {
            return Ok(false);
        };

        if let Value::Object(fields) = body {
            for (key, value) in changes {
                fields.insert(key, value);
            }
        }
        Ok(true)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let documents = self.read()?;
        Ok(documents
            .get(&collection)
            .map(|rows| rows.iter().filter(|(_, body)| filter.matches(body)).count() as u64)
            .unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}
