//! Typed access to one top-level collection of the document store.
//!
//! Records of a collection are stored at `{collection}/{id - 1}`.
//! Reads always fetch the whole collection and scan it; there is no index
//! and no cache.

use std::marker::PhantomData;

use serde_json::Value;

use super::{DocumentStore, StoreError};
use crate::domain::{DomainError, DomainResult, Entity};

/// Normalise a collection read: arrays and index-keyed objects become a
/// list in index order, `null` holes are dropped, nothing stored means empty
pub fn collection_values(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.into_iter().filter(|v| !v.is_null()).collect(),
        Some(Value::Object(map)) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by_key(|(key, _)| key.parse::<u64>().unwrap_or(u64::MAX));
            entries.into_iter().map(|(_, v)| v).filter(|v| !v.is_null()).collect()
        }
        _ => Vec::new(),
    }
}

/// Repository over one collection of `T`
pub struct Collection<'a, T, S: ?Sized> {
    store: &'a S,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S: ?Sized> Clone for Collection<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: ?Sized> Copy for Collection<'_, T, S> {}

impl<'a, T, S> Collection<'a, T, S>
where
    T: Entity,
    S: DocumentStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store, _entity: PhantomData }
    }

    /// Store path of the record with this id
    pub fn record_path(id: u32) -> DomainResult<String> {
        if id == 0 {
            return Err(DomainError::InvalidInput(format!("{} id 0 has no record", T::COLLECTION)));
        }
        Ok(format!("{}/{}", T::COLLECTION, id - 1))
    }

    /// All records; malformed entries are logged and skipped
    pub async fn list(&self) -> DomainResult<Vec<T>> {
        let raw = self.store.get(T::COLLECTION).await?;
        let mut records = Vec::new();
        for value in collection_values(raw) {
            match serde_json::from_value::<T>(value) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("[{}] skipping malformed record: {}", T::COLLECTION, e),
            }
        }
        Ok(records)
    }

    pub async fn find_by_id(&self, id: u32) -> DomainResult<Option<T>> {
        Ok(self.list().await?.into_iter().find(|record| record.id() == id))
    }

    /// Like `find_by_id`, but a missing record is an error
    pub async fn get(&self, id: u32) -> DomainResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("{} {}", T::COLLECTION, id)))
    }

    /// Highest existing id plus one. Racy under concurrent writers.
    ///
    /// Reads the raw `id` of every stored value, so records that do not
    /// decode as `T` still reserve their slot.
    pub async fn next_id(&self) -> DomainResult<u32> {
        let raw = self.store.get(T::COLLECTION).await?;
        let max = collection_values(raw)
            .iter()
            .filter_map(|value| value.get("id").and_then(Value::as_u64))
            .max()
            .unwrap_or(0);
        u32::try_from(max + 1)
            .map_err(|_| DomainError::InvalidInput(format!("{} id {} out of range", T::COLLECTION, max)))
    }

    /// Allocate an id for `entity` and store it
    pub async fn create(&self, mut entity: T) -> DomainResult<T> {
        let id = self.next_id().await?;
        entity.set_id(id);
        self.save(&entity).await?;
        log::info!("[{}] created record {}", T::COLLECTION, id);
        Ok(entity)
    }

    /// Write the whole record to its path
    pub async fn save(&self, entity: &T) -> DomainResult<()> {
        let path = Self::record_path(entity.id())?;
        let value = serde_json::to_value(entity)
            .map_err(|source| StoreError::Decode { path: path.clone(), source })?;
        self.store.put(&path, &value).await?;
        Ok(())
    }

    pub async fn remove(&self, id: u32) -> DomainResult<()> {
        let path = Self::record_path(id)?;
        self.store.delete(&path).await?;
        log::info!("[{}] removed record {}", T::COLLECTION, id);
        Ok(())
    }

    /// Write a single nested field below a record
    pub async fn write_field(&self, id: u32, field: &str, value: &Value) -> DomainResult<()> {
        let path = format!("{}/{}", Self::record_path(id)?, field.trim_matches('/'));
        self.store.put(&path, value).await?;
        Ok(())
    }
}
