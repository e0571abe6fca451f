// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory record store.
//!
//! Records are kept as JSON objects per resource, in insertion order.
//! Ids are synthesized from the current time in milliseconds and are
//! strictly increasing within one store.

use super::DataAccess;
use crate::error::{AppError, Result};
use crate::models::{Members, Record, Resource};
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Process-local store implementing the same contract as the REST API.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<&'static str, Vec<Map<String, Value>>>>,
    last_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an existing record as-is (keeps its id).
    pub fn insert<R: Resource>(&self, record: &R::Record) -> Result<()> {
        let object = into_object(serde_json::to_value(record).map_err(anyhow::Error::from)?)?;
        self.collections.entry(R::PATH).or_default().push(object);
        Ok(())
    }

    /// Records of one resource in insertion order.
    pub fn records<R: Resource>(&self) -> Result<Vec<R::Record>> {
        let Some(objects) = self.collections.get(R::PATH) else {
            return Ok(Vec::new());
        };
        objects
            .iter()
            .map(|object| from_object::<R>(object.clone()))
            .collect()
    }

    /// Create a record from a (possibly partial) JSON object.
    pub fn create_json<R: Resource>(&self, body: Value) -> Result<R::Record> {
        let mut object = into_object(body)?;
        object.insert("id".to_string(), Value::String(self.next_id()));

        let record = from_object::<R>(object.clone())?;
        self.collections.entry(R::PATH).or_default().push(object);

        tracing::info!(resource = R::PATH, id = record.id(), "Record created");
        Ok(record)
    }

    /// Overwrite the fields present in `body` on the record with `id`.
    pub fn update_json<R: Resource>(&self, id: &str, body: Value) -> Result<R::Record> {
        let patch = into_object(body)?;
        let mut objects = self
            .collections
            .get_mut(R::PATH)
            .ok_or_else(|| not_found::<R>(id))?;
        let object = objects
            .iter_mut()
            .find(|object| object.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| not_found::<R>(id))?;

        let mut merged = object.clone();
        for (field, value) in patch {
            if field != "id" {
                merged.insert(field, value);
            }
        }

        let record = from_object::<R>(merged.clone())?;
        *object = merged;

        tracing::info!(resource = R::PATH, id, "Record updated");
        Ok(record)
    }

    pub fn remove<R: Resource>(&self, id: &str) -> Result<()> {
        let mut objects = self
            .collections
            .get_mut(R::PATH)
            .ok_or_else(|| not_found::<R>(id))?;
        let before = objects.len();
        objects.retain(|object| object.get("id").and_then(Value::as_str) != Some(id));
        if objects.len() == before {
            return Err(not_found::<R>(id));
        }
        tracing::info!(resource = R::PATH, id, "Record deleted");
        Ok(())
    }

    pub fn count<R: Resource>(&self) -> u64 {
        self.collections
            .get(R::PATH)
            .map_or(0, |objects| objects.len() as u64)
    }

    /// Millisecond timestamp, bumped past the previous id on collision.
    fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1).to_string()
    }
}

fn not_found<R: Resource>(id: &str) -> AppError {
    AppError::NotFound(format!("{} {}", R::PATH, id))
}

fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(AppError::BadRequest(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

fn from_object<R: Resource>(object: Map<String, Value>) -> Result<R::Record> {
    serde_json::from_value(Value::Object(object))
        .map_err(|e| AppError::BadRequest(format!("invalid {} record: {}", R::PATH, e)))
}

fn draft_value<R: Resource>(draft: &R::Draft) -> Result<Value> {
    serde_json::to_value(draft).map_err(|e| AppError::Internal(e.into()))
}

impl DataAccess for MemoryStore {
    async fn list<R: Resource>(&self) -> Result<Vec<R::Record>> {
        self.records::<R>()
    }

    async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R::Record> {
        self.create_json::<R>(draft_value::<R>(draft)?)
    }

    async fn update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<R::Record> {
        self.update_json::<R>(id, draft_value::<R>(draft)?)
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        self.remove::<R>(id)
    }

    async fn member_count(&self) -> Result<u64> {
        Ok(self.count::<Members>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, MemberDraft, MemberRole, Ministries, MinistryDraft};
    use serde_json::json;
    use std::collections::HashSet;

    fn draft(names: &str) -> MemberDraft {
        MemberDraft {
            names: names.to_string(),
            address: "X".to_string(),
            email: "a@b.com".to_string(),
            phone: "555".to_string(),
            ..MemberDraft::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let mut ids = HashSet::new();
        for i in 0..50 {
            let member = store.create::<Members>(&draft(&format!("M{i}"))).await.unwrap();
            assert!(ids.insert(member.id), "ids must be unique");
        }
        assert_eq!(store.count::<Members>(), 50);
        assert_eq!(store.member_count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_update_merges_partial_body() {
        let store = MemoryStore::new();
        let created = store.create::<Members>(&draft("Ana")).await.unwrap();

        let updated = store
            .update_json::<Members>(&created.id, json!({ "phone": "999", "id": "hijack" }))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.phone, "999");
        assert_eq!(updated.names, "Ana");
        assert_eq!(updated.role, Some(MemberRole::Member));
        assert_eq!(updated.minister, Some(Group::Youth));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update::<Ministries>("missing", &MinistryDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(
            store.remove::<Ministries>("missing"),
            Err(AppError::NotFound(_))
        ));
        assert!(
            store.collections.get(Ministries::PATH).is_none(),
            "lookups of unknown ids create no collection"
        );
    }

    #[test]
    fn test_create_rejects_non_object_and_incomplete_bodies() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.create_json::<Members>(json!([1, 2])),
            Err(AppError::BadRequest(_))
        ));
        // `names` is mandatory on a stored member.
        assert!(matches!(
            store.create_json::<Members>(json!({ "email": "x@y.z" })),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(store.count::<Members>(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let store = MemoryStore::new();
        let a = store.create::<Members>(&draft("A")).await.unwrap();
        let b = store.create::<Members>(&draft("B")).await.unwrap();

        store.delete::<Members>(&a.id).await.unwrap();

        let remaining = store.list::<Members>().await.unwrap();
        assert_eq!(remaining, vec![b]);
        assert!(store.delete::<Members>(&a.id).await.is_err());
    }
}
