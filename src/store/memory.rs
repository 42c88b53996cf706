use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::logic::{apply_update, project_document, FilterEvaluator};
use crate::model::{Document, Filter, Id, Projection, UpdateSpec};
use crate::store::{CollectionStore, DocumentStore, StoreError, UpdateOutcome};

/// Documents of one collection, kept in insertion (natural) order.
#[derive(Debug, Default)]
struct Collection {
    documents: Vec<Document>,
}

impl Collection {
    fn contains_id(&self, id: &Id) -> bool {
        self.documents.iter().any(|document| &document.id == id)
    }
}

/// Process-local store backing a single session. Everything lives behind one
/// lock; guards are never held across an await point.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn create_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(name) {
            return Err(StoreError::CollectionExists(name.to_string()).into());
        }
        collections.insert(name.to_string(), Collection::default());
        log::debug!("created collection {:?}", name);
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.read().contains_key(name))
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn drop_collection(&self, name: &str) -> Result<bool> {
        Ok(self.collections.write().remove(name).is_some())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Id> {
        let mut collections = self.collections.write();
        let entries = collections.entry(collection.to_string()).or_default();
        if entries.contains_id(&document.id) {
            return Err(StoreError::DuplicateId(document.id).into());
        }
        let id = document.id.clone();
        entries.documents.push(document);
        Ok(id)
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> Result<Vec<Id>> {
        let mut collections = self.collections.write();
        let entries = collections.entry(collection.to_string()).or_default();
        let mut ids = Vec::with_capacity(documents.len());
        for document in documents {
            if entries.contains_id(&document.id) {
                return Err(StoreError::DuplicateId(document.id).into());
            }
            ids.push(document.id.clone());
            entries.documents.push(document);
        }
        Ok(ids)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&Projection>,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        let Some(entries) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut results = Vec::new();
        for document in &entries.documents {
            if FilterEvaluator::matches_document(document, filter)? {
                results.push(match projection {
                    Some(projection) => project_document(document, projection),
                    None => document.clone(),
                });
            }
        }
        Ok(results)
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        let collections = self.collections.read();
        let Some(entries) = collections.get(collection) else {
            return Ok(None);
        };
        for document in &entries.documents {
            if FilterEvaluator::matches_document(document, filter)? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    async fn find_by_id(&self, collection: &str, id: &Id) -> Result<Option<Document>> {
        let collections = self.collections.read();
        let Some(entries) = collections.get(collection) else {
            return Ok(None);
        };
        Ok(entries
            .documents
            .iter()
            .find(|document| &document.id == id)
            .cloned())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &UpdateSpec,
    ) -> Result<UpdateOutcome> {
        let mut collections = self.collections.write();
        let Some(entries) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };
        for document in entries.documents.iter_mut() {
            if FilterEvaluator::matches_document(document, filter)? {
                let modified = apply_update(document, update)?;
                return Ok(UpdateOutcome {
                    matched: 1,
                    modified: usize::from(modified),
                });
            }
        }
        Ok(UpdateOutcome::default())
    }

    async fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &UpdateSpec,
    ) -> Result<UpdateOutcome> {
        let mut collections = self.collections.write();
        let Some(entries) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };
        let mut outcome = UpdateOutcome::default();
        for document in entries.documents.iter_mut() {
            if FilterEvaluator::matches_document(document, filter)? {
                outcome.matched += 1;
                if apply_update(document, update)? {
                    outcome.modified += 1;
                }
            }
        }
        Ok(outcome)
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<usize> {
        let mut collections = self.collections.write();
        let Some(entries) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let mut matched = Vec::with_capacity(entries.documents.len());
        for document in &entries.documents {
            matched.push(FilterEvaluator::matches_document(document, filter)?);
        }
        let before = entries.documents.len();
        let mut index = 0;
        entries.documents.retain(|_| {
            let keep = !matched[index];
            index += 1;
            keep
        });
        let removed = before - entries.documents.len();
        if removed > 0 {
            log::debug!("deleted {} documents from {:?}", removed, collection);
        }
        Ok(removed)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<usize> {
        let collections = self.collections.read();
        let Some(entries) = collections.get(collection) else {
            return Ok(0);
        };
        let mut total = 0;
        for document in &entries.documents {
            if FilterEvaluator::matches_document(document, filter)? {
                total += 1;
            }
        }
        Ok(total)
    }
}
