use anyhow::Result;

use crate::model::{Document, Filter, Id, Projection, UpdateSpec};

/// Result of an update call: how many documents matched the filter and how
/// many actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: usize,
    pub modified: usize,
}

#[async_trait::async_trait]
pub trait CollectionStore: Send + Sync {
    /// Create an empty collection. Errors if the name is already taken.
    async fn create_collection(&self, name: &str) -> Result<()>;
    async fn collection_exists(&self, name: &str) -> Result<bool>;
    async fn list_collections(&self) -> Result<Vec<String>>;
    /// Drop a collection and everything in it. Returns whether it existed.
    async fn drop_collection(&self, name: &str) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a single document, creating the collection if needed. Returns
    /// the document's identity.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Id>;

    /// Insert documents in order. The first duplicate identity aborts the
    /// call; documents inserted before it stay in place.
    async fn insert_many(&self, collection: &str, documents: Vec<Document>) -> Result<Vec<Id>>;

    /// All documents matching the filter, in insertion order. An absent
    /// collection reads as empty.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&Projection>,
    ) -> Result<Vec<Document>>;

    /// First matching document in insertion order.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>>;

    async fn find_by_id(&self, collection: &str, id: &Id) -> Result<Option<Document>>;

    /// Apply the update to the first matching document only.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &UpdateSpec,
    ) -> Result<UpdateOutcome>;

    /// Apply the update to every matching document.
    async fn update_many(
        &self,
        collection: &str,
        filter: &Filter,
        update: &UpdateSpec,
    ) -> Result<UpdateOutcome>;

    /// Delete every matching document, returning how many were removed.
    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<usize>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<usize>;
}

/// Combined trait for anything that can do both.
pub trait Store: CollectionStore + DocumentStore {}
impl<T: CollectionStore + DocumentStore> Store for T {}
