pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export logic types
pub use logic::{
    apply_update, filter_documents, project_document, resolve_path, resolve_path_in,
    FilterEvaluator,
};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::*;

// Export store types
pub use store::{CollectionStore, DocumentStore, MemoryStore, Store, StoreError, UpdateOutcome};

/// Build a store preloaded with the stock film fixtures. For integration
/// testing.
pub async fn seeded_store() -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::new();
    seed::load_seed_data(&store, seed::FILMS_COLLECTION).await?;
    Ok(store)
}
