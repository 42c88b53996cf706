use thiserror::Error;

use crate::model::Id;

/// Store-level failure modes. Everything else surfaces as a plain
/// `anyhow::Error` from the layer that produced it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("collection {0:?} already exists")]
    CollectionExists(String),
    #[error("duplicate document id {0:?}")]
    DuplicateId(Id),
}
