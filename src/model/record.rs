use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Document, Id};

/// A booked seat inside an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub row: u32,
    pub number: u32,
}

/// The film details embedded in an order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmSummary {
    pub title: String,
    pub rating: f64,
    pub cashback: f64,
    pub genres: Vec<String>,
}

/// A ticket order for a screening. `start` and `created` are epoch millis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", default = "generate_id")]
    pub id: Id,
    pub start: i64,
    pub film: FilmSummary,
    pub seats: Vec<Seat>,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    pub created: i64,
}

/// A catalog film record with an explicitly assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    #[serde(rename = "_id")]
    pub id: Id,
    pub title: String,
    pub rating: f64,
    pub cashback: f64,
    pub genres: Vec<String>,
    pub start: i64,
}

impl Order {
    pub fn to_document(&self) -> serde_json::Result<Document> {
        serde_json::from_value(serde_json::to_value(self)?)
    }

    pub fn from_document(document: &Document) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::to_value(document)?)
    }
}

impl Film {
    pub fn to_document(&self) -> serde_json::Result<Document> {
        serde_json::from_value(serde_json::to_value(self)?)
    }

    pub fn from_document(document: &Document) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::to_value(document)?)
    }
}
