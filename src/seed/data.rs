use anyhow::Result;
use log::info;

use crate::model::{generate_id, now_millis, Film, FilmSummary, Order, Seat};
use crate::store::Store;

/// Default collection names used by the stock fixtures.
pub const FILMS_COLLECTION: &str = "films";
pub const ORDERS_COLLECTION: &str = "orders";

/// The three stock catalog records. Identities are assigned explicitly so
/// the same records are recognizable across environments; `start` is stamped
/// at load time.
pub fn films() -> Vec<Film> {
    let start = now_millis();
    vec![
        Film {
            id: "5f46f1c4c043dcee8f8e1061".to_string(),
            title: "Вратарь Галактики".to_string(),
            rating: 4.7,
            cashback: 0.15,
            genres: vec![
                "детский".to_string(),
                "семейный".to_string(),
                "приключения".to_string(),
                "фантастика".to_string(),
            ],
            start,
        },
        Film {
            id: "5f46f1c4c043dcee8f8e1062".to_string(),
            title: "Довод".to_string(),
            rating: 8.0,
            cashback: 0.15,
            genres: vec![
                "триллер".to_string(),
                "драма".to_string(),
                "боевик".to_string(),
            ],
            start,
        },
        Film {
            id: "5f46f1c4c043dcee8f8e1063".to_string(),
            title: "Новые мутанты".to_string(),
            rating: 5.7,
            cashback: 0.15,
            genres: vec!["фантастика".to_string(), "экшен".to_string()],
            start,
        },
    ]
}

/// The walkthrough order: one screening of «Неистовый» with two seats.
pub fn sample_order() -> Order {
    Order {
        id: generate_id(),
        start: 1601571600000,
        film: FilmSummary {
            title: "Неистовый".to_string(),
            rating: 6.3,
            cashback: 0.15,
            genres: vec!["триллер".to_string()],
        },
        seats: vec![Seat { row: 1, number: 3 }, Seat { row: 1, number: 4 }],
        price: 200000,
        duration: None,
        created: now_millis(),
    }
}

/// Load the film catalog fixtures into the given collection. A collection
/// that already exists is left alone so reloads stay safe.
pub async fn load_seed_data<S: Store>(store: &S, collection: &str) -> Result<usize> {
    if store.collection_exists(collection).await? {
        info!("collection {:?} already present, skipping seed", collection);
        return Ok(0);
    }

    let records = films();
    let mut documents = Vec::with_capacity(records.len());
    for film in &records {
        documents.push(film.to_document()?);
    }

    store.create_collection(collection).await?;
    let ids = store.insert_many(collection, documents).await?;
    info!("seeded {} film records into {:?}", ids.len(), collection);
    Ok(ids.len())
}
