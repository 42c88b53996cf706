use anyhow::Result;
use log::info;
use serde_json::json;

use crate::model::{Filter, Projection, UpdateSpec};
use crate::seed::sample_order;
use crate::store::Store;

/// Replay the ad-hoc order session against the given collection: one
/// insert, the handful of queries and updates, then a full cleanup. Each
/// step logs what it returned.
pub async fn run_sample_order_flow<S: Store>(store: &S, collection: &str) -> Result<()> {
    store.create_collection(collection).await?;

    let order = sample_order();
    let order_id = store.insert_one(collection, order.to_document()?).await?;
    info!("inserted sample order {}", order_id);

    let all = store.find(collection, &Filter::match_all(), None).await?;
    info!("all orders: {}", all.len());

    let by_price = store
        .find(collection, &Filter::eq("price", json!(200000)), None)
        .await?;
    info!("orders priced exactly 200000: {}", by_price.len());

    let above_price = store
        .find(collection, &Filter::gt("price", json!(100000)), None)
        .await?;
    info!("orders priced above 100000: {}", above_price.len());

    let highly_rated = store
        .find(collection, &Filter::gt("film.rating", json!(5.0)), None)
        .await?;
    info!("orders for films rated above 5.0: {}", highly_rated.len());

    // Whole-subdocument equality: the sample order's film carries more
    // fields than the bare title, so this returns nothing.
    let by_film = store
        .find(
            collection,
            &Filter::eq("film", json!({"title": "Неистовый"})),
            None,
        )
        .await?;
    info!("orders with a bare film subdocument: {}", by_film.len());

    let by_genre = store
        .find(
            collection,
            &Filter::is_in("film.genres", vec![json!("триллер"), json!("боевик")]),
            None,
        )
        .await?;
    info!("orders in триллер/боевик: {}", by_genre.len());

    let without_genres = store
        .find(
            collection,
            &Filter::match_all(),
            Some(&Projection::exclude(["film.genres"])),
        )
        .await?;
    info!(
        "orders with film.genres projected away: {}",
        without_genres.len()
    );

    let cashback = store
        .update_many(
            collection,
            &Filter::match_all(),
            &UpdateSpec::set_one("film.cashback", json!(0.10)),
        )
        .await?;
    info!(
        "cashback updated: matched {}, modified {}",
        cashback.matched, cashback.modified
    );

    let by_id = Filter::eq("_id", json!(order_id));
    let pushed = store
        .update_one(
            collection,
            &by_id,
            &UpdateSpec::push_each(
                "seats",
                vec![
                    json!({"row": 8, "number": 5}),
                    json!({"row": 8, "number": 6}),
                ],
            ),
        )
        .await?;
    info!("extra seats appended: modified {}", pushed.modified);

    let pulled = store
        .update_one(
            collection,
            &by_id,
            &UpdateSpec::pull_where(
                "seats",
                Filter::any_of(vec![
                    Filter::all_of(vec![
                        Filter::eq("row", json!(8)),
                        Filter::eq("number", json!(5)),
                    ]),
                    Filter::all_of(vec![
                        Filter::eq("row", json!(8)),
                        Filter::eq("number", json!(6)),
                    ]),
                ]),
            ),
        )
        .await?;
    info!("extra seats released: modified {}", pulled.modified);

    let remaining = store.find(collection, &Filter::match_all(), None).await?;
    info!("orders before cleanup: {}", remaining.len());

    let deleted = store.delete_many(collection, &Filter::match_all()).await?;
    info!("orders deleted: {}", deleted);

    Ok(())
}
