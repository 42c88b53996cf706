use serde_json::json;

use reel_db::model::{Filter, Order, Projection, UpdateSpec};
use reel_db::seed::{self, FILMS_COLLECTION, ORDERS_COLLECTION};
use reel_db::store::{CollectionStore, DocumentStore, MemoryStore};

#[tokio::test]
async fn test_order_session_complete_workflow() {
    let store = MemoryStore::new();

    println!("1. Seeding the film catalog...");
    let seeded = seed::load_seed_data(&store, FILMS_COLLECTION)
        .await
        .expect("seeding films");
    assert_eq!(seeded, 3);

    let films = store
        .find(FILMS_COLLECTION, &Filter::match_all(), None)
        .await
        .unwrap();
    assert_eq!(films.len(), 3);
    let ids: Vec<&str> = films.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "5f46f1c4c043dcee8f8e1061",
            "5f46f1c4c043dcee8f8e1062",
            "5f46f1c4c043dcee8f8e1063"
        ]
    );
    assert_eq!(films[0].field("title"), Some(&json!("Вратарь Галактики")));
    assert_eq!(films[0].field("rating"), Some(&json!(4.7)));
    assert_eq!(films[1].field("cashback"), Some(&json!(0.15)));
    assert_eq!(
        films[2].field("genres"),
        Some(&json!(["фантастика", "экшен"]))
    );

    println!("2. Booking the sample order...");
    store.create_collection(ORDERS_COLLECTION).await.unwrap();
    let order = seed::sample_order();
    let order_id = store
        .insert_one(ORDERS_COLLECTION, order.to_document().unwrap())
        .await
        .unwrap();

    println!("3. Querying by exact price...");
    let by_price = store
        .find(ORDERS_COLLECTION, &Filter::eq("price", json!(200000)), None)
        .await
        .unwrap();
    assert_eq!(by_price.len(), 1);
    assert_eq!(by_price[0].id, order_id);

    println!("4. Querying by film rating...");
    let highly_rated = store
        .find(
            ORDERS_COLLECTION,
            &Filter::gt("film.rating", json!(5.0)),
            None,
        )
        .await
        .unwrap();
    assert_eq!(highly_rated.len(), 1);

    let poorly_rated = store
        .find(
            ORDERS_COLLECTION,
            &Filter::gt("film.rating", json!(9.0)),
            None,
        )
        .await
        .unwrap();
    assert!(poorly_rated.is_empty());

    println!("5. Querying by genre set...");
    let by_genre = store
        .find(
            ORDERS_COLLECTION,
            &Filter::is_in("film.genres", vec![json!("триллер"), json!("боевик")]),
            None,
        )
        .await
        .unwrap();
    assert_eq!(by_genre.len(), 1);

    println!("6. Projecting genres away...");
    let projected = store
        .find(
            ORDERS_COLLECTION,
            &Filter::match_all(),
            Some(&Projection::exclude(["film.genres"])),
        )
        .await
        .unwrap();
    assert!(projected[0]
        .field("film")
        .and_then(|f| f.get("genres"))
        .is_none());
    assert_eq!(
        projected[0].field("film").and_then(|f| f.get("title")),
        Some(&json!("Неистовый"))
    );

    println!("7. Appending two extra seats...");
    let by_id = Filter::eq("_id", json!(order_id.clone()));
    let pushed = store
        .update_one(
            ORDERS_COLLECTION,
            &by_id,
            &UpdateSpec::push_each(
                "seats",
                vec![
                    json!({"row": 8, "number": 5}),
                    json!({"row": 8, "number": 6}),
                ],
            ),
        )
        .await
        .unwrap();
    assert_eq!(pushed.modified, 1);

    let booked = store
        .find_by_id(ORDERS_COLLECTION, &order_id)
        .await
        .unwrap()
        .expect("order present");
    assert_eq!(
        booked.field("seats"),
        Some(&json!([
            {"row": 1, "number": 3},
            {"row": 1, "number": 4},
            {"row": 8, "number": 5},
            {"row": 8, "number": 6}
        ]))
    );

    println!("8. Releasing the extra seats...");
    let released = store
        .update_one(
            ORDERS_COLLECTION,
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
        .await
        .unwrap();
    assert_eq!(released.modified, 1);

    let restored = store
        .find_by_id(ORDERS_COLLECTION, &order_id)
        .await
        .unwrap()
        .expect("order present");
    assert_eq!(
        restored.field("seats"),
        Some(&json!([
            {"row": 1, "number": 3},
            {"row": 1, "number": 4}
        ]))
    );

    // The stored document still round-trips into the typed model
    let typed = Order::from_document(&restored).unwrap();
    assert_eq!(typed.seats.len(), 2);
    assert_eq!(typed.price, 200000);

    println!("9. Clearing the orders collection...");
    let deleted = store
        .delete_many(ORDERS_COLLECTION, &Filter::match_all())
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(
        store
            .count(ORDERS_COLLECTION, &Filter::match_all())
            .await
            .unwrap(),
        0
    );

    // The film catalog is untouched by the order session
    assert_eq!(
        store
            .count(FILMS_COLLECTION, &Filter::match_all())
            .await
            .unwrap(),
        3
    );

    println!("Workflow complete");
}

#[tokio::test]
async fn test_sample_order_flow_replays_cleanly() {
    let store = reel_db::seeded_store().await.unwrap();
    seed::run_sample_order_flow(&store, ORDERS_COLLECTION)
        .await
        .expect("flow succeeds");

    // The flow deletes its own orders and leaves the catalog alone
    assert_eq!(
        store
            .count(ORDERS_COLLECTION, &Filter::match_all())
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        store
            .count(FILMS_COLLECTION, &Filter::match_all())
            .await
            .unwrap(),
        3
    );
}
