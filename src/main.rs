use reel_db::config::AppConfig;
use reel_db::model::Filter;
use reel_db::seed;
use reel_db::store::{DocumentStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new().filter_level(LevelFilter::Info).init();

    println!("reel-db: document fixture loader");

    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: films={:?} orders={:?}",
        config.seed.films_collection, config.seed.orders_collection
    );

    let store = MemoryStore::new();

    if config.seed.load_on_start {
        println!("Loading seed data...");
        let seeded = seed::load_seed_data(&store, &config.seed.films_collection).await?;
        println!("Seed data loaded: {} film records", seeded);
    }

    // Optional walkthrough of the sample order session
    if std::env::var("RUN_ORDER_FLOW").unwrap_or_default() == "true" {
        println!("Replaying sample order session...");
        seed::run_sample_order_flow(&store, &config.seed.orders_collection).await?;
        println!("Sample order session complete");
    }

    let films = store
        .count(&config.seed.films_collection, &Filter::match_all())
        .await?;
    let orders = store
        .count(&config.seed.orders_collection, &Filter::match_all())
        .await?;
    println!("Store contents: {} films, {} orders", films, orders);

    Ok(())
}
