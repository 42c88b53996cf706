use serde::{Deserialize, Serialize};

use crate::seed::{FILMS_COLLECTION, ORDERS_COLLECTION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Collection receiving the film catalog fixtures
    pub films_collection: String,
    /// Collection the sample order session runs against
    pub orders_collection: String,
    /// Whether the film fixtures load at startup
    pub load_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: SeedConfig::default(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            films_collection: FILMS_COLLECTION.to_string(),
            orders_collection: ORDERS_COLLECTION.to_string(),
            load_on_start: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "REEL_"
        config = config.add_source(
            config::Environment::with_prefix("REEL")
                .separator("_")
                .prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }
}
