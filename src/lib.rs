pub mod cli;
pub mod core;
pub mod details;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::providers::FrankfurterProvider;
use crate::store::FjallItemStore;
use anyhow::Result;
use tracing::{debug, info};

/// A presentation-layer command, one per screen interaction of the app.
pub enum AppCommand {
    Add {
        name: String,
        description: String,
        price: String,
        category: String,
        bought: bool,
    },
    List {
        category: Option<String>,
    },
    Toggle {
        id: u64,
    },
    Delete {
        id: u64,
    },
    Clear {
        yes: bool,
    },
    Show {
        id: u64,
    },
    Watch,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Shopping list starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    // One explicitly constructed store instance, injected into the command
    // handlers for the lifetime of the process.
    let data_path = config.default_data_path()?.join("items");
    let store = FjallItemStore::open(&data_path)?;

    match command {
        AppCommand::Add {
            name,
            description,
            price,
            category,
            bought,
        } => cli::edit::run_add(&store, &name, &description, &price, &category, bought).await,
        AppCommand::List { category } => {
            cli::list::run(&store, category.as_deref(), &config.base_currency)
        }
        AppCommand::Toggle { id } => cli::edit::run_toggle(&store, id).await,
        AppCommand::Delete { id } => cli::edit::run_delete(&store, id).await,
        AppCommand::Clear { yes } => cli::edit::run_clear(&store, yes).await,
        AppCommand::Show { id } => {
            let provider = FrankfurterProvider::new(&config.rates.base_url);
            cli::show::run(&store, &provider, id, &config).await
        }
        AppCommand::Watch => cli::watch::run(&store, &config.base_currency).await,
    }
}
