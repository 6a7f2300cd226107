use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use slm::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for slm::AppCommand {
    fn from(cmd: Commands) -> slm::AppCommand {
        match cmd {
            Commands::Add {
                name,
                description,
                price,
                category,
                bought,
            } => slm::AppCommand::Add {
                name,
                description,
                price,
                category,
                bought,
            },
            Commands::List { category } => slm::AppCommand::List { category },
            Commands::Toggle { id } => slm::AppCommand::Toggle { id },
            Commands::Delete { id } => slm::AppCommand::Delete { id },
            Commands::Clear { yes } => slm::AppCommand::Clear { yes },
            Commands::Show { id } => slm::AppCommand::Show { id },
            Commands::Watch => slm::AppCommand::Watch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Add a new item to the shopping list
    Add {
        /// Item name
        name: String,
        /// Item description
        description: String,
        /// Estimated price in whole units of the base currency
        price: String,
        /// Item category (Food, Electronic or Book)
        #[arg(long, default_value = "Food")]
        category: String,
        /// Mark the item as already purchased
        #[arg(long)]
        bought: bool,
    },
    /// Display the shopping list
    List {
        /// Only show items in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Toggle an item's purchased flag
    Toggle {
        /// Item id
        id: u64,
    },
    /// Delete a single item
    Delete {
        /// Item id
        id: u64,
    },
    /// Delete every item on the list
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show item details with prices converted to foreign currencies
    Show {
        /// Item id
        id: u64,
    },
    /// Re-render the list on every change
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => slm::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = slm::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
base_currency: "HUF"
target_currencies: ["USD", "EUR", "GBP"]

rates:
  base_url: "https://api.frankfurter.app"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
