//! amz-product-api - command line client for the Amazon Product Advertising API
//!
//! Signed item lookups, paginated searches, browse node lookups and remote carts.

use amz_product_api::amazon::regions::Region;
use amz_product_api::commands::{
    BrowseCommand, CartAction, CartCommand, LookupCommand, LookupOptions, SearchCommand, SearchOptions,
    SimilarCommand,
};
use amz_product_api::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-product-api",
    version,
    about = "Amazon Product Advertising API client",
    long_about = "Looks up and searches products, browse nodes and remote carts through the \
                  Amazon Product Advertising API (2013-08-01). Credentials come from the config \
                  file or AMAZON_ACCESS_KEY, AMAZON_SECRET_KEY and AMAZON_ASSOC_TAG."
)]
struct Cli {
    /// Amazon marketplace (overrides the config file)
    #[arg(short, long, global = true)]
    region: Option<Region>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Minimum delay between requests in milliseconds
    #[arg(long, global = true)]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up items by ASIN, or by UPC/EAN/ISBN/SKU with --id-type
    #[command(alias = "l")]
    Lookup {
        /// Item ids to look up
        #[arg(required = true)]
        ids: Vec<String>,

        /// Id type: ASIN, SKU, UPC, EAN or ISBN
        #[arg(long)]
        id_type: Option<String>,

        /// Search index for non-ASIN id types
        #[arg(long)]
        search_index: Option<String>,

        /// Response group (default from config, usually Large)
        #[arg(long)]
        response_group: Option<String>,
    },

    /// Search for products
    #[command(alias = "s")]
    Search {
        /// Keywords
        #[arg(short, long)]
        keywords: Option<String>,

        /// Title to match
        #[arg(long)]
        title: Option<String>,

        /// Books power search clause, field:value (repeatable)
        #[arg(long)]
        power: Vec<String>,

        /// Search index (All, Books, Electronics, ...)
        #[arg(short, long)]
        index: Option<String>,

        /// Restrict to a browse node
        #[arg(long)]
        browse_node: Option<u64>,

        /// Sort order (e.g. salesrank, price, -price)
        #[arg(long)]
        sort: Option<String>,

        /// Minimum price in minor units (e.g. cents)
        #[arg(long)]
        min_price: Option<u64>,

        /// Maximum price in minor units (e.g. cents)
        #[arg(long)]
        max_price: Option<u64>,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        max: usize,
    },

    /// Find items similar to one or more ASINs
    Similar {
        /// ASINs to compare against
        #[arg(required = true)]
        asins: Vec<String>,
    },

    /// Look up browse nodes
    #[command(alias = "b")]
    Browse {
        /// Browse node ids
        #[arg(required = true)]
        node_ids: Vec<u64>,

        /// Response group (default BrowseNodeInfo)
        #[arg(long)]
        response_group: Option<String>,
    },

    /// Manage remote shopping carts
    #[command(subcommand)]
    Cart(CartCommands),

    /// List supported regions
    Regions,
}

#[derive(Subcommand)]
enum CartCommands {
    /// Create a cart. Items are ASIN[:QTY] or offer=ID[:QTY]
    Create {
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Add items to a cart
    Add {
        #[arg(long)]
        cart_id: String,
        /// Raw HMAC as returned by create (not URL-encoded)
        #[arg(long)]
        hmac: String,
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Change quantities. Changes are CARTITEMID:QTY; 0 removes the item
    Modify {
        #[arg(long)]
        cart_id: String,
        #[arg(long)]
        hmac: String,
        #[arg(required = true)]
        changes: Vec<String>,
    },

    /// Show a cart
    Get {
        #[arg(long)]
        cart_id: String,
        #[arg(long)]
        hmac: String,
    },

    /// Remove every item from a cart
    Clear {
        #[arg(long)]
        cart_id: String,
        #[arg(long)]
        hmac: String,
    },
}

impl From<CartCommands> for CartAction {
    fn from(command: CartCommands) -> Self {
        match command {
            CartCommands::Create { items } => CartAction::Create { items },
            CartCommands::Add { cart_id, hmac, items } => CartAction::Add { cart_id, hmac, items },
            CartCommands::Modify { cart_id, hmac, changes } => CartAction::Modify { cart_id, hmac, changes },
            CartCommands::Get { cart_id, hmac } => CartAction::Get { cart_id, hmac },
            CartCommands::Clear { cart_id, hmac } => CartAction::Clear { cart_id, hmac },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    let output = match cli.command {
        Commands::Lookup { ids, id_type, search_index, response_group } => {
            let options = LookupOptions { id_type, search_index, response_group };
            LookupCommand::new(config).execute(&ids, &options).await?
        }

        Commands::Search { keywords, title, power, index, browse_node, sort, min_price, max_price, max } => {
            let options = SearchOptions {
                keywords,
                title,
                power,
                index,
                browse_node,
                sort,
                min_price,
                max_price,
                max_results: max,
            };
            SearchCommand::new(config).execute(&options).await?
        }

        Commands::Similar { asins } => SimilarCommand::new(config).execute(&asins).await?,

        Commands::Browse { node_ids, response_group } => {
            BrowseCommand::new(config).execute(&node_ids, response_group.as_deref()).await?
        }

        Commands::Cart(command) => {
            let action = CartAction::from(command);
            CartCommand::new(config).execute(&action).await?
        }

        Commands::Regions => {
            let mut lines = vec![
                "Supported Amazon regions:\n".to_string(),
                format!("{:<6} {:<32} {:<20} {:<10}", "Code", "API endpoint", "Domain", "Currency"),
                format!("{:-<6} {:-<32} {:-<20} {:-<10}", "", "", "", ""),
            ];
            for region in Region::all() {
                lines.push(format!(
                    "{:<6} {:<32} {:<20} {:<10}",
                    region.to_string(),
                    region.endpoint(),
                    region.domain(),
                    region.currency()
                ));
            }
            lines.join("\n")
        }
    };

    println!("{}", output);

    Ok(())
}
