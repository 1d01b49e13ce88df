//! Search command implementation.

use crate::amazon::{AmazonApi, AmazonClient, Params, PowerQuery, Product, ProductApi};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// What to search for. At least one of `keywords`, `title`, `power` or
/// `browse_node` must be set.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub keywords: Option<String>,
    pub title: Option<String>,
    /// Books power search clauses, `field:value`
    pub power: Vec<String>,
    /// Search index; `All` when unset
    pub index: Option<String>,
    pub browse_node: Option<u64>,
    /// e.g. `salesrank`, `price`, `-price`
    pub sort: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub max_results: usize,
}

impl SearchOptions {
    /// Builds the `ItemSearch` parameters.
    pub fn params(&self) -> Result<Params> {
        if self.keywords.is_none() && self.title.is_none() && self.power.is_empty() && self.browse_node.is_none() {
            anyhow::bail!("Search needs keywords, a title, a power query or a browse node");
        }

        let mut params = if self.power.is_empty() {
            Params::new().with("SearchIndex", self.index.as_deref().unwrap_or("All"))
        } else {
            let query = self.power.iter().try_fold(PowerQuery::new(), |query, clause| {
                let (field, value) = clause
                    .split_once(':')
                    .with_context(|| format!("Power clause must be field:value, got '{}'", clause))?;
                anyhow::Ok(query.field(field.trim(), value.trim()))
            })?;
            Params::power(&query)
        };

        if let Some(keywords) = &self.keywords {
            params.set("Keywords", keywords);
        }
        if let Some(title) = &self.title {
            params.set("Title", title);
        }
        if let Some(node) = self.browse_node {
            params.set("BrowseNode", node);
        }
        if let Some(sort) = &self.sort {
            params.set("Sort", sort);
        }
        if let Some(min) = self.min_price {
            params.set("MinimumPrice", min);
        }
        if let Some(max) = self.max_price {
            params.set("MaximumPrice", max);
        }

        Ok(params)
    }
}

/// Executes an `ItemSearch`.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, options: &SearchOptions) -> Result<String> {
        let client = AmazonClient::new(&self.config).await.context("Failed to create API client")?;

        self.execute_with_client(&client, options).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl ProductApi, options: &SearchOptions) -> Result<String> {
        let params = options.params()?;
        debug!("Search parameters: {:?}", params);

        let api = AmazonApi::with_client(client, self.config.max_pages)
            .response_group(self.config.response_group.clone());

        let mut pages = api.search(params);
        let products = pages.take(options.max_results).await?;

        info!(
            "Found {} products ({} pages fetched, {} results reported)",
            products.len(),
            pages.current_page(),
            pages.total_results().map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );

        let summaries: Vec<_> = products.iter().map(Product::summary).collect();
        Ok(Formatter::new(self.config.format).format_products(&summaries))
    }
}
