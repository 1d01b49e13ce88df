//! Item lookup and similarity lookup commands.

use crate::amazon::{AmazonApi, AmazonClient, Params, Product, ProductApi};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Most item ids a single lookup request takes.
const MAX_IDS_PER_REQUEST: usize = 10;

/// Options for `ItemLookup`.
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// `ASIN` (default), `SKU`, `UPC`, `EAN` or `ISBN`
    pub id_type: Option<String>,
    /// Search index, required by the API for non-ASIN id types
    pub search_index: Option<String>,
    pub response_group: Option<String>,
}

impl LookupOptions {
    fn is_asin(&self) -> bool {
        self.id_type.as_deref().map_or(true, |t| t.eq_ignore_ascii_case("ASIN"))
    }

    fn params(&self, ids: &[String]) -> Params {
        let mut params = Params::item_ids(ids);
        if let Some(id_type) = &self.id_type {
            params.set("IdType", id_type.to_uppercase());
            if !self.is_asin() {
                params.set("SearchIndex", self.search_index.as_deref().unwrap_or("All"));
            }
        }
        if let Some(group) = &self.response_group {
            params.set("ResponseGroup", group);
        }
        params
    }
}

/// Looks up items by id.
pub struct LookupCommand {
    config: Config,
}

impl LookupCommand {
    /// Creates a new lookup command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Looks up the ids and returns formatted output.
    pub async fn execute(&self, ids: &[String], options: &LookupOptions) -> Result<String> {
        let client = AmazonClient::new(&self.config).await.context("Failed to create API client")?;

        self.execute_with_client(&client, ids, options).await
    }

    /// Looks up the ids with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ProductApi,
        ids: &[String],
        options: &LookupOptions,
    ) -> Result<String> {
        let ids = normalize_ids(ids, options.is_asin());
        if ids.is_empty() {
            anyhow::bail!("No valid item ids given");
        }

        let api = AmazonApi::with_client(client, self.config.max_pages)
            .response_group(self.config.response_group.clone());
        let formatter = Formatter::new(self.config.format);

        if let [id] = ids.as_slice() {
            info!("Looking up item: {}", id);
            let products = api.lookup(&options.params(&ids)).await?;
            let product = products.first().with_context(|| format!("No item returned for {}", id))?;
            return Ok(formatter.format_product(&product.summary()));
        }

        let mut products: Vec<Product> = Vec::new();
        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            info!("Looking up {} items", chunk.len());
            products.extend(api.lookup_bulk(&options.params(chunk)).await?);
        }

        let summaries: Vec<_> = products.iter().map(Product::summary).collect();
        Ok(formatter.format_products(&summaries))
    }
}

/// Finds items similar to the given ASINs.
pub struct SimilarCommand {
    config: Config,
}

impl SimilarCommand {
    /// Creates a new similarity command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the similarity lookup and returns formatted output.
    pub async fn execute(&self, asins: &[String]) -> Result<String> {
        let client = AmazonClient::new(&self.config).await.context("Failed to create API client")?;

        self.execute_with_client(&client, asins).await
    }

    /// Runs the similarity lookup with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl ProductApi, asins: &[String]) -> Result<String> {
        let asins = normalize_ids(asins, true);
        if asins.is_empty() {
            anyhow::bail!("No valid ASINs given");
        }
        if asins.len() > MAX_IDS_PER_REQUEST {
            anyhow::bail!("SimilarityLookup takes at most {} ASINs", MAX_IDS_PER_REQUEST);
        }

        info!("Finding items similar to: {}", asins.join(", "));

        let api = AmazonApi::with_client(client, self.config.max_pages)
            .response_group(self.config.response_group.clone());
        let products = api.similarity_lookup(&Params::item_ids(&asins)).await?;

        let summaries: Vec<_> = products.iter().map(Product::summary).collect();
        Ok(Formatter::new(self.config.format).format_products(&summaries))
    }
}

/// Trims ids. With `asin_only`, ids are uppercased and anything that is not
/// ten alphanumeric characters is skipped with a warning. Other id types keep
/// their case since merchant SKUs are case-sensitive.
fn normalize_ids(ids: &[String], asin_only: bool) -> Vec<String> {
    ids.iter()
        .map(|id| if asin_only { id.trim().to_uppercase() } else { id.trim().to_string() })
        .filter(|id| !id.is_empty())
        .filter(|id| {
            let valid = !asin_only || is_valid_asin(id);
            if !valid {
                warn!("Skipping invalid ASIN: {}", id);
            }
            valid
        })
        .collect()
}

/// ASINs (and ISBN-10s) are ten alphanumeric characters.
pub fn is_valid_asin(asin: &str) -> bool {
    asin.len() == 10 && asin.chars().all(|c| c.is_ascii_alphanumeric())
}
