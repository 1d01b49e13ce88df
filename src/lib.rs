//! amz-product-api - client for the Amazon Product Advertising API (2013-08-01)
//!
//! Signs requests with the account's secret key, sends them to the
//! marketplace endpoint, and exposes the XML responses through typed views:
//! [`Product`], [`BrowseNode`] and [`Cart`]. Searches are paginated lazily
//! with [`ResultPaginator`].
//!
//! ```no_run
//! use amz_product_api::{AmazonApi, Config, Params};
//!
//! # async fn run() -> amz_product_api::Result<()> {
//! let config = Config::default().with_env();
//! let api = AmazonApi::new(&config).await?;
//!
//! let mut pages = api.search(Params::keywords("kindle", "Electronics"));
//! while let Some(product) = pages.next().await? {
//!     println!("{}", product.title().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod amazon;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod xml;

pub use amazon::{
    AmazonApi, AmazonClient, BrowseNode, Cart, CartItem, CartItemRequest, CartModification, Credentials, Operation,
    Params, PowerQuery, Price, Product, ProductApi, ProductSummary, Region, ResultPaginator,
};
pub use config::Config;
pub use error::{AmazonError, Result};
