//! Product Advertising API modules: signing, transport, operations and response views.

pub mod api;
pub mod browse_node;
pub mod cart;
pub mod client;
pub mod models;
pub mod params;
pub mod paths;
pub mod product;
pub mod regions;
pub mod response;
pub mod search;
pub mod signing;

#[cfg(test)]
pub(crate) mod mock;

pub use api::AmazonApi;
pub use browse_node::BrowseNode;
pub use cart::{Cart, CartItem, CartItemRequest, CartModification};
pub use client::{AmazonClient, ProductApi};
pub use models::{Price, ProductSummary};
pub use params::{Operation, Params, PowerQuery};
pub use product::Product;
pub use regions::Region;
pub use search::ResultPaginator;
pub use signing::Credentials;
