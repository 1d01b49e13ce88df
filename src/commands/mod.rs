//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod lookup;
pub mod search;

pub use browse::BrowseCommand;
pub use cart::{CartAction, CartCommand};
pub use lookup::{LookupCommand, LookupOptions, SimilarCommand};
pub use search::{SearchCommand, SearchOptions};
