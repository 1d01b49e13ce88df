//! Error types for Product Advertising API operations.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, AmazonError>;

/// Errors raised by the client, the response checks, and the views.
#[derive(Debug, Error)]
pub enum AmazonError {
    /// A strict lookup returned no items.
    #[error("ASIN(s) not found: {0}")]
    AsinNotFound(String),

    /// ItemLookup request was rejected.
    #[error("Amazon Product Lookup Error: '{code}', '{message}'")]
    Lookup { code: String, message: String },

    /// ItemSearch request was rejected or matched nothing.
    #[error("Amazon Search Error: '{code}', '{message}'")]
    Search { code: String, message: String },

    /// The requested search page is past the last page Amazon serves.
    #[error("No more pages: {0}")]
    NoMorePages(String),

    /// SimilarityLookup request was rejected.
    #[error("Amazon Similarity Lookup Error: '{code}', '{message}'")]
    SimilarityLookup { code: String, message: String },

    /// BrowseNodeLookup request was rejected.
    #[error("Amazon BrowseNode Lookup Error: '{code}', '{message}'")]
    BrowseNodeLookup { code: String, message: String },

    /// Cart operation failed or was called with invalid input.
    #[error("Cart error: {0}")]
    Cart(String),

    /// CartId / HMAC / AssociateTag do not match the cart.
    #[error(
        "Cart info mismatch (AWS.ECommerceService.CartInfoMismatch): make sure AssociateTag, \
         CartId and HMAC are correct and that the raw HMAC is used, not the URL-encoded one"
    )]
    CartInfoMismatch,

    /// HTTP 503 from the API endpoint.
    #[error("Request throttled by Amazon (503). Increase the request delay.")]
    Throttled,

    /// Any other non-success HTTP status.
    #[error("Amazon API error (HTTP {status}): '{code}', '{message}'")]
    Api { status: u16, code: String, message: String },

    /// Connection, TLS or body read failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] wreq::Error),

    /// Response body was not well-formed XML.
    #[error("Failed to parse XML response: {0}")]
    Xml(String),

    /// A required credential is empty.
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Parameters rejected before any request was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client construction failed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AmazonError {
    /// True for search failures, including running past the last page.
    pub fn is_search_error(&self) -> bool {
        matches!(self, AmazonError::Search { .. } | AmazonError::NoMorePages(_))
    }

    /// True for every cart failure.
    pub fn is_cart_error(&self) -> bool {
        matches!(self, AmazonError::Cart(_) | AmazonError::CartInfoMismatch)
    }

    /// Returns the Amazon error code when the API supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            AmazonError::Lookup { code, .. }
            | AmazonError::Search { code, .. }
            | AmazonError::SimilarityLookup { code, .. }
            | AmazonError::BrowseNodeLookup { code, .. }
            | AmazonError::Api { code, .. } => Some(code),
            AmazonError::NoMorePages(_) => Some(crate::amazon::response::PARAMETER_OUT_OF_RANGE),
            AmazonError::CartInfoMismatch => Some(crate::amazon::response::CART_INFO_MISMATCH),
            _ => None,
        }
    }
}
