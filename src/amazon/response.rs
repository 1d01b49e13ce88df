//! Response checking: turns XML response documents into views or typed errors.

use crate::amazon::browse_node::BrowseNode;
use crate::amazon::cart::Cart;
use crate::amazon::paths::{browse_node, http_error, items as items_path, request, root};
use crate::amazon::product::Product;
use crate::amazon::regions::Region;
use crate::error::{AmazonError, Result};
use crate::xml::Element;
use tracing::{debug, trace, warn};

/// Error code for an `ItemPage` past the last available page.
pub const PARAMETER_OUT_OF_RANGE: &str = "AWS.ParameterOutOfRange";

/// Error code for a cart request whose CartId, HMAC or AssociateTag do not match.
pub const CART_INFO_MISMATCH: &str = "AWS.ECommerceService.CartInfoMismatch";

/// Error code for a search that matched nothing.
pub const NO_EXACT_MATCHES: &str = "AWS.ECommerceService.NoExactMatches";

/// One page of `ItemSearch` results.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub products: Vec<Product>,
    pub total_results: Option<u64>,
    pub total_pages: Option<u32>,
}

/// Parser for Product Advertising API responses of one marketplace.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    region: Region,
    associate_tag: String,
}

impl ResponseParser {
    /// Creates a parser that tags products with the given region and associate tag.
    pub fn new(region: Region, associate_tag: impl Into<String>) -> Self {
        Self { region, associate_tag: associate_tag.into() }
    }

    /// Parses an `ItemLookup` response, failing with `AsinNotFound` when no item came back.
    pub fn parse_lookup(&self, xml: &str, item_ids: &str) -> Result<Vec<Product>> {
        let products = self.parse_lookup_bulk(xml)?;
        if products.is_empty() {
            return Err(AmazonError::AsinNotFound(item_ids.to_string()));
        }
        Ok(products)
    }

    /// Parses an `ItemLookup` response, returning whatever items were found.
    ///
    /// Per-id errors (an unknown ASIN among several) are logged and skipped.
    pub fn parse_lookup_bulk(&self, xml: &str) -> Result<Vec<Product>> {
        let mut doc = Element::parse(xml)?;
        let items = take_container(&mut doc, root::ITEMS)?;

        if let Some((code, message)) = invalid_request(&items) {
            return Err(AmazonError::Lookup { code, message });
        }
        for error in items.find_all(&format!("{}.Error", request::ERRORS)) {
            warn!(
                "Lookup skipped an item: {} ({})",
                error.find_text("Message").unwrap_or_default(),
                error.find_text("Code").unwrap_or_default()
            );
        }

        Ok(self.products(items))
    }

    /// Parses a `SimilarityLookup` response.
    pub fn parse_similarity(&self, xml: &str) -> Result<Vec<Product>> {
        let mut doc = Element::parse(xml)?;
        let items = take_container(&mut doc, root::ITEMS)?;

        if let Some((code, message)) = invalid_request(&items) {
            return Err(AmazonError::SimilarityLookup { code, message });
        }
        Ok(self.products(items))
    }

    /// Parses one `ItemSearch` page.
    pub fn parse_search(&self, xml: &str) -> Result<SearchPage> {
        let mut doc = Element::parse(xml)?;
        let items = take_container(&mut doc, root::ITEMS)?;

        if let Some((code, message)) = invalid_request(&items) {
            return Err(AmazonError::Search { code, message });
        }
        if let Some((code, message)) = request_error(&items) {
            if code == PARAMETER_OUT_OF_RANGE {
                return Err(AmazonError::NoMorePages(message));
            }
            return Err(AmazonError::Search { code, message });
        }

        let total_results = number(&items, items_path::TOTAL_RESULTS);
        let total_pages = number(&items, items_path::TOTAL_PAGES);
        let products = self.products(items);

        debug!(
            "Parsed {} products (total results: {:?}, total pages: {:?})",
            products.len(),
            total_results,
            total_pages
        );

        Ok(SearchPage { products, total_results, total_pages })
    }

    /// Parses a `BrowseNodeLookup` response.
    pub fn parse_browse_nodes(&self, xml: &str) -> Result<Vec<BrowseNode>> {
        let mut doc = Element::parse(xml)?;
        let nodes = take_container(&mut doc, root::BROWSE_NODES)?;

        if let Some((code, message)) = invalid_request(&nodes) {
            return Err(AmazonError::BrowseNodeLookup { code, message });
        }
        let found = nodes.child(browse_node::NODE).is_some();
        if let Some((code, message)) = request_error(&nodes) {
            if !found {
                return Err(AmazonError::BrowseNodeLookup { code, message });
            }
        }

        Ok(nodes.into_children_named(browse_node::NODE).into_iter().map(BrowseNode::new).collect())
    }

    /// Parses the response of any `Cart*` operation.
    pub fn parse_cart(&self, xml: &str) -> Result<Cart> {
        let doc = Element::parse(xml)?;
        let container = doc
            .find(root::CART)
            .ok_or_else(|| AmazonError::Xml(format!("<{}> has no <Cart> element", doc.name())))?;

        if let Some((code, message)) = request_error(container) {
            if code == CART_INFO_MISMATCH {
                return Err(AmazonError::CartInfoMismatch);
            }
            return Err(AmazonError::Cart(format!("{}: {}", code, message)));
        }

        Ok(Cart::new(doc, self.region))
    }

    fn products(&self, items: Element) -> Vec<Product> {
        items
            .into_children_named(items_path::ITEM)
            .into_iter()
            .map(|element| {
                let product = Product::new(element, self.region, self.associate_tag.as_str());
                trace!("Parsed item {}", product.asin().unwrap_or("<no asin>"));
                product
            })
            .collect()
    }
}

/// Code and message from an HTTP error body (`<Error><Code>…`).
///
/// Returns `None` when the body is not XML or carries no code.
pub fn parse_http_error(body: &str) -> Option<(String, String)> {
    let doc = Element::parse(body).ok()?;
    let code = doc.find_text(http_error::CODE)?.to_string();
    let message = doc.find_text(http_error::MESSAGE).unwrap_or_default().to_string();
    Some((code, message))
}

/// Moves a top-level container such as `Items` out of the document.
fn take_container(doc: &mut Element, name: &str) -> Result<Element> {
    let doc_name = doc.name().to_string();
    std::mem::take(doc)
        .into_children_named(name)
        .into_iter()
        .next()
        .ok_or_else(|| AmazonError::Xml(format!("<{}> has no <{}> element", doc_name, name)))
}

/// `Some((code, message))` when the request was rejected as invalid.
fn invalid_request(container: &Element) -> Option<(String, String)> {
    let is_valid = container.find_text(request::IS_VALID)?;
    if is_valid.eq_ignore_ascii_case("false") {
        let (code, message) = request_error(container).unwrap_or_default();
        return Some((code, message));
    }
    None
}

/// First `Request.Errors.Error` code and message, if any.
fn request_error(container: &Element) -> Option<(String, String)> {
    container.find(request::ERRORS)?;
    let code = container.find_text(request::ERROR_CODE).unwrap_or_default().to_string();
    let message = container.find_text(request::ERROR_MESSAGE).unwrap_or_default().to_string();
    Some((code, message))
}

fn number<T: std::str::FromStr>(container: &Element, name: &str) -> Option<T> {
    container.find_text(name).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_parser() -> ResponseParser {
        ResponseParser::new(Region::Us, "mytag-20")
    }

    fn items_response(op: &str, request: &str, body: &str) -> String {
        format!(
            r#"<?xml version="1.0" ?>
            <{op}Response xmlns="http://webservices.amazon.com/AWSECommerceService/2013-08-01">
                <Items><Request>{request}</Request>{body}</Items>
            </{op}Response>"#
        )
    }

    #[test]
    fn test_lookup_returns_products() {
        let xml = items_response(
            "ItemLookup",
            "<IsValid>True</IsValid>",
            "<Item><ASIN>A1</ASIN></Item><Item><ASIN>A2</ASIN></Item>",
        );
        let products = make_parser().parse_lookup(&xml, "A1,A2").unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].asin(), Some("A2"));
        assert_eq!(products[0].region(), Region::Us);
    }

    #[test]
    fn test_lookup_invalid_request() {
        let xml = items_response(
            "ItemLookup",
            "<IsValid>False</IsValid><Errors><Error><Code>AWS.MissingParameters</Code>\
             <Message>Your request is missing required parameters.</Message></Error></Errors>",
            "",
        );
        let err = make_parser().parse_lookup(&xml, "A1").unwrap_err();
        match err {
            AmazonError::Lookup { code, message } => {
                assert_eq!(code, "AWS.MissingParameters");
                assert!(message.contains("missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lookup_not_found_vs_bulk() {
        let xml = items_response(
            "ItemLookup",
            "<IsValid>True</IsValid><Errors><Error><Code>AWS.InvalidParameterValue</Code>\
             <Message>B000000000 is not a valid value for ItemId.</Message></Error></Errors>",
            "",
        );
        let err = make_parser().parse_lookup(&xml, "B000000000").unwrap_err();
        assert!(matches!(err, AmazonError::AsinNotFound(ref ids) if ids == "B000000000"));

        let products = make_parser().parse_lookup_bulk(&xml).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_similarity_invalid_request() {
        let xml = items_response(
            "SimilarityLookup",
            "<IsValid>False</IsValid><Errors><Error><Code>AWS.InvalidParameterValue</Code>\
             <Message>bad</Message></Error></Errors>",
            "",
        );
        let err = make_parser().parse_similarity(&xml).unwrap_err();
        assert!(matches!(err, AmazonError::SimilarityLookup { .. }));
    }

    #[test]
    fn test_search_page_totals() {
        let xml = items_response(
            "ItemSearch",
            "<IsValid>True</IsValid>",
            "<TotalResults>27</TotalResults><TotalPages>3</TotalPages>\
             <Item><ASIN>A1</ASIN></Item>",
        );
        let page = make_parser().parse_search(&xml).unwrap();
        assert_eq!(page.total_results, Some(27));
        assert_eq!(page.total_pages, Some(3));
        assert_eq!(page.products.len(), 1);
    }

    #[test]
    fn test_search_page_without_totals() {
        let xml = items_response(
            "ItemSearch",
            "<IsValid>True</IsValid>",
            "<MoreSearchResultsUrl>https://www.amazon.com/s</MoreSearchResultsUrl><Item><ASIN>A1</ASIN></Item>",
        );
        let page = make_parser().parse_search(&xml).unwrap();
        assert_eq!(page.total_results, None);
        assert_eq!(page.total_pages, None);
        assert_eq!(page.products.len(), 1);
    }

    #[test]
    fn test_search_out_of_range_is_no_more_pages() {
        let xml = items_response(
            "ItemSearch",
            "<IsValid>True</IsValid><Errors><Error><Code>AWS.ParameterOutOfRange</Code>\
             <Message>The value you specified for ItemPage is invalid.</Message></Error></Errors>",
            "",
        );
        let err = make_parser().parse_search(&xml).unwrap_err();
        assert!(matches!(err, AmazonError::NoMorePages(_)));
        assert!(err.is_search_error());
    }

    #[test]
    fn test_search_no_matches() {
        let xml = items_response(
            "ItemSearch",
            "<IsValid>True</IsValid><Errors><Error><Code>AWS.ECommerceService.NoExactMatches</Code>\
             <Message>We did not find any matches for your request.</Message></Error></Errors>",
            "<TotalResults>0</TotalResults><TotalPages>0</TotalPages>",
        );
        let err = make_parser().parse_search(&xml).unwrap_err();
        assert_eq!(err.code(), Some(NO_EXACT_MATCHES));
    }

    #[test]
    fn test_browse_nodes() {
        let xml = r#"<BrowseNodeLookupResponse><BrowseNodes>
            <Request><IsValid>True</IsValid></Request>
            <BrowseNode><BrowseNodeId>1</BrowseNodeId><Name>Books</Name></BrowseNode>
        </BrowseNodes></BrowseNodeLookupResponse>"#;
        let nodes = make_parser().parse_browse_nodes(xml).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name(), Some("Books"));
    }

    #[test]
    fn test_browse_node_error_without_nodes() {
        let xml = r#"<BrowseNodeLookupResponse><BrowseNodes>
            <Request><IsValid>True</IsValid><Errors><Error>
                <Code>AWS.InvalidParameterValue</Code><Message>0 is not a valid value</Message>
            </Error></Errors></Request>
        </BrowseNodes></BrowseNodeLookupResponse>"#;
        let err = make_parser().parse_browse_nodes(xml).unwrap_err();
        assert!(matches!(err, AmazonError::BrowseNodeLookup { ref code, .. } if code == "AWS.InvalidParameterValue"));
    }

    #[test]
    fn test_cart_errors() {
        let mismatch = r#"<CartGetResponse><Cart><Request><IsValid>True</IsValid><Errors><Error>
            <Code>AWS.ECommerceService.CartInfoMismatch</Code><Message>mismatch</Message>
        </Error></Errors></Request></Cart></CartGetResponse>"#;
        let err = make_parser().parse_cart(mismatch).unwrap_err();
        assert!(matches!(err, AmazonError::CartInfoMismatch));
        assert_eq!(err.code(), Some(CART_INFO_MISMATCH));

        let other = r#"<CartAddResponse><Cart><Request><Errors><Error>
            <Code>AWS.ECommerceService.ItemNotEligibleForCart</Code><Message>no</Message>
        </Error></Errors></Request></Cart></CartAddResponse>"#;
        let err = make_parser().parse_cart(other).unwrap_err();
        assert!(matches!(err, AmazonError::Cart(ref m) if m.contains("ItemNotEligibleForCart")));
    }

    #[test]
    fn test_cart_ok() {
        let xml = r#"<CartCreateResponse><Cart><Request><IsValid>True</IsValid></Request>
            <CartId>123</CartId><HMAC>abc=</HMAC></Cart></CartCreateResponse>"#;
        let cart = make_parser().parse_cart(xml).unwrap();
        assert_eq!(cart.cart_id(), Some("123"));
        assert_eq!(cart.hmac(), Some("abc="));
    }

    #[test]
    fn test_missing_container_and_bad_xml() {
        let err = make_parser().parse_search("<ItemSearchResponse/>").unwrap_err();
        assert!(matches!(err, AmazonError::Xml(_)));

        let err = make_parser().parse_lookup("<not-closed>", "A1").unwrap_err();
        assert!(matches!(err, AmazonError::Xml(_)));
    }

    #[test]
    fn test_parse_http_error() {
        let body = r#"<ItemLookupErrorResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
            <Error><Code>SignatureDoesNotMatch</Code><Message>The request signature does not match.</Message></Error>
            <RequestId>1234</RequestId></ItemLookupErrorResponse>"#;
        let (code, message) = parse_http_error(body).unwrap();
        assert_eq!(code, "SignatureDoesNotMatch");
        assert!(message.starts_with("The request signature"));

        assert!(parse_http_error("Service Unavailable").is_none());
        assert!(parse_http_error("<Other/>").is_none());
    }
}
