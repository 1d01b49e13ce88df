//! `AmazonApi`: the Product Advertising API operations.

use crate::amazon::browse_node::BrowseNode;
use crate::amazon::cart::{self, Cart, CartItemRequest, CartModification};
use crate::amazon::client::{AmazonClient, ProductApi};
use crate::amazon::params::{Operation, Params};
use crate::amazon::product::Product;
use crate::amazon::response::{ResponseParser, SearchPage};
use crate::amazon::search::{ResultPaginator, DEFAULT_MAX_PAGES};
use crate::config::Config;
use crate::error::{AmazonError, Result};
use tracing::{debug, info};

/// `ResponseGroup` used by lookups when the caller sets none.
pub const DEFAULT_RESPONSE_GROUP: &str = "Large";

/// `ResponseGroup` used by browse node lookups when the caller sets none.
pub const BROWSE_NODE_RESPONSE_GROUP: &str = "BrowseNodeInfo";

/// Lookup, search, browse and cart operations over a [`ProductApi`].
pub struct AmazonApi<C: ProductApi = AmazonClient> {
    client: C,
    max_pages: u32,
    response_group: String,
}

impl AmazonApi<AmazonClient> {
    /// Creates an API backed by an HTTP client built from the configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        let client = AmazonClient::new(config).await?;
        Ok(Self {
            client,
            max_pages: config.max_pages,
            response_group: config.response_group.clone(),
        })
    }
}

impl<C: ProductApi> AmazonApi<C> {
    /// Creates an API over any client implementation.
    pub fn with_client(client: C, max_pages: u32) -> Self {
        Self { client, max_pages, response_group: DEFAULT_RESPONSE_GROUP.to_string() }
    }

    /// Overrides the default lookup `ResponseGroup`.
    pub fn response_group(mut self, group: impl Into<String>) -> Self {
        self.response_group = group.into();
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn parser(&self) -> ResponseParser {
        ResponseParser::new(self.client.region(), self.client.associate_tag())
    }

    fn with_default_group(&self, params: &Params) -> Params {
        let mut params = params.clone();
        params.set_default("ResponseGroup", &self.response_group);
        params
    }

    /// `ItemLookup`. Fails with `AsinNotFound` when no item came back.
    pub async fn lookup(&self, params: &Params) -> Result<Vec<Product>> {
        let params = self.with_default_group(params);
        let item_ids = params.get("ItemId").unwrap_or_default().to_string();
        info!("Looking up: {}", item_ids);

        let xml = self.client.execute(Operation::ItemLookup, &params).await?;
        self.parser().parse_lookup(&xml, &item_ids)
    }

    /// Looks up a single ASIN.
    pub async fn lookup_one(&self, asin: &str) -> Result<Product> {
        self.lookup(&Params::item_id(asin))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AmazonError::AsinNotFound(asin.to_string()))
    }

    /// `ItemLookup` that returns an empty list instead of failing when
    /// none of the requested items exist.
    pub async fn lookup_bulk(&self, params: &Params) -> Result<Vec<Product>> {
        let params = self.with_default_group(params);
        let xml = self.client.execute(Operation::ItemLookup, &params).await?;
        self.parser().parse_lookup_bulk(&xml)
    }

    /// `SimilarityLookup` for one or more ASINs.
    pub async fn similarity_lookup(&self, params: &Params) -> Result<Vec<Product>> {
        let params = self.with_default_group(params);
        let xml = self.client.execute(Operation::SimilarityLookup, &params).await?;
        self.parser().parse_similarity(&xml)
    }

    /// `ItemSearch` as a lazy paginator. No request is sent until it is used.
    pub fn search(&self, params: Params) -> ResultPaginator<'_, C> {
        ResultPaginator::new(self, params, self.max_pages)
    }

    /// The first `n` search results.
    pub async fn search_n(&self, n: usize, params: Params) -> Result<Vec<Product>> {
        self.search(params).take(n).await
    }

    /// Fetches one `ItemSearch` page.
    pub async fn search_page(&self, params: &Params, page: u32) -> Result<SearchPage> {
        let params = self.with_default_group(params).with("ItemPage", page);
        debug!("Fetching search page {}", page);

        let xml = self.client.execute(Operation::ItemSearch, &params).await?;
        self.parser().parse_search(&xml)
    }

    /// `BrowseNodeLookup`.
    pub async fn browse_node_lookup(&self, params: &Params) -> Result<Vec<BrowseNode>> {
        let mut params = params.clone();
        params.set_default("ResponseGroup", BROWSE_NODE_RESPONSE_GROUP);

        let xml = self.client.execute(Operation::BrowseNodeLookup, &params).await?;
        self.parser().parse_browse_nodes(&xml)
    }

    /// The parent product named by `ParentASIN`, if any.
    pub async fn get_parent(&self, product: &Product) -> Result<Option<Product>> {
        let parent_asin = match product.parent_asin() {
            Some(asin) if Some(asin) != product.asin() => asin.to_string(),
            _ => return Ok(None),
        };
        Ok(self.lookup_bulk(&Params::item_id(parent_asin)).await?.into_iter().next())
    }

    /// `CartCreate` with up to 10 items.
    pub async fn cart_create(&self, items: &[CartItemRequest]) -> Result<Cart> {
        let params = cart::add_item_params(items)?;
        self.cart_request(Operation::CartCreate, params).await
    }

    /// `CartAdd` to an existing cart.
    pub async fn cart_add(&self, items: &[CartItemRequest], cart_id: &str, hmac: &str) -> Result<Cart> {
        let mut params = cart::add_item_params(items)?;
        extend(&mut params, cart::cart_params(cart_id, hmac)?);
        self.cart_request(Operation::CartAdd, params).await
    }

    /// `CartModify`: changes quantities; quantity 0 removes a line.
    pub async fn cart_modify(
        &self,
        changes: &[CartModification],
        cart_id: &str,
        hmac: &str,
    ) -> Result<Cart> {
        let mut params = cart::modify_item_params(changes)?;
        extend(&mut params, cart::cart_params(cart_id, hmac)?);
        self.cart_request(Operation::CartModify, params).await
    }

    /// `CartGet`.
    pub async fn cart_get(&self, cart_id: &str, hmac: &str) -> Result<Cart> {
        self.cart_request(Operation::CartGet, cart::cart_params(cart_id, hmac)?).await
    }

    /// `CartClear`: removes every item.
    pub async fn cart_clear(&self, cart_id: &str, hmac: &str) -> Result<Cart> {
        self.cart_request(Operation::CartClear, cart::cart_params(cart_id, hmac)?).await
    }

    async fn cart_request(&self, operation: Operation, params: Params) -> Result<Cart> {
        let xml = self.client.execute(operation, &params).await?;
        self.parser().parse_cart(&xml)
    }
}

fn extend(params: &mut Params, other: Params) {
    for (key, value) in other.iter() {
        params.set(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazon::mock::{lookup_response, MockProductApi};
    use crate::amazon::regions::Region;

    fn make_api(responses: Vec<String>) -> AmazonApi<MockProductApi> {
        AmazonApi::with_client(MockProductApi::new(responses), DEFAULT_MAX_PAGES)
    }

    fn cart_response(op: &str) -> String {
        format!(
            "<{op}Response><Cart><Request><IsValid>True</IsValid></Request>\
             <CartId>186-1</CartId><HMAC>h+m/c=</HMAC>\
             <CartItems><CartItem><CartItemId>C1</CartItemId><ASIN>A1</ASIN><Quantity>1</Quantity></CartItem></CartItems>\
             </Cart></{op}Response>"
        )
    }

    #[tokio::test]
    async fn test_lookup_sets_default_response_group() {
        let api = make_api(vec![lookup_response(&["A1"])]);
        let products = api.lookup(&Params::item_id("A1")).await.unwrap();
        assert_eq!(products.len(), 1);

        let (operation, params) = api.client().calls().remove(0);
        assert_eq!(operation, Operation::ItemLookup);
        assert_eq!(params.get("ResponseGroup"), Some("Large"));
    }

    #[tokio::test]
    async fn test_lookup_keeps_caller_response_group() {
        let api = make_api(vec![lookup_response(&["A1"])]).response_group("Medium");
        api.lookup(&Params::item_id("A1").response_group("Images")).await.unwrap();
        assert_eq!(api.client().params(0).get("ResponseGroup"), Some("Images"));
    }

    #[tokio::test]
    async fn test_lookup_one_and_not_found() {
        let api = make_api(vec![lookup_response(&["A1"]), lookup_response(&[])]);
        let product = api.lookup_one("A1").await.unwrap();
        assert_eq!(product.asin(), Some("A1"));

        let err = api.lookup_one("MISSING").await.unwrap_err();
        assert!(matches!(err, AmazonError::AsinNotFound(ref id) if id == "MISSING"));
    }

    #[tokio::test]
    async fn test_lookup_bulk_allows_empty() {
        let api = make_api(vec![lookup_response(&[])]);
        let products = api.lookup_bulk(&Params::item_ids(["X1", "X2"])).await.unwrap();
        assert!(products.is_empty());
        assert_eq!(api.client().params(0).get("ItemId"), Some("X1,X2"));
    }

    #[tokio::test]
    async fn test_similarity_lookup() {
        let xml = lookup_response(&["S1", "S2"]).replace("ItemLookup", "SimilarityLookup");
        let api = make_api(vec![xml]);
        let products = api.similarity_lookup(&Params::item_id("A1")).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(api.client().calls()[0].0, Operation::SimilarityLookup);
    }

    #[tokio::test]
    async fn test_search_n() {
        let api = make_api(vec![crate::amazon::mock::search_page(&["A1", "A2", "A3"], 1)]);
        let products = api.search_n(2, Params::keywords("rust", "Books")).await.unwrap();
        assert_eq!(products.len(), 2);
    }

    #[tokio::test]
    async fn test_browse_node_lookup_default_group() {
        let xml = "<BrowseNodeLookupResponse><BrowseNodes><Request><IsValid>True</IsValid></Request>\
                   <BrowseNode><BrowseNodeId>283155</BrowseNodeId><Name>Books</Name></BrowseNode>\
                   </BrowseNodes></BrowseNodeLookupResponse>";
        let api = make_api(vec![xml.to_string()]);
        let nodes = api.browse_node_lookup(&Params::browse_node(283155)).await.unwrap();
        assert_eq!(nodes[0].id(), Some(283155));
        assert_eq!(api.client().params(0).get("ResponseGroup"), Some("BrowseNodeInfo"));
    }

    #[tokio::test]
    async fn test_get_parent() {
        let child = "<ItemLookupResponse><Items><Request><IsValid>True</IsValid></Request>\
                     <Item><ASIN>CHILD</ASIN><ParentASIN>PARENT</ParentASIN></Item>\
                     </Items></ItemLookupResponse>";
        let api = make_api(vec![child.to_string(), lookup_response(&["PARENT"])]);

        let product = api.lookup_one("CHILD").await.unwrap();
        let parent = api.get_parent(&product).await.unwrap().unwrap();
        assert_eq!(parent.asin(), Some("PARENT"));
        assert_eq!(api.client().params(1).get("ItemId"), Some("PARENT"));
    }

    #[tokio::test]
    async fn test_get_parent_none_without_request() {
        let api = make_api(vec![lookup_response(&["A1"])]);
        let product = api.lookup_one("A1").await.unwrap();
        assert!(api.get_parent(&product).await.unwrap().is_none());
        assert_eq!(api.client().call_count(), 1);
    }

    #[tokio::test]
    async fn test_cart_create_encodes_items() {
        let api = make_api(vec![cart_response("CartCreate")]);
        let cart = api
            .cart_create(&[CartItemRequest::asin("A1", 1), CartItemRequest::offer("O+2", 3)])
            .await
            .unwrap();
        assert_eq!(cart.cart_id(), Some("186-1"));
        assert_eq!(cart.len(), 1);

        let params = api.client().params(0);
        assert_eq!(params.get("Item.1.ASIN"), Some("A1"));
        assert_eq!(params.get("Item.2.OfferListingId"), Some("O+2"));
        assert_eq!(params.get("Item.2.Quantity"), Some("3"));
    }

    #[tokio::test]
    async fn test_cart_add_and_modify_pass_raw_hmac() {
        let api = make_api(vec![cart_response("CartAdd"), cart_response("CartModify")]);
        api.cart_add(&[CartItemRequest::asin("A2", 1)], "186-1", "h+m/c=").await.unwrap();
        api.cart_modify(&[CartModification::new("C1", 0)], "186-1", "h+m/c=").await.unwrap();

        let calls = api.client().calls();
        assert_eq!(calls[0].0, Operation::CartAdd);
        assert_eq!(calls[0].1.get("HMAC"), Some("h+m/c="));
        assert_eq!(calls[0].1.get("Item.1.ASIN"), Some("A2"));
        assert_eq!(calls[1].0, Operation::CartModify);
        assert_eq!(calls[1].1.get("Item.1.CartItemId"), Some("C1"));
        assert_eq!(calls[1].1.get("Item.1.Quantity"), Some("0"));
    }

    #[tokio::test]
    async fn test_cart_get_and_clear() {
        let api = make_api(vec![cart_response("CartGet"), cart_response("CartClear")]);
        assert_eq!(api.cart_get("186-1", "h").await.unwrap().hmac(), Some("h+m/c="));
        api.cart_clear("186-1", "h").await.unwrap();
        assert_eq!(api.client().calls()[1].0, Operation::CartClear);
    }

    #[tokio::test]
    async fn test_cart_validation_before_request() {
        let api = make_api(Vec::new());
        assert!(api.cart_create(&[]).await.unwrap_err().is_cart_error());
        assert!(api.cart_get("", "h").await.unwrap_err().is_cart_error());
        assert!(api
            .cart_add(&[CartItemRequest::asin("A1", 1)], "186-1", "")
            .await
            .unwrap_err()
            .is_cart_error());
        assert_eq!(api.client().call_count(), 0);
    }

    #[tokio::test]
    async fn test_cart_info_mismatch() {
        let xml = "<CartGetResponse><Cart><Request><Errors><Error>\
                   <Code>AWS.ECommerceService.CartInfoMismatch</Code><Message>x</Message>\
                   </Error></Errors></Request></Cart></CartGetResponse>";
        let api = make_api(vec![xml.to_string()]);
        let err = api.cart_get("186-1", "wrong").await.unwrap_err();
        assert!(matches!(err, AmazonError::CartInfoMismatch));
    }

    #[tokio::test]
    async fn test_products_carry_client_region() {
        let client = MockProductApi::new(vec![lookup_response(&["A1"])]).with_region(Region::Jp);
        let api = AmazonApi::with_client(client, DEFAULT_MAX_PAGES);
        let product = api.lookup_one("A1").await.unwrap();
        assert_eq!(product.region(), Region::Jp);
        assert_eq!(product.offer_url().as_deref(), Some("https://www.amazon.co.jp/dp/A1/?tag=mytag-20"));
    }

    #[tokio::test]
    async fn test_client_errors_propagate() {
        let client = MockProductApi::new(Vec::new());
        client.push_error(AmazonError::Throttled);
        let api = AmazonApi::with_client(client, DEFAULT_MAX_PAGES);
        assert!(matches!(api.lookup_one("A1").await, Err(AmazonError::Throttled)));
    }
}
