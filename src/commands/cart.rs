//! Remote shopping cart commands.

use crate::amazon::{AmazonApi, AmazonClient, CartItemRequest, CartModification, ProductApi};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// A cart operation with its raw CLI arguments.
///
/// Items are written `ASIN[:QTY]` or `offer=OFFERLISTINGID[:QTY]`;
/// modifications are written `CARTITEMID:QTY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Create { items: Vec<String> },
    Add { cart_id: String, hmac: String, items: Vec<String> },
    Modify { cart_id: String, hmac: String, changes: Vec<String> },
    Get { cart_id: String, hmac: String },
    Clear { cart_id: String, hmac: String },
}

/// Executes cart operations.
pub struct CartCommand {
    config: Config,
}

impl CartCommand {
    /// Creates a new cart command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the action and returns the formatted cart.
    pub async fn execute(&self, action: &CartAction) -> Result<String> {
        let client = AmazonClient::new(&self.config).await.context("Failed to create API client")?;

        self.execute_with_client(&client, action).await
    }

    /// Runs the action with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl ProductApi, action: &CartAction) -> Result<String> {
        let api = AmazonApi::with_client(client, self.config.max_pages);

        let cart = match action {
            CartAction::Create { items } => {
                let items = parse_items(items)?;
                info!("Creating cart with {} items", items.len());
                api.cart_create(&items).await?
            }
            CartAction::Add { cart_id, hmac, items } => {
                let items = parse_items(items)?;
                info!("Adding {} items to cart {}", items.len(), cart_id);
                api.cart_add(&items, cart_id, hmac).await?
            }
            CartAction::Modify { cart_id, hmac, changes } => {
                let changes = changes.iter().map(|s| parse_modification(s)).collect::<Result<Vec<_>>>()?;
                info!("Modifying {} items in cart {}", changes.len(), cart_id);
                api.cart_modify(&changes, cart_id, hmac).await?
            }
            CartAction::Get { cart_id, hmac } => api.cart_get(cart_id, hmac).await?,
            CartAction::Clear { cart_id, hmac } => {
                info!("Clearing cart {}", cart_id);
                api.cart_clear(cart_id, hmac).await?
            }
        };

        Ok(Formatter::new(self.config.format).format_cart(&cart.summary()))
    }
}

fn parse_items(specs: &[String]) -> Result<Vec<CartItemRequest>> {
    specs.iter().map(|s| parse_item_spec(s)).collect()
}

/// Parses `ASIN[:QTY]` or `offer=OFFERLISTINGID[:QTY]`. Quantity defaults to 1.
pub fn parse_item_spec(spec: &str) -> Result<CartItemRequest> {
    let spec = spec.trim();
    let (id, quantity) = match spec.rsplit_once(':') {
        Some((id, qty)) => {
            let quantity: u32 = qty.trim().parse().with_context(|| format!("Invalid quantity in '{}'", spec))?;
            (id.trim(), quantity)
        }
        None => (spec, 1),
    };

    if quantity == 0 {
        anyhow::bail!("Quantity must be at least 1 in '{}'", spec);
    }

    match id.strip_prefix("offer=") {
        Some(offer) if !offer.is_empty() => Ok(CartItemRequest::offer(offer, quantity)),
        Some(_) => anyhow::bail!("Empty offer listing id in '{}'", spec),
        None if id.is_empty() => anyhow::bail!("Empty ASIN in '{}'", spec),
        None => Ok(CartItemRequest::asin(id.to_uppercase(), quantity)),
    }
}

/// Parses `CARTITEMID:QTY`. A quantity of 0 removes the line.
pub fn parse_modification(spec: &str) -> Result<CartModification> {
    let (id, qty) = spec
        .trim()
        .rsplit_once(':')
        .with_context(|| format!("Modification must be CARTITEMID:QTY, got '{}'", spec))?;
    let quantity: u32 = qty.trim().parse().with_context(|| format!("Invalid quantity in '{}'", spec))?;

    if id.trim().is_empty() {
        anyhow::bail!("Empty cart item id in '{}'", spec);
    }
    Ok(CartModification::new(id.trim(), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazon::mock::MockProductApi;
    use crate::amazon::Operation;
    use crate::config::OutputFormat;

    fn make_test_config() -> Config {
        Config { delay_ms: 0, format: OutputFormat::Table, ..Config::default() }
    }

    fn cart_response(op: &str, items: &str) -> String {
        format!(
            "<{op}Response><Cart><Request><IsValid>True</IsValid></Request>\
             <CartId>186-1234567-8901234</CartId><HMAC>XyZ+abc/def=</HMAC>\
             <PurchaseURL>https://www.amazon.com/gp/cart/aws-merge.html?cart-id=186</PurchaseURL>\
             <SubTotal><Amount>2598</Amount><CurrencyCode>USD</CurrencyCode><FormattedPrice>$25.98</FormattedPrice></SubTotal>\
             <CartItems>{items}</CartItems></Cart></{op}Response>"
        )
    }

    const ITEM: &str = "<CartItem><CartItemId>C1</CartItemId><ASIN>B00ZV9PXP2</ASIN><Quantity>2</Quantity>\
        <Title>Kindle Paperwhite</Title><Price><Amount>1299</Amount><CurrencyCode>USD</CurrencyCode>\
        <FormattedPrice>$12.99</FormattedPrice></Price></CartItem>";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_item_spec() {
        assert_eq!(parse_item_spec("b00zv9pxp2").unwrap(), CartItemRequest::asin("B00ZV9PXP2", 1));
        assert_eq!(parse_item_spec("B00ZV9PXP2:3").unwrap(), CartItemRequest::asin("B00ZV9PXP2", 3));
        assert_eq!(parse_item_spec("offer=abc%2Bdef:2").unwrap(), CartItemRequest::offer("abc%2Bdef", 2));
    }

    #[test]
    fn test_parse_item_spec_errors() {
        assert!(parse_item_spec("B00ZV9PXP2:x").is_err());
        assert!(parse_item_spec("B00ZV9PXP2:0").is_err());
        assert!(parse_item_spec("offer=:1").is_err());
        assert!(parse_item_spec(":2").is_err());
    }

    #[test]
    fn test_parse_modification() {
        assert_eq!(parse_modification("C1:0").unwrap(), CartModification::new("C1", 0));
        assert!(parse_modification("C1").is_err());
        assert!(parse_modification(":3").is_err());
    }

    #[tokio::test]
    async fn test_create_cart_table() {
        let client = MockProductApi::new(vec![cart_response("CartCreate", ITEM)]);
        let action = CartAction::Create { items: strings(&["B00ZV9PXP2:2"]) };

        let output = CartCommand::new(make_test_config()).execute_with_client(&client, &action).await.unwrap();
        assert!(output.contains("Cart ID:  186-1234567-8901234"));
        assert!(output.contains("HMAC:     XyZ+abc/def="));
        assert!(output.contains("Kindle Paperwhite"));

        let (operation, params) = client.calls().remove(0);
        assert_eq!(operation, Operation::CartCreate);
        assert_eq!(params.get("Item.1.ASIN"), Some("B00ZV9PXP2"));
        assert_eq!(params.get("Item.1.Quantity"), Some("2"));
    }

    #[tokio::test]
    async fn test_modify_sends_raw_hmac() {
        let client = MockProductApi::new(vec![cart_response("CartModify", "")]);
        let action = CartAction::Modify {
            cart_id: "186-1234567-8901234".to_string(),
            hmac: "XyZ+abc/def=".to_string(),
            changes: strings(&["C1:0"]),
        };

        let output = CartCommand::new(make_test_config()).execute_with_client(&client, &action).await.unwrap();
        assert!(output.contains("Cart is empty."));

        let params = client.params(0);
        assert_eq!(params.get("HMAC"), Some("XyZ+abc/def="));
        assert_eq!(params.get("CartId"), Some("186-1234567-8901234"));
        assert_eq!(params.get("Item.1.CartItemId"), Some("C1"));
        assert_eq!(params.get("Item.1.Quantity"), Some("0"));
    }

    #[tokio::test]
    async fn test_get_and_clear_json() {
        let client = MockProductApi::new(vec![cart_response("CartGet", ITEM), cart_response("CartClear", "")]);
        let config = Config { format: OutputFormat::Json, ..make_test_config() };
        let cmd = CartCommand::new(config);

        let get = CartAction::Get { cart_id: "186".to_string(), hmac: "h".to_string() };
        let output = cmd.execute_with_client(&client, &get).await.unwrap();
        assert!(output.contains("\"cart_item_id\": \"C1\""));

        let clear = CartAction::Clear { cart_id: "186".to_string(), hmac: "h".to_string() };
        cmd.execute_with_client(&client, &clear).await.unwrap();
        assert_eq!(client.calls()[1].0, Operation::CartClear);
    }

    #[tokio::test]
    async fn test_mismatch_error() {
        let xml = "<CartGetResponse><Cart><Request><Errors><Error>\
                   <Code>AWS.ECommerceService.CartInfoMismatch</Code><Message>x</Message>\
                   </Error></Errors></Request></Cart></CartGetResponse>";
        let client = MockProductApi::new(vec![xml.to_string()]);
        let action = CartAction::Get { cart_id: "186".to_string(), hmac: "wrong".to_string() };

        let err = CartCommand::new(make_test_config()).execute_with_client(&client, &action).await.unwrap_err();
        assert!(err.to_string().contains("Cart info mismatch"));
    }

    #[tokio::test]
    async fn test_invalid_spec_sends_nothing() {
        let client = MockProductApi::new(Vec::new());
        let action = CartAction::Create { items: strings(&["B00ZV9PXP2:many"]) };

        assert!(CartCommand::new(make_test_config()).execute_with_client(&client, &action).await.is_err());
        assert_eq!(client.call_count(), 0);
    }
}
