//! Remote shopping carts: the `Cart` / `CartItem` views and the inputs used
//! to create and change carts.

use crate::amazon::models::{CartItemSummary, CartSummary, Price};
use crate::amazon::params::Params;
use crate::amazon::paths::{cart, cart_item};
use crate::amazon::regions::Region;
use crate::error::{AmazonError, Result};
use crate::xml::Element;

/// Most items a single cart request may carry.
pub const MAX_CART_ITEMS: usize = 10;

/// A cart returned by any `Cart*` operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    root: Element,
    region: Region,
    items: Vec<CartItem>,
}

impl Cart {
    /// Wraps a cart response document.
    pub fn new(root: Element, region: Region) -> Self {
        let items = root
            .find_all(cart::CART_ITEM)
            .into_iter()
            .cloned()
            .map(|element| CartItem { element, region })
            .collect();
        Self { root, region, items }
    }

    /// The response document.
    pub fn element(&self) -> &Element {
        &self.root
    }

    pub fn cart_id(&self) -> Option<&str> {
        self.root.find_text(cart::CART_ID)
    }

    /// Raw HMAC. Pass this, not the URL-encoded form, to later cart calls.
    pub fn hmac(&self) -> Option<&str> {
        self.root.find_text(cart::HMAC)
    }

    pub fn url_encoded_hmac(&self) -> Option<&str> {
        self.root.find_text(cart::URL_ENCODED_HMAC)
    }

    pub fn purchase_url(&self) -> Option<&str> {
        self.root.find_text(cart::PURCHASE_URL)
    }

    /// Subtotal in minor currency units.
    pub fn amount(&self) -> Option<i64> {
        self.root.find_text(cart::SUBTOTAL_AMOUNT).and_then(|s| s.trim().parse().ok())
    }

    pub fn formatted_price(&self) -> Option<&str> {
        self.root.find_text(cart::SUBTOTAL_FORMATTED)
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.root.find_text(cart::SUBTOTAL_CURRENCY)
    }

    pub fn subtotal(&self) -> Option<Price> {
        Price::from_minor_units(
            self.root.find_text(cart::SUBTOTAL_AMOUNT)?,
            self.region.minor_unit_divisor(),
            self.currency_code(),
        )
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Looks up a line by its `CartItemId`.
    pub fn get(&self, cart_item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.cart_item_id() == Some(cart_item_id))
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            cart_id: self.cart_id().map(str::to_string),
            hmac: self.hmac().map(str::to_string),
            purchase_url: self.purchase_url().map(str::to_string),
            subtotal: self.subtotal(),
            formatted_subtotal: self.formatted_price().map(str::to_string),
            items: self.items.iter().map(CartItem::summary).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    element: Element,
    region: Region,
}

impl CartItem {
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn cart_item_id(&self) -> Option<&str> {
        self.element.find_text(cart_item::CART_ITEM_ID)
    }

    pub fn asin(&self) -> Option<&str> {
        self.element.find_text(cart_item::ASIN)
    }

    pub fn title(&self) -> Option<&str> {
        self.element.find_text(cart_item::TITLE)
    }

    pub fn quantity(&self) -> u32 {
        self.element
            .find_text(cart_item::QUANTITY)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn product_group(&self) -> Option<&str> {
        self.element.find_text(cart_item::PRODUCT_GROUP)
    }

    /// Line price in minor currency units.
    pub fn amount(&self) -> Option<i64> {
        self.element.find_text(cart_item::AMOUNT).and_then(|s| s.trim().parse().ok())
    }

    pub fn formatted_price(&self) -> Option<&str> {
        self.element.find_text(cart_item::FORMATTED_PRICE)
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.element.find_text(cart_item::CURRENCY_CODE)
    }

    pub fn price(&self) -> Option<Price> {
        Price::from_minor_units(
            self.element.find_text(cart_item::AMOUNT)?,
            self.region.minor_unit_divisor(),
            self.currency_code(),
        )
    }

    pub fn summary(&self) -> CartItemSummary {
        CartItemSummary {
            cart_item_id: self.cart_item_id().map(str::to_string),
            asin: self.asin().map(str::to_string),
            title: self.title().map(str::to_string),
            quantity: self.quantity(),
            price: self.price(),
            formatted_price: self.formatted_price().map(str::to_string),
        }
    }
}

/// How an item to add is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartItemKey {
    OfferListingId(String),
    Asin(String),
}

/// An item to put into a cart with `CartCreate` or `CartAdd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRequest {
    pub key: CartItemKey,
    pub quantity: u32,
}

impl CartItemRequest {
    /// Item identified by an offer listing id (see `Product::offer_id`).
    pub fn offer(offer_listing_id: impl Into<String>, quantity: u32) -> Self {
        Self { key: CartItemKey::OfferListingId(offer_listing_id.into()), quantity }
    }

    /// Item identified by ASIN.
    pub fn asin(asin: impl Into<String>, quantity: u32) -> Self {
        Self { key: CartItemKey::Asin(asin.into()), quantity }
    }
}

/// A quantity change for an existing cart line. Quantity 0 removes the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartModification {
    pub cart_item_id: String,
    pub quantity: u32,
}

impl CartModification {
    pub fn new(cart_item_id: impl Into<String>, quantity: u32) -> Self {
        Self { cart_item_id: cart_item_id.into(), quantity }
    }
}

/// Encodes items as `Item.{n}.OfferListingId|ASIN` and `Item.{n}.Quantity`, 1-based.
pub fn add_item_params(items: &[CartItemRequest]) -> Result<Params> {
    check_item_count(items.len())?;

    let mut params = Params::new();
    for (index, item) in items.iter().enumerate() {
        let n = index + 1;
        match &item.key {
            CartItemKey::OfferListingId(id) => params.set(format!("Item.{}.OfferListingId", n), id),
            CartItemKey::Asin(asin) => params.set(format!("Item.{}.ASIN", n), asin),
        };
        params.set(format!("Item.{}.Quantity", n), item.quantity);
    }
    Ok(params)
}

/// Encodes changes as `Item.{n}.CartItemId` and `Item.{n}.Quantity`, 1-based.
pub fn modify_item_params(changes: &[CartModification]) -> Result<Params> {
    check_item_count(changes.len())?;

    let mut params = Params::new();
    for (index, change) in changes.iter().enumerate() {
        let n = index + 1;
        params.set(format!("Item.{}.CartItemId", n), &change.cart_item_id);
        params.set(format!("Item.{}.Quantity", n), change.quantity);
    }
    Ok(params)
}

/// `CartId` and `HMAC` parameters for an existing cart.
pub fn cart_params(cart_id: &str, hmac: &str) -> Result<Params> {
    if cart_id.trim().is_empty() {
        return Err(AmazonError::Cart("CartId is required".to_string()));
    }
    if hmac.trim().is_empty() {
        return Err(AmazonError::Cart("HMAC is required".to_string()));
    }
    Ok(Params::new().with("CartId", cart_id).with("HMAC", hmac))
}

fn check_item_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(AmazonError::Cart("at least one item is required".to_string()));
    }
    if count > MAX_CART_ITEMS {
        return Err(AmazonError::Cart(format!(
            "{} items given, a cart request takes at most {}",
            count, MAX_CART_ITEMS
        )));
    }
    Ok(())
}
