//! Plain data types read out of response views: prices, reviews, images,
//! and the serializable summaries used for output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A price in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in major units (dollars, euros, yen)
    pub amount: f64,
    /// ISO currency code when the response carried one
    pub currency: Option<String>,
}

impl Price {
    /// Creates a price from a major-unit amount.
    pub fn new(amount: f64, currency: Option<String>) -> Self {
        Self { amount, currency }
    }

    /// Converts an API `Amount` (minor units) into a price.
    ///
    /// Returns `None` when the amount is not an integer.
    pub fn from_minor_units(raw: &str, divisor: f64, currency: Option<&str>) -> Option<Self> {
        let minor: i64 = raw.trim().parse().ok()?;
        Some(Self { amount: minor as f64 / divisor, currency: currency.map(str::to_string) })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.currency {
            Some(currency) => write!(f, "{:.2} {}", self.amount, currency),
            None => write!(f, "{:.2}", self.amount),
        }
    }
}

/// Customer review information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviews {
    pub has_reviews: bool,
    /// URL of the embeddable review page
    pub iframe_url: Option<String>,
}

/// A credited contributor (`ItemAttributes.Creator`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    /// The `Role` attribute, e.g. "Editor" or "Illustrator"
    pub role: Option<String>,
}

/// One `ImageSets.ImageSet` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    /// "primary" or "variant"
    pub category: Option<String>,
    pub swatch: Option<String>,
    pub thumbnail: Option<String>,
    pub tiny: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub hi_res: Option<String>,
}

/// Another binding or format of the same work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateVersion {
    pub asin: String,
    pub title: Option<String>,
    pub binding: Option<String>,
}

/// Flattened product fields for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub asin: String,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub brand: Option<String>,
    pub binding: Option<String>,
    pub price: Option<Price>,
    pub list_price: Option<Price>,
    pub availability: Option<String>,
    pub sales_rank: Option<u64>,
    pub publication_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    /// Affiliate offer URL carrying the associate tag
    pub url: String,
}

impl ProductSummary {
    /// Current price amount, if any.
    pub fn price_value(&self) -> Option<f64> {
        self.price.as_ref().map(|p| p.amount)
    }

    /// Discount against the list price, as a whole percentage.
    pub fn discount_percent(&self) -> Option<u8> {
        let current = self.price.as_ref()?.amount;
        let list = self.list_price.as_ref()?.amount;
        if list <= 0.0 || current >= list {
            return None;
        }
        let discount = ((list - current) / list * 100.0).round() as u8;
        Some(discount.min(99))
    }
}

/// Flattened browse node fields for display and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseNodeSummary {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub is_category_root: bool,
    /// Ancestor names, root first
    pub ancestry: Vec<String>,
    pub children: Vec<String>,
}

impl BrowseNodeSummary {
    /// Ancestors and this node joined with ` > `.
    pub fn path(&self) -> String {
        let mut parts: Vec<&str> = self.ancestry.iter().map(String::as_str).collect();
        if let Some(name) = &self.name {
            parts.push(name);
        }
        parts.join(" > ")
    }
}

/// Flattened cart fields for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub cart_id: Option<String>,
    pub hmac: Option<String>,
    pub purchase_url: Option<String>,
    pub subtotal: Option<Price>,
    pub formatted_subtotal: Option<String>,
    pub items: Vec<CartItemSummary>,
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemSummary {
    pub cart_item_id: Option<String>,
    pub asin: Option<String>,
    pub title: Option<String>,
    pub quantity: u32,
    pub price: Option<Price>,
    pub formatted_price: Option<String>,
}
