//! `Product`: a view over one `Item` element of a lookup or search response.

use crate::amazon::browse_node::BrowseNode;
use crate::amazon::models::{AlternateVersion, Creator, ImageSet, Price, ProductSummary, Reviews};
use crate::amazon::paths::{alternate_version, image, item, offer};
use crate::amazon::regions::Region;
use crate::xml::Element;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// An item returned by the Product Advertising API.
///
/// Every accessor returns `None` (or an empty collection) when the response
/// does not carry the field, which depends on the requested `ResponseGroup`.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    element: Element,
    region: Region,
    associate_tag: String,
}

impl Product {
    /// Wraps an `Item` element.
    pub fn new(element: Element, region: Region, associate_tag: impl Into<String>) -> Self {
        Self { element, region, associate_tag: associate_tag.into() }
    }

    /// The underlying `Item` element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Pretty-printed XML of the `Item` element.
    pub fn to_xml(&self) -> String {
        self.element.to_xml()
    }

    // --- Generic access ---

    /// Text at a dotted path from the `Item` root.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.element.find_text(path)
    }

    /// Text of `ItemAttributes.{name}`; `name` may itself be dotted.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.get(&format!("{}.{}", item::ATTRIBUTES, name))
    }

    /// Values for several item attributes. Absent names are left out.
    pub fn get_attributes<'a, I>(&self, names: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.get_attribute(name).map(|v| (name.to_string(), v.to_string())))
            .collect()
    }

    /// XML attributes of `ItemAttributes.{name}`, such as `Units` on dimensions.
    pub fn get_attribute_details(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.element.find(&format!("{}.{}", item::ATTRIBUTES, name)).map(Element::attributes)
    }

    // --- Identity ---

    pub fn asin(&self) -> Option<&str> {
        self.get(item::ASIN)
    }

    pub fn parent_asin(&self) -> Option<&str> {
        self.get(item::PARENT_ASIN)
    }

    pub fn detail_page_url(&self) -> Option<&str> {
        self.get(item::DETAIL_PAGE_URL)
    }

    pub fn sales_rank(&self) -> Option<u64> {
        self.get(item::SALES_RANK).and_then(|s| s.trim().parse().ok())
    }

    /// Affiliate URL for the item on the region's storefront.
    pub fn offer_url(&self) -> Option<String> {
        self.asin().map(|asin| {
            format!("{}/dp/{}/?tag={}", self.region.base_url(), asin, self.associate_tag)
        })
    }

    // --- Item attributes ---

    pub fn title(&self) -> Option<&str> {
        self.get(item::TITLE)
    }

    /// First listed author.
    pub fn author(&self) -> Option<&str> {
        self.get(item::AUTHOR)
    }

    pub fn authors(&self) -> Vec<&str> {
        self.element.find_all_text(item::AUTHOR)
    }

    pub fn creators(&self) -> Vec<Creator> {
        self.element
            .find_all(item::CREATOR)
            .into_iter()
            .filter(|c| !c.text().is_empty())
            .map(|c| Creator { name: c.text().to_string(), role: c.attr("Role").map(str::to_string) })
            .collect()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.get(item::PUBLISHER)
    }

    pub fn label(&self) -> Option<&str> {
        self.get(item::LABEL)
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.get(item::MANUFACTURER)
    }

    pub fn brand(&self) -> Option<&str> {
        self.get(item::BRAND)
    }

    pub fn studio(&self) -> Option<&str> {
        self.get(item::STUDIO)
    }

    pub fn isbn(&self) -> Option<&str> {
        self.get(item::ISBN)
    }

    pub fn eisbn(&self) -> Option<&str> {
        self.get(item::EISBN)
    }

    pub fn binding(&self) -> Option<&str> {
        self.get(item::BINDING)
    }

    pub fn edition(&self) -> Option<&str> {
        self.get(item::EDITION)
    }

    pub fn sku(&self) -> Option<&str> {
        self.get(item::SKU)
    }

    pub fn mpn(&self) -> Option<&str> {
        self.get(item::MPN)
    }

    pub fn model(&self) -> Option<&str> {
        self.get(item::MODEL)
    }

    pub fn part_number(&self) -> Option<&str> {
        self.get(item::PART_NUMBER)
    }

    pub fn color(&self) -> Option<&str> {
        self.get(item::COLOR)
    }

    pub fn genre(&self) -> Option<&str> {
        self.get(item::GENRE)
    }

    pub fn pages(&self) -> Option<u32> {
        self.get(item::PAGES).and_then(|s| s.trim().parse().ok())
    }

    pub fn actors(&self) -> Vec<&str> {
        self.element.find_all_text(item::ACTOR)
    }

    pub fn directors(&self) -> Vec<&str> {
        self.element.find_all_text(item::DIRECTOR)
    }

    pub fn product_group(&self) -> Option<&str> {
        self.get(item::PRODUCT_GROUP)
    }

    pub fn product_type_name(&self) -> Option<&str> {
        self.get(item::PRODUCT_TYPE_NAME)
    }

    pub fn running_time(&self) -> Option<&str> {
        self.get(item::RUNNING_TIME)
    }

    pub fn is_adult(&self) -> Option<bool> {
        self.get(item::IS_ADULT).map(is_truthy)
    }

    /// Language names, lowercased and de-duplicated in document order.
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();
        for language in self.element.find_all(item::LANGUAGE) {
            if let Some(name) = language.find_text(item::LANGUAGE_NAME) {
                let name = name.to_lowercase();
                if !languages.contains(&name) {
                    languages.push(name);
                }
            }
        }
        languages
    }

    pub fn features(&self) -> Vec<&str> {
        self.element.find_all_text(item::FEATURE)
    }

    /// `EAN`, falling back to the first `EANList` entry.
    pub fn ean(&self) -> Option<&str> {
        self.get(item::EAN).or_else(|| self.get(item::EAN_LIST_ELEMENT))
    }

    /// `UPC`, falling back to the first `UPCList` entry.
    pub fn upc(&self) -> Option<&str> {
        self.get(item::UPC).or_else(|| self.get(item::UPC_LIST_ELEMENT))
    }

    // --- Dates ---

    pub fn publication_date(&self) -> Option<NaiveDate> {
        self.get(item::PUBLICATION_DATE).and_then(parse_date)
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.get(item::RELEASE_DATE).and_then(parse_date)
    }

    // --- Images ---

    pub fn large_image_url(&self) -> Option<&str> {
        self.get(image::LARGE_URL)
    }

    pub fn medium_image_url(&self) -> Option<&str> {
        self.get(image::MEDIUM_URL)
    }

    pub fn small_image_url(&self) -> Option<&str> {
        self.get(image::SMALL_URL)
    }

    pub fn tiny_image_url(&self) -> Option<&str> {
        self.get(image::TINY_URL)
    }

    /// Every image set with its category and per-size URLs.
    pub fn images(&self) -> Vec<ImageSet> {
        let owned = |set: &Element, path: &str| set.find_text(path).map(str::to_string);

        self.element
            .find_all(image::IMAGE_SET)
            .into_iter()
            .map(|set| ImageSet {
                category: set.attr(image::CATEGORY_ATTR).map(str::to_string),
                swatch: owned(set, image::SWATCH_URL),
                thumbnail: owned(set, image::THUMBNAIL_URL),
                tiny: owned(set, image::TINY_URL),
                small: owned(set, image::SMALL_URL),
                medium: owned(set, image::MEDIUM_URL),
                large: owned(set, image::LARGE_URL),
                hi_res: owned(set, image::HI_RES_URL),
            })
            .collect()
    }

    // --- Reviews ---

    pub fn reviews(&self) -> Reviews {
        Reviews {
            has_reviews: self.get(item::HAS_REVIEWS).is_some_and(is_truthy),
            iframe_url: self.get(item::REVIEWS_IFRAME_URL).map(str::to_string),
        }
    }

    /// Content of the first editorial review.
    pub fn editorial_review(&self) -> Option<&str> {
        self.editorial_reviews().into_iter().next()
    }

    pub fn editorial_reviews(&self) -> Vec<&str> {
        self.element
            .find_all(item::EDITORIAL_REVIEW)
            .into_iter()
            .filter_map(|review| review.find_text(item::EDITORIAL_REVIEW_CONTENT))
            .collect()
    }

    // --- Offers ---

    /// Sale price, else offer price, else lowest new price.
    pub fn price_and_currency(&self) -> Option<Price> {
        [
            (offer::SALE_PRICE_AMOUNT, offer::SALE_PRICE_CURRENCY),
            (offer::PRICE_AMOUNT, offer::PRICE_CURRENCY),
            (offer::LOWEST_NEW_AMOUNT, offer::LOWEST_NEW_CURRENCY),
        ]
        .into_iter()
        .find_map(|(amount, currency)| self.price_at(amount, currency))
    }

    pub fn list_price(&self) -> Option<Price> {
        self.price_at(item::LIST_PRICE_AMOUNT, item::LIST_PRICE_CURRENCY)
    }

    /// Display string for the price chosen by [`Product::price_and_currency`].
    pub fn formatted_price(&self) -> Option<&str> {
        self.get(offer::SALE_PRICE_FORMATTED)
            .or_else(|| self.get(offer::PRICE_FORMATTED))
            .or_else(|| self.get(offer::LOWEST_NEW_FORMATTED))
    }

    pub fn formatted_list_price(&self) -> Option<&str> {
        self.get(item::LIST_PRICE_FORMATTED)
    }

    /// Offer listing id used to add the item to a cart.
    pub fn offer_id(&self) -> Option<&str> {
        self.get(offer::LISTING_ID)
    }

    pub fn availability(&self) -> Option<&str> {
        self.get(offer::AVAILABILITY)
    }

    pub fn availability_type(&self) -> Option<&str> {
        self.get(offer::AVAILABILITY_TYPE)
    }

    pub fn availability_min_hours(&self) -> Option<u32> {
        self.get(offer::AVAILABILITY_MIN_HOURS).and_then(|s| s.trim().parse().ok())
    }

    pub fn availability_max_hours(&self) -> Option<u32> {
        self.get(offer::AVAILABILITY_MAX_HOURS).and_then(|s| s.trim().parse().ok())
    }

    pub fn is_preorder(&self) -> bool {
        self.get(offer::IS_PREORDER).is_some_and(is_truthy)
    }

    // --- Relations ---

    pub fn alternate_versions(&self) -> Vec<AlternateVersion> {
        self.element
            .find_all(item::ALTERNATE_VERSION)
            .into_iter()
            .filter_map(|version| {
                Some(AlternateVersion {
                    asin: version.find_text(alternate_version::ASIN)?.to_string(),
                    title: version.find_text(alternate_version::TITLE).map(str::to_string),
                    binding: version.find_text(alternate_version::BINDING).map(str::to_string),
                })
            })
            .collect()
    }

    /// Browse nodes the item is listed under.
    pub fn browse_nodes(&self) -> Vec<BrowseNode> {
        self.element
            .find(item::BROWSE_NODES)
            .map(|nodes| nodes.children().iter().cloned().map(BrowseNode::new).collect())
            .unwrap_or_default()
    }

    /// Flattened fields for output formatting.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            asin: self.asin().unwrap_or_default().to_string(),
            title: self.title().map(str::to_string),
            authors: self.authors().into_iter().map(str::to_string).collect(),
            brand: self.brand().or_else(|| self.manufacturer()).map(str::to_string),
            binding: self.binding().map(str::to_string),
            price: self.price_and_currency(),
            list_price: self.list_price(),
            availability: self.availability().map(str::to_string),
            sales_rank: self.sales_rank(),
            publication_date: self.publication_date().or_else(|| self.release_date()),
            image_url: self
                .large_image_url()
                .or_else(|| self.medium_image_url())
                .map(str::to_string),
            url: self.offer_url().unwrap_or_default(),
        }
    }

    fn price_at(&self, amount_path: &str, currency_path: &str) -> Option<Price> {
        let amount = self.get(amount_path)?;
        Price::from_minor_units(amount, self.region.minor_unit_divisor(), self.get(currency_path))
    }
}

/// Parses `YYYY-MM-DD`, `YYYY-MM` (first of month) or `YYYY` (January 1st).
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d") {
        return Some(date);
    }
    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}
