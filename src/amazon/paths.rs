//! Element paths for Product Advertising API responses.
//!
//! This file contains every dotted path the views use to read responses.
//! Paths are relative to the node each view wraps (an `Item`, a `Cart`
//! response root, a `BrowseNode`, a request container).
//!
//! **Update process**: when a field stops resolving, capture a response
//! sample, update the path here, and add it to `tests/fixtures/`.

/// Paths under a `Request` container's parent (`Items`, `Cart`, `BrowseNodes`).
pub mod request {
    pub const IS_VALID: &str = "Request.IsValid";
    pub const ERRORS: &str = "Request.Errors";
    pub const ERROR_CODE: &str = "Request.Errors.Error.Code";
    pub const ERROR_MESSAGE: &str = "Request.Errors.Error.Message";
}

/// Paths inside an HTTP error body (`<XxxErrorResponse>`).
pub mod http_error {
    pub const CODE: &str = "Error.Code";
    pub const MESSAGE: &str = "Error.Message";
}

/// Paths from a response root.
pub mod root {
    pub const ITEMS: &str = "Items";
    pub const BROWSE_NODES: &str = "BrowseNodes";
    pub const CART: &str = "Cart";
}

/// Paths from an `Items` container.
pub mod items {
    pub const TOTAL_RESULTS: &str = "TotalResults";
    pub const TOTAL_PAGES: &str = "TotalPages";
    pub const ITEM: &str = "Item";
}

/// Paths from an `Item` node.
pub mod item {
    pub const ASIN: &str = "ASIN";
    pub const PARENT_ASIN: &str = "ParentASIN";
    pub const DETAIL_PAGE_URL: &str = "DetailPageURL";
    pub const SALES_RANK: &str = "SalesRank";

    pub const ATTRIBUTES: &str = "ItemAttributes";
    pub const TITLE: &str = "ItemAttributes.Title";
    pub const AUTHOR: &str = "ItemAttributes.Author";
    pub const CREATOR: &str = "ItemAttributes.Creator";
    pub const PUBLISHER: &str = "ItemAttributes.Publisher";
    pub const LABEL: &str = "ItemAttributes.Label";
    pub const MANUFACTURER: &str = "ItemAttributes.Manufacturer";
    pub const BRAND: &str = "ItemAttributes.Brand";
    pub const STUDIO: &str = "ItemAttributes.Studio";
    pub const ISBN: &str = "ItemAttributes.ISBN";
    pub const EISBN: &str = "ItemAttributes.EISBN";
    pub const BINDING: &str = "ItemAttributes.Binding";
    pub const EDITION: &str = "ItemAttributes.Edition";
    pub const SKU: &str = "ItemAttributes.SKU";
    pub const MPN: &str = "ItemAttributes.MPN";
    pub const MODEL: &str = "ItemAttributes.Model";
    pub const PART_NUMBER: &str = "ItemAttributes.PartNumber";
    pub const COLOR: &str = "ItemAttributes.Color";
    pub const GENRE: &str = "ItemAttributes.Genre";
    pub const PAGES: &str = "ItemAttributes.NumberOfPages";
    pub const ACTOR: &str = "ItemAttributes.Actor";
    pub const DIRECTOR: &str = "ItemAttributes.Director";
    pub const PRODUCT_GROUP: &str = "ItemAttributes.ProductGroup";
    pub const PRODUCT_TYPE_NAME: &str = "ItemAttributes.ProductTypeName";
    pub const RUNNING_TIME: &str = "ItemAttributes.RunningTime";
    pub const IS_ADULT: &str = "ItemAttributes.IsAdultProduct";
    pub const LANGUAGE: &str = "ItemAttributes.Languages.Language";
    pub const LANGUAGE_NAME: &str = "Name";
    pub const FEATURE: &str = "ItemAttributes.Feature";
    pub const PUBLICATION_DATE: &str = "ItemAttributes.PublicationDate";
    pub const RELEASE_DATE: &str = "ItemAttributes.ReleaseDate";
    pub const LIST_PRICE_AMOUNT: &str = "ItemAttributes.ListPrice.Amount";
    pub const LIST_PRICE_CURRENCY: &str = "ItemAttributes.ListPrice.CurrencyCode";
    pub const LIST_PRICE_FORMATTED: &str = "ItemAttributes.ListPrice.FormattedPrice";

    pub const EAN: &str = "ItemAttributes.EAN";
    pub const EAN_LIST_ELEMENT: &str = "ItemAttributes.EANList.EANListElement";
    pub const UPC: &str = "ItemAttributes.UPC";
    pub const UPC_LIST_ELEMENT: &str = "ItemAttributes.UPCList.UPCListElement";

    pub const EDITORIAL_REVIEW: &str = "EditorialReviews.EditorialReview";
    pub const EDITORIAL_REVIEW_CONTENT: &str = "Content";
    pub const HAS_REVIEWS: &str = "CustomerReviews.HasReviews";
    pub const REVIEWS_IFRAME_URL: &str = "CustomerReviews.IFrameURL";

    pub const ALTERNATE_VERSION: &str = "AlternateVersions.AlternateVersion";
    pub const BROWSE_NODES: &str = "BrowseNodes";
}

/// Image paths from an `Item` node, and per-size paths inside an `ImageSet`.
pub mod image {
    pub const LARGE_URL: &str = "LargeImage.URL";
    pub const MEDIUM_URL: &str = "MediumImage.URL";
    pub const SMALL_URL: &str = "SmallImage.URL";
    pub const TINY_URL: &str = "TinyImage.URL";
    pub const SWATCH_URL: &str = "SwatchImage.URL";
    pub const THUMBNAIL_URL: &str = "ThumbnailImage.URL";
    pub const HI_RES_URL: &str = "HiResImage.URL";
    pub const IMAGE_SET: &str = "ImageSets.ImageSet";
    pub const CATEGORY_ATTR: &str = "Category";
}

/// Offer paths from an `Item` node.
pub mod offer {
    pub const SALE_PRICE_AMOUNT: &str = "Offers.Offer.OfferListing.SalePrice.Amount";
    pub const SALE_PRICE_CURRENCY: &str = "Offers.Offer.OfferListing.SalePrice.CurrencyCode";
    pub const SALE_PRICE_FORMATTED: &str = "Offers.Offer.OfferListing.SalePrice.FormattedPrice";
    pub const PRICE_AMOUNT: &str = "Offers.Offer.OfferListing.Price.Amount";
    pub const PRICE_CURRENCY: &str = "Offers.Offer.OfferListing.Price.CurrencyCode";
    pub const PRICE_FORMATTED: &str = "Offers.Offer.OfferListing.Price.FormattedPrice";
    pub const LOWEST_NEW_AMOUNT: &str = "OfferSummary.LowestNewPrice.Amount";
    pub const LOWEST_NEW_CURRENCY: &str = "OfferSummary.LowestNewPrice.CurrencyCode";
    pub const LOWEST_NEW_FORMATTED: &str = "OfferSummary.LowestNewPrice.FormattedPrice";

    pub const LISTING_ID: &str = "Offers.Offer.OfferListing.OfferListingId";
    pub const AVAILABILITY: &str = "Offers.Offer.OfferListing.Availability";
    pub const AVAILABILITY_TYPE: &str =
        "Offers.Offer.OfferListing.AvailabilityAttributes.AvailabilityType";
    pub const AVAILABILITY_MIN_HOURS: &str =
        "Offers.Offer.OfferListing.AvailabilityAttributes.MinimumHours";
    pub const AVAILABILITY_MAX_HOURS: &str =
        "Offers.Offer.OfferListing.AvailabilityAttributes.MaximumHours";
    pub const IS_PREORDER: &str = "Offers.Offer.OfferListing.AvailabilityAttributes.IsPreorder";
}

/// Paths from a cart response root.
pub mod cart {
    pub const CART_ID: &str = "Cart.CartId";
    pub const HMAC: &str = "Cart.HMAC";
    pub const URL_ENCODED_HMAC: &str = "Cart.URLEncodedHMAC";
    pub const PURCHASE_URL: &str = "Cart.PurchaseURL";
    pub const SUBTOTAL_AMOUNT: &str = "Cart.SubTotal.Amount";
    pub const SUBTOTAL_CURRENCY: &str = "Cart.SubTotal.CurrencyCode";
    pub const SUBTOTAL_FORMATTED: &str = "Cart.SubTotal.FormattedPrice";
    pub const CART_ITEM: &str = "Cart.CartItems.CartItem";
}

/// Paths from a `CartItem` node.
pub mod cart_item {
    pub const CART_ITEM_ID: &str = "CartItemId";
    pub const ASIN: &str = "ASIN";
    pub const TITLE: &str = "Title";
    pub const QUANTITY: &str = "Quantity";
    pub const PRODUCT_GROUP: &str = "ProductGroup";
    pub const AMOUNT: &str = "Price.Amount";
    pub const CURRENCY_CODE: &str = "Price.CurrencyCode";
    pub const FORMATTED_PRICE: &str = "Price.FormattedPrice";
}

/// Paths from a `BrowseNode` node.
pub mod browse_node {
    pub const NODE: &str = "BrowseNode";
    pub const ID: &str = "BrowseNodeId";
    pub const NAME: &str = "Name";
    pub const IS_CATEGORY_ROOT: &str = "IsCategoryRoot";
    pub const ANCESTOR: &str = "Ancestors.BrowseNode";
    pub const CHILD: &str = "Children.BrowseNode";
}

/// Paths from an `AlternateVersion` node.
pub mod alternate_version {
    pub const ASIN: &str = "ASIN";
    pub const TITLE: &str = "Title";
    pub const BINDING: &str = "Binding";
}
