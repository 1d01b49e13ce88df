//! Output formatting for products, browse nodes and carts (table, JSON, markdown, CSV).

use crate::amazon::models::{BrowseNodeSummary, CartSummary, Price, ProductSummary};
use crate::config::OutputFormat;

/// Formats summaries for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &ProductSummary) -> String {
        match self.format {
            OutputFormat::Json => json(product, "{}"),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[ProductSummary]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => PRODUCT_CSV_HEADER.to_string(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => json(products, "[]"),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats browse nodes.
    pub fn format_browse_nodes(&self, nodes: &[BrowseNodeSummary]) -> String {
        if nodes.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => NODE_CSV_HEADER.to_string(),
                _ => "No browse nodes found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => json(nodes, "[]"),
            OutputFormat::Table => {
                let mut lines = Vec::new();
                for node in nodes {
                    lines.push(format!("ID:       {}", opt_display(&node.id)));
                    lines.push(format!("Name:     {}", node.name.as_deref().unwrap_or("N/A")));
                    lines.push(format!("Path:     {}", node.path()));
                    if node.is_category_root {
                        lines.push("Root:     yes".to_string());
                    }
                    if !node.children.is_empty() {
                        lines.push(format!("Children: {}", node.children.join(", ")));
                    }
                    lines.push(String::new());
                }
                lines.push(format!("Total: {} nodes", nodes.len()));
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![
                    "| ID | Name | Path | Children |".to_string(),
                    "|----|------|------|----------|".to_string(),
                ];
                for node in nodes {
                    lines.push(format!(
                        "| {} | {} | {} | {} |",
                        opt_display(&node.id),
                        node.name.as_deref().unwrap_or(""),
                        node.path(),
                        node.children.len()
                    ));
                }
                lines.join("\n")
            }
            OutputFormat::Csv => {
                let mut lines = vec![NODE_CSV_HEADER.to_string()];
                for node in nodes {
                    lines.push(format!(
                        "{},{},{},{},{}",
                        node.id.map(|id| id.to_string()).unwrap_or_default(),
                        csv_escape(node.name.as_deref().unwrap_or("")),
                        csv_escape(&node.path()),
                        node.is_category_root,
                        csv_escape(&node.children.join("; "))
                    ));
                }
                lines.join("\n")
            }
        }
    }

    /// Formats a cart.
    pub fn format_cart(&self, cart: &CartSummary) -> String {
        match self.format {
            OutputFormat::Json => json(cart, "{}"),
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("Cart ID:  {}", cart.cart_id.as_deref().unwrap_or("N/A")),
                    format!("HMAC:     {}", cart.hmac.as_deref().unwrap_or("N/A")),
                    format!("Subtotal: {}", cart_subtotal(cart)),
                ];
                if let Some(url) = &cart.purchase_url {
                    lines.push(format!("Checkout: {}", url));
                }
                lines.push(String::new());

                if cart.items.is_empty() {
                    lines.push("Cart is empty.".to_string());
                    return lines.join("\n");
                }

                lines.push(format!("{:<14}  {:<10}  {:>3}  {:>10}  {}", "Item ID", "ASIN", "Qty", "Price", "Title"));
                lines.push(format!("{:-<14}  {:-<10}  {:->3}  {:->10}  {:-<40}", "", "", "", "", ""));
                for item in &cart.items {
                    lines.push(format!(
                        "{:<14}  {:<10}  {:>3}  {:>10}  {}",
                        item.cart_item_id.as_deref().unwrap_or(""),
                        item.asin.as_deref().unwrap_or(""),
                        item.quantity,
                        price_cell(&item.price),
                        truncate(item.title.as_deref().unwrap_or(""), 40)
                    ));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![
                    format!("## Cart {}", cart.cart_id.as_deref().unwrap_or("")),
                    String::new(),
                    format!("- **HMAC:** `{}`", cart.hmac.as_deref().unwrap_or("")),
                    format!("- **Subtotal:** {}", cart_subtotal(cart)),
                ];
                if let Some(url) = &cart.purchase_url {
                    lines.push(format!("- **Checkout:** [Proceed to checkout]({})", url));
                }
                lines.push(String::new());
                lines.push("| Item ID | ASIN | Qty | Price | Title |".to_string());
                lines.push("|---------|------|-----|-------|-------|".to_string());
                for item in &cart.items {
                    lines.push(format!(
                        "| {} | {} | {} | {} | {} |",
                        item.cart_item_id.as_deref().unwrap_or(""),
                        item.asin.as_deref().unwrap_or(""),
                        item.quantity,
                        price_cell(&item.price),
                        item.title.as_deref().unwrap_or("")
                    ));
                }
                lines.join("\n")
            }
            OutputFormat::Csv => {
                let mut lines = vec![CART_CSV_HEADER.to_string()];
                for item in &cart.items {
                    lines.push(format!(
                        "{},{},{},{},{},{}",
                        cart.cart_id.as_deref().unwrap_or(""),
                        item.cart_item_id.as_deref().unwrap_or(""),
                        item.asin.as_deref().unwrap_or(""),
                        csv_escape(item.title.as_deref().unwrap_or("")),
                        item.quantity,
                        item.price.as_ref().map(|p| p.amount.to_string()).unwrap_or_default()
                    ));
                }
                lines.join("\n")
            }
        }
    }

    // Table formatting

    fn table_single(&self, product: &ProductSummary) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ASIN:    {}", product.asin));
        lines.push(format!("Title:   {}", product.title.as_deref().unwrap_or("N/A")));
        lines.push(format!("URL:     {}", product.url));

        if !product.authors.is_empty() {
            lines.push(format!("Author:  {}", product.authors.join(", ")));
        }

        match (&product.price, &product.list_price) {
            (Some(price), Some(list)) if list.amount > price.amount => {
                lines.push(format!("Price:   {} (list {:.2})", price, list.amount));
            }
            (Some(price), _) => lines.push(format!("Price:   {}", price)),
            (None, _) => lines.push("Price:   N/A".to_string()),
        }

        if let Some(brand) = &product.brand {
            lines.push(format!("Brand:   {}", brand));
        }
        if let Some(binding) = &product.binding {
            lines.push(format!("Binding: {}", binding));
        }
        if let Some(rank) = product.sales_rank {
            lines.push(format!("Rank:    #{}", rank));
        }
        if let Some(date) = product.publication_date {
            lines.push(format!("Date:    {}", date));
        }
        if let Some(availability) = &product.availability {
            lines.push(format!("Stock:   {}", availability));
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[ProductSummary]) -> String {
        let asin_width = 10;
        let price_width = 12;
        let rank_width = 8;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<asin_width$}  {:<price_width$}  {:<rank_width$}  {}",
            "ASIN", "Price", "Rank", "Title"
        ));
        lines.push(format!(
            "{:-<asin_width$}  {:-<price_width$}  {:-<rank_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for product in products {
            let rank_str = product.sales_rank.map(|r| r.to_string()).unwrap_or_else(|| "N/A".to_string());
            lines.push(format!(
                "{:<asin_width$}  {:>price_width$}  {:>rank_width$}  {}",
                product.asin,
                price_cell(&product.price),
                rank_str,
                truncate(product.title.as_deref().unwrap_or(""), title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &ProductSummary) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.title.as_deref().unwrap_or(&product.asin)));
        lines.push(String::new());

        lines.push(format!("- **ASIN:** {}", product.asin));
        lines.push(format!("- **URL:** [View on Amazon]({})", product.url));

        if !product.authors.is_empty() {
            lines.push(format!("- **Author:** {}", product.authors.join(", ")));
        }

        if let Some(price) = &product.price {
            match &product.list_price {
                Some(list) if list.amount > price.amount => {
                    lines.push(format!("- **Price:** {} ~~{:.2}~~", price, list.amount));
                }
                _ => lines.push(format!("- **Price:** {}", price)),
            }
        }

        if let Some(brand) = &product.brand {
            lines.push(format!("- **Brand:** {}", brand));
        }
        if let Some(rank) = product.sales_rank {
            lines.push(format!("- **Sales rank:** #{}", rank));
        }
        if let Some(image) = &product.image_url {
            lines.push(format!("- **Image:** ![cover]({})", image));
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[ProductSummary]) -> String {
        let mut lines = Vec::new();

        lines.push("| ASIN | Price | Rank | Title |".to_string());
        lines.push("|------|-------|------|-------|".to_string());

        for product in products {
            lines.push(format!(
                "| {} | {} | {} | [{}]({}) |",
                product.asin,
                price_cell(&product.price),
                product.sales_rank.map(|r| r.to_string()).unwrap_or_else(|| "N/A".to_string()),
                truncate(product.title.as_deref().unwrap_or(""), 40),
                product.url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", products.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_products(&self, products: &[ProductSummary]) -> String {
        let mut lines = Vec::new();
        lines.push(PRODUCT_CSV_HEADER.to_string());

        for product in products {
            let amount = |p: &Option<Price>| p.as_ref().map(|p| p.amount.to_string()).unwrap_or_default();
            let currency = product
                .price
                .as_ref()
                .or(product.list_price.as_ref())
                .and_then(|p| p.currency.clone())
                .unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{},{}",
                product.asin,
                csv_escape(product.title.as_deref().unwrap_or("")),
                csv_escape(&product.authors.join("; ")),
                amount(&product.price),
                amount(&product.list_price),
                currency,
                product.sales_rank.map(|r| r.to_string()).unwrap_or_default(),
                product.publication_date.map(|d| d.to_string()).unwrap_or_default(),
                csv_escape(product.brand.as_deref().unwrap_or("")),
                csv_escape(product.binding.as_deref().unwrap_or("")),
                product.url
            ));
        }

        lines.join("\n")
    }
}

const PRODUCT_CSV_HEADER: &str =
    "asin,title,authors,price,list_price,currency,sales_rank,publication_date,brand,binding,url";

const NODE_CSV_HEADER: &str = "id,name,path,is_category_root,children";

const CART_CSV_HEADER: &str = "cart_id,cart_item_id,asin,title,quantity,price";

fn json<T: serde::Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}

fn price_cell(price: &Option<Price>) -> String {
    match price {
        Some(p) => format!("{:.2}", p.amount),
        None => "N/A".to_string(),
    }
}

fn cart_subtotal(cart: &CartSummary) -> String {
    cart.formatted_subtotal
        .clone()
        .or_else(|| cart.subtotal.as_ref().map(Price::to_string))
        .unwrap_or_else(|| "N/A".to_string())
}

fn opt_display<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_else(|| "N/A".to_string())
}

/// Shortens to `width` characters, ending with `...` when cut.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
