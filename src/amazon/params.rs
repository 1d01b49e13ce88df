//! Operations and request parameters.

use std::collections::BTreeMap;
use std::fmt;

/// Product Advertising API operations supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ItemLookup,
    ItemSearch,
    SimilarityLookup,
    BrowseNodeLookup,
    CartCreate,
    CartAdd,
    CartModify,
    CartClear,
    CartGet,
}

impl Operation {
    /// Name sent as the `Operation` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ItemLookup => "ItemLookup",
            Operation::ItemSearch => "ItemSearch",
            Operation::SimilarityLookup => "SimilarityLookup",
            Operation::BrowseNodeLookup => "BrowseNodeLookup",
            Operation::CartCreate => "CartCreate",
            Operation::CartAdd => "CartAdd",
            Operation::CartModify => "CartModify",
            Operation::CartClear => "CartClear",
            Operation::CartGet => "CartGet",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request parameters for one operation, kept in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a parameter in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Sets a parameter only when it is not present yet.
    pub fn set_default(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.0.entry(key.to_string()).or_insert_with(|| value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `ItemId` lookup for one identifier.
    pub fn item_id(id: impl Into<String>) -> Self {
        Self::new().with("ItemId", id.into())
    }

    /// `ItemId` lookup for several identifiers (comma-joined).
    pub fn item_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = ids.into_iter().map(|s| s.as_ref().trim().to_string()).collect::<Vec<_>>();
        Self::new().with("ItemId", joined.join(","))
    }

    /// Keyword search within a search index (`All`, `Books`, `Electronics`, ...).
    pub fn keywords(keywords: impl Into<String>, search_index: impl Into<String>) -> Self {
        Self::new().with("Keywords", keywords.into()).with("SearchIndex", search_index.into())
    }

    /// Browse node lookup by id.
    pub fn browse_node(id: u64) -> Self {
        Self::new().with("BrowseNodeId", id)
    }

    /// Books power search.
    pub fn power(query: &PowerQuery) -> Self {
        Self::new().with("Power", query.to_string()).with("SearchIndex", "Books")
    }

    /// Sets the `ResponseGroup` parameter.
    pub fn response_group(self, group: impl Into<String>) -> Self {
        self.with("ResponseGroup", group.into())
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

/// Builder for the Books "Power" search syntax.
///
/// Clauses are joined with ` and `, e.g.
/// `author:ambrose and binding:(abridged or large print)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerQuery {
    clauses: Vec<String>,
}

impl PowerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `field:value` clause.
    pub fn field(mut self, field: &str, value: &str) -> Self {
        self.clauses.push(format!("{}:{}", field, value));
        self
    }

    /// Adds a `field:(a or b ...)` clause.
    pub fn any_of(mut self, field: &str, values: &[&str]) -> Self {
        self.clauses.push(format!("{}:({})", field, values.join(" or ")));
        self
    }

    pub fn author(self, author: &str) -> Self {
        self.field("author", author)
    }

    pub fn title(self, title: &str) -> Self {
        self.field("title", title)
    }

    pub fn publisher(self, publisher: &str) -> Self {
        self.field("publisher", publisher)
    }

    pub fn subject(self, subject: &str) -> Self {
        self.field("subject", subject)
    }

    /// Publication date constraint, e.g. `after 11-1996`.
    pub fn pubdate(self, constraint: &str) -> Self {
        self.field("pubdate", constraint)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for PowerQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clauses.join(" and "))
    }
}
