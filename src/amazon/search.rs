//! Lazy page-by-page iteration over `ItemSearch` results.

use crate::amazon::api::AmazonApi;
use crate::amazon::client::ProductApi;
use crate::amazon::params::Params;
use crate::amazon::product::Product;
use crate::error::{AmazonError, Result};
use futures::Stream;
use std::collections::VecDeque;
use tracing::debug;

/// Highest `ItemPage` the API serves for most search indexes.
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Iterates search results, fetching each page only when it is needed.
///
/// Nothing is requested until the first call to [`ResultPaginator::next`]
/// or [`ResultPaginator::next_page`].
pub struct ResultPaginator<'a, C: ProductApi> {
    api: &'a AmazonApi<C>,
    params: Params,
    current_page: u32,
    total_pages: Option<u32>,
    total_results: Option<u64>,
    max_pages: u32,
    buffer: VecDeque<Product>,
    exhausted: bool,
}

impl<'a, C: ProductApi> ResultPaginator<'a, C> {
    pub(crate) fn new(api: &'a AmazonApi<C>, params: Params, max_pages: u32) -> Self {
        Self {
            api,
            params,
            current_page: 0,
            total_pages: None,
            total_results: None,
            max_pages,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Last page fetched; 0 before the first fetch.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page count reported by the last response.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Result count reported by the last response.
    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Search parameters, without `ItemPage`.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// True once no further page will be fetched.
    pub fn is_last_page(&self) -> bool {
        if self.exhausted {
            return true;
        }
        self.current_page > 0 && self.current_page >= self.page_limit()
    }

    fn page_limit(&self) -> u32 {
        self.total_pages.map_or(self.max_pages, |total| total.min(self.max_pages))
    }

    /// Fetches the next page. `Ok(None)` once the results are exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Product>>> {
        if self.is_last_page() {
            return Ok(None);
        }

        let page = self.current_page + 1;
        match self.api.search_page(&self.params, page).await {
            Ok(result) => {
                self.current_page = page;
                self.total_pages = result.total_pages;
                self.total_results = result.total_results;

                if result.products.is_empty() {
                    debug!("Page {} is empty, stopping", page);
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(Some(result.products))
            }
            Err(AmazonError::NoMorePages(message)) => {
                debug!("No more pages after page {}: {}", self.current_page, message);
                self.exhausted = true;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the next product, fetching the following page when the
    /// current one is used up.
    pub async fn next(&mut self) -> Result<Option<Product>> {
        loop {
            if let Some(product) = self.buffer.pop_front() {
                return Ok(Some(product));
            }
            match self.next_page().await? {
                Some(products) => self.buffer.extend(products),
                None => return Ok(None),
            }
        }
    }

    /// Up to `n` products, fetching only the pages needed.
    pub async fn take(&mut self, n: usize) -> Result<Vec<Product>> {
        let mut products = Vec::with_capacity(n.min(100));
        while products.len() < n {
            match self.next().await? {
                Some(product) => products.push(product),
                None => break,
            }
        }
        Ok(products)
    }

    /// Every remaining product up to the page limit.
    pub async fn collect_all(&mut self) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        while let Some(product) = self.next().await? {
            products.push(product);
        }
        Ok(products)
    }

    /// Converts the paginator into a stream of products.
    pub fn into_stream(self) -> impl Stream<Item = Result<Product>> + 'a {
        futures::stream::try_unfold(self, |mut pages| async move {
            let next = pages.next().await?;
            Ok::<_, AmazonError>(next.map(|product| (product, pages)))
        })
    }
}
