//! In-memory `ProductApi` used by unit tests.

use crate::amazon::client::ProductApi;
use crate::amazon::params::{Operation, Params};
use crate::amazon::regions::Region;
use crate::error::{AmazonError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Replays queued responses in order and records every call.
pub struct MockProductApi {
    responses: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<(Operation, Params)>>,
    call_count: AtomicU32,
    region: Region,
}

impl MockProductApi {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            calls: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
            region: Region::Us,
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Queues an error after the responses already queued.
    pub fn push_error(&self, error: AmazonError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<(Operation, Params)> {
        self.calls.lock().unwrap().clone()
    }

    /// Parameters of the `n`th call (0-based).
    pub fn params(&self, n: usize) -> Params {
        self.calls.lock().unwrap()[n].1.clone()
    }
}

#[async_trait]
impl ProductApi for MockProductApi {
    async fn execute(&self, operation: Operation, params: &Params) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push((operation, params.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AmazonError::InvalidRequest("no queued response".to_string())))
    }

    fn region(&self) -> Region {
        self.region
    }

    fn associate_tag(&self) -> &str {
        "mytag-20"
    }
}

/// Wraps items in an `ItemSearchResponse` page.
pub fn search_page(asins: &[&str], total_pages: u32) -> String {
    let items: String = asins
        .iter()
        .map(|asin| format!("<Item><ASIN>{0}</ASIN><ItemAttributes><Title>Title {0}</Title></ItemAttributes></Item>", asin))
        .collect();
    format!(
        "<ItemSearchResponse><Items><Request><IsValid>True</IsValid></Request>\
         <TotalResults>{}</TotalResults><TotalPages>{}</TotalPages>{}</Items></ItemSearchResponse>",
        total_pages * 10,
        total_pages,
        items
    )
}

/// Wraps items in an `ItemLookupResponse`.
pub fn lookup_response(asins: &[&str]) -> String {
    let items: String = asins
        .iter()
        .map(|asin| format!("<Item><ASIN>{0}</ASIN><ItemAttributes><Title>Title {0}</Title></ItemAttributes></Item>", asin))
        .collect();
    format!(
        "<ItemLookupResponse><Items><Request><IsValid>True</IsValid></Request>{}</Items></ItemLookupResponse>",
        items
    )
}

/// An `ItemSearchResponse` rejecting the requested page as out of range.
pub fn out_of_range_page() -> String {
    "<ItemSearchResponse><Items><Request><IsValid>True</IsValid><Errors><Error>\
     <Code>AWS.ParameterOutOfRange</Code><Message>The value you specified for ItemPage is invalid.</Message>\
     </Error></Errors></Request></Items></ItemSearchResponse>"
        .to_string()
}
