//! Fetch-all pagination
//!
//! List endpoints return one page per request and advertise the next page in
//! `data.meta.next_page_payload.page_no`. Fetch-all walks that cursor one
//! page at a time and deep-merges every page's `data` into one result.

use ostkit_auth::{ParamValue, Params};
use serde_json::map::Entry;
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::validation::MAX_PAGE_SIZE;

/// Default cap on pages fetched by one fetch-all call
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Drives sequential page requests until the cursor stops advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    max_pages: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES)
    }
}

impl Paginator {
    /// Create a paginator that fails after `max_pages` pages
    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Fetch every page starting from `params`
    ///
    /// `fetch_page` performs one signed request and returns the envelope's
    /// `data`. A caller-supplied `limit` is raised to the maximum page size;
    /// `page_no` defaults to 1. Iteration stops once the advertised next page
    /// is absent, null, or equal to the page just requested. Any page error
    /// is returned as-is and the pages merged so far are dropped.
    pub fn fetch_all<F>(&self, mut params: Params, mut fetch_page: F) -> RestResult<Value>
    where
        F: FnMut(&Params) -> RestResult<Value>,
    {
        if params.contains_key("limit") {
            params.insert("limit", MAX_PAGE_SIZE);
        }
        let mut page_no = params.get("page_no").and_then(ParamValue::as_i64).unwrap_or(1);
        params.insert("page_no", page_no);

        let mut merged: Option<Value> = None;
        let mut pages = 0usize;

        loop {
            if pages >= self.max_pages {
                return Err(RestError::PageLimitExceeded {
                    max_pages: self.max_pages,
                });
            }

            debug!(page_no, "Fetching page");
            let data = fetch_page(&params)?;
            pages += 1;

            let next = next_page_no(&data);
            match merged.as_mut() {
                Some(acc) => merge_pages(acc, data),
                None => merged = Some(data),
            }

            match next {
                Some(next) if next != page_no => {
                    page_no = next;
                    params.insert("page_no", page_no);
                }
                _ => break,
            }
        }

        debug!(pages, "Fetched all pages");
        merged.ok_or_else(|| RestError::shape("no pages fetched"))
    }
}

/// The advertised next page, if any
///
/// Accepts the page number as an integer or a numeric string.
pub fn next_page_no(data: &Value) -> Option<i64> {
    match data.pointer("/meta/next_page_payload/page_no")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Deep-merge a later page into the accumulated result
///
/// Arrays are concatenated, objects merged key by key, and any other value
/// is overwritten by the later page.
pub fn merge_pages(acc: &mut Value, page: Value) {
    match (acc, page) {
        (Value::Object(into), Value::Object(from)) => {
            for (key, value) in from {
                match into.entry(key) {
                    Entry::Occupied(mut slot) => merge_pages(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (Value::Array(into), Value::Array(from)) => into.extend(from),
        (slot, other) => *slot = other,
    }
}
