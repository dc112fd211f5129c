//! Pagination Translator
//!
//! Tool callers paginate with `(offset, max_rows)`; the gateway pages with
//! `(page, per_page)`. This module converts between the two and derives the
//! continuation metadata (`has_more`, `next_offset`) from what the gateway
//! actually returned.
//!
//! The page derivation assumes a page-aligned offset. A non-aligned offset
//! (e.g. `offset=5, max_rows=10`) rounds down to the containing page, so the
//! rows returned start at [`PageWindow::page_start`], not at `offset`.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Upper bound for `max_rows`
pub const MAX_ROWS_LIMIT: u32 = 1000;
/// `max_rows` used when the caller does not specify one
pub const DEFAULT_MAX_ROWS: u32 = 100;
/// Upper bound for `sample_size`
pub const MAX_SAMPLE_SIZE: u32 = 100;
/// `sample_size` used when the caller does not specify one
pub const DEFAULT_SAMPLE_SIZE: u32 = 20;

/// Gateway page request: 1-based `page` of `per_page` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayPage {
    pub page: u64,
    pub per_page: u32,
}

impl GatewayPage {
    /// `page = offset / max_rows + 1` when `max_rows > 0`, else page 1
    pub fn from_offset(offset: u64, max_rows: u32) -> Self {
        let page = if max_rows > 0 {
            offset / u64::from(max_rows) + 1
        } else {
            1
        };
        Self {
            page,
            per_page: max_rows,
        }
    }

    /// The first page holding `per_page` rows
    pub fn first(per_page: u32) -> Self {
        Self { page: 1, per_page }
    }
}

/// Caller-facing pagination window (Value Object)
///
/// Invariants: `max_rows` in `[1, 1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    max_rows: u32,
}

impl PageWindow {
    pub fn new(offset: i64, max_rows: i64) -> Result<Self, DomainError> {
        if !(1..=i64::from(MAX_ROWS_LIMIT)).contains(&max_rows) {
            return Err(DomainError::MaxRowsOutOfRange(max_rows));
        }
        if offset < 0 {
            return Err(DomainError::NegativeOffset(offset));
        }
        Ok(Self {
            offset: offset as u64,
            max_rows: max_rows as u32,
        })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn max_rows(&self) -> u32 {
        self.max_rows
    }

    pub fn to_gateway_page(&self) -> GatewayPage {
        GatewayPage::from_offset(self.offset, self.max_rows)
    }

    pub fn is_page_aligned(&self) -> bool {
        self.offset % u64::from(self.max_rows) == 0
    }

    /// Index of the first row of the page the gateway will return
    pub fn page_start(&self) -> u64 {
        (self.to_gateway_page().page - 1) * u64::from(self.max_rows)
    }
}

/// Number of rows requested by a sample (Value Object), in `[1, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSize(u32);

impl SampleSize {
    pub fn new(size: i64) -> Result<Self, DomainError> {
        if !(1..=i64::from(MAX_SAMPLE_SIZE)).contains(&size) {
            return Err(DomainError::SampleSizeOutOfRange(size));
        }
        Ok(Self(size as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Samples always read the first page
    pub fn to_gateway_page(&self) -> GatewayPage {
        GatewayPage::first(self.0)
    }
}

impl Default for SampleSize {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_SIZE)
    }
}

/// Continuation metadata derived from a gateway response
///
/// Invariant: `has_more == offset + rows_returned < total_matching`, and
/// `next_offset` is `Some(offset + rows_returned)` exactly when `has_more`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContinuation {
    pub total_matching: u64,
    pub has_more: bool,
    pub next_offset: Option<u64>,
}

impl PageContinuation {
    /// Derive continuation from the caller offset, the gateway-reported
    /// total (if any) and the number of rows actually returned.
    ///
    /// A missing total is taken to be `rows_returned`.
    pub fn from_gateway_result(offset: u64, total: Option<u64>, rows_returned: u64) -> Self {
        let total_matching = total.unwrap_or(rows_returned);
        let end = offset + rows_returned;
        let has_more = end < total_matching;
        Self {
            total_matching,
            has_more,
            next_offset: has_more.then_some(end),
        }
    }
}
