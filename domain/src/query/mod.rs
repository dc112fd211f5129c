//! Query domain module
//!
//! The translation half of the query pipeline: everything between validated
//! tool arguments and the gateway wire format, with no I/O.
//!
//! ```text
//! tool args ──▶ Filter / SortSpec / PageWindow ──▶ gateway body
//!                                                   {filters, sorters, page, per_page}
//! gateway response {total, data} ──▶ PageContinuation ──▶ QueryResult
//! ```
//!
//! - [`filter`]: the Filter Model
//! - [`sort`]: single-key sort directive
//! - [`page`]: Pagination Translator
//! - [`predicate`]: Filter Predicate Mapper (gateway and direct-store targets)
//! - [`result`]: [`QueryResult`](result::QueryResult) with derived continuation

pub mod filter;
pub mod page;
pub mod predicate;
pub mod result;
pub mod sort;

pub use filter::{Filter, FilterType};
pub use page::{GatewayPage, PageContinuation, PageWindow, SampleSize};
pub use predicate::{StorePredicate, to_gateway_filters, to_store_predicate};
pub use result::{QueryResult, ResponseFormat};
pub use sort::{SortDirection, SortSpec};
