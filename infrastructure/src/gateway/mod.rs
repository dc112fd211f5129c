//! Gateway adapters
//!
//! [`HttpDatasetGateway`] implements the application's `DatasetGateway`
//! port over HTTPS with bearer-token authentication.

mod http;

pub use http::HttpDatasetGateway;
