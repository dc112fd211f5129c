//! Aggregation domain module
//!
//! Requests are validated up front (non-empty, fields present for
//! `sum`/`avg`/`min`/`max`), then [`AggregationRequest::plan`] decides
//! whether the gateway can serve them. The gateway has no aggregation
//! endpoint, so the only executable plan is a row count without grouping;
//! everything else is an [`UnsupportedAggregation`] error, never an estimate.

pub mod operation;
pub mod request;
pub mod result;

pub use operation::{Aggregation, AggregationOp};
pub use request::{AggregationPlan, AggregationRequest, UnsupportedAggregation};
pub use result::AggregationResultRow;
