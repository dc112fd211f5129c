//! Dataset domain module
//!
//! - [`entities`]: [`DatasetInfo`], [`DatasetSchema`], [`ColumnInfo`], [`SampleResult`]
//! - [`type_inference`]: column type inference from sample values

pub mod entities;
pub mod type_inference;

pub use entities::{ColumnInfo, DatasetInfo, DatasetSchema, SampleResult};
pub use type_inference::{extract_sample_values, infer_column_type, infer_type};
