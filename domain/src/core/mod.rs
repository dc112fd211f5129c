//! Core domain concepts shared across all subdomains.
//!
//! - [`dataset_name::DatasetName`]: a validated, non-blank dataset name
//! - [`error::DomainError`]: caller-input validation errors

pub mod dataset_name;
pub mod error;
