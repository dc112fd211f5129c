//! Application-level configuration.
//!
//! - [`GatewayEndpoints`]: gateway route construction (caller tag, view variant)

pub mod endpoints;

pub use endpoints::GatewayEndpoints;
