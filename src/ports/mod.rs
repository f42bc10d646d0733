//! Port traits for external collaborators.

pub mod config_port;
pub mod market_port;
pub mod store_port;
