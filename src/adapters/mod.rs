//! Concrete adapter implementations of the port traits.

pub mod file_config_adapter;
pub mod csv_market_adapter;
pub mod csv_tier_adapter;
pub mod json_store_adapter;
