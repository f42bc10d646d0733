//! Core domain types and logic.

pub mod candle;
pub mod indicator;
pub mod analysis;
pub mod classifier;
pub mod catalog;
pub mod scoring;
pub mod generator;
pub mod batch;
pub mod error;
