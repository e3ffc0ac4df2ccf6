//! # CineStat Common Library
//!
//! Shared code for the CineStat dashboard services including:
//! - Warehouse row models (typed records for the aggregation engine)
//! - Warehouse schema bootstrap
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
