//! Warehouse database access
//!
//! Schema bootstrap and typed row models shared by the dashboard services.

pub mod init;
pub mod models;

pub use init::{init_database, init_in_memory};
