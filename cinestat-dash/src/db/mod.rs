//! Warehouse access layer for cinestat-dash

pub mod warehouse;
