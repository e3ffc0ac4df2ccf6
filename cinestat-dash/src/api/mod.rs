//! HTTP API handlers for cinestat-dash

pub mod actors;
pub mod awards;
pub mod correlation;
pub mod crew;
pub mod error;
pub mod genres;
pub mod health;
pub mod overview;

pub use error::ApiError;
