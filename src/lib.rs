//! Moderation queue for annotated text samples.
//!
//! Visitors submit text tagged with a category and a source platform; an
//! admin approves or rejects pending entries; approved entries export as CSV.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod moderation;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::{Error, Result};
