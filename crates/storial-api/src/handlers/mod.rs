//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod categories;
pub mod chapters;
pub mod health;
pub mod stories;
