//! Entity to model mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects,
//! plus the few helpers needed to bind entity fields back into queries.

mod category;
mod chapter;
mod story;
mod user;

pub use chapter::word_counts_to_db;
