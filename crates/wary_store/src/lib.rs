//! Durable loss repository backed by SQLite.
//!
//! Positions are keyed by their board serialization. The schema is created
//! by embedded migrations the first time a database file is opened, and all
//! queries go through diesel's parameterized query builder.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{LosingPosition, NewLosingPosition};
pub use repository::SqliteLossRepository;
