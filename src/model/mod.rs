//! Domain models
//!
//! All pipeline records are consolidated in models.rs.

mod models;

pub use models::*;
