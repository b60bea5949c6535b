//! Shared types and domain logic for the Retail Back-Office Platform
//!
//! This crate contains the types and pure calculations shared between the
//! backend and other components of the system.

pub mod costing;
pub mod ids;
pub mod models;
pub mod validation;

pub use costing::*;
pub use ids::*;
pub use models::*;
pub use validation::*;
