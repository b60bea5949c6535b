//! Domain models for the Retail Back-Office Platform

pub mod catalog;
pub mod employee;
pub mod receipt;

pub use catalog::*;
pub use employee::*;
pub use receipt::*;
