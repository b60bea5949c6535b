//! HTTP handlers for the Retail Back-Office Platform

pub mod catalog;
pub mod health;
pub mod staff;
pub mod stock_in;

pub use catalog::*;
pub use health::*;
pub use staff::*;
pub use stock_in::*;
