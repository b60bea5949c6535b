//! Business logic services for the Retail Back-Office Platform

pub mod catalog;
pub mod receiving;
pub mod staff;

pub use catalog::CatalogService;
pub use receiving::ReceivingService;
pub use staff::StaffService;
