//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub base_price: Decimal,
    /// Weighted-average unit cost, mutated only by the receiving engine
    pub cost_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A sellable variant of a product (one color/size combination)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub variant_id: String,
    pub product_id: String,
    pub color: String,
    pub size: String,
    pub stock_quantity: i32,
}
