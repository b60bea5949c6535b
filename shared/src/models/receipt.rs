//! Stock-in receipt models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stock-in receipt header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub stock_in_id: String,
    pub supplier_name: String,
    pub import_date: DateTime<Utc>,
    /// Operator code of the employee who recorded the receipt
    pub employee_id: String,
    /// Running total of all line items, maintained by the receiving engine
    pub total_cost: Decimal,
}

/// A receipt line item, keyed by (receipt, variant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub stock_in_id: String,
    pub variant_id: String,
    pub quantity: i32,
    /// Unit cost at time of receiving; on duplicate submission the latest
    /// submitted cost wins while quantities accumulate
    pub cost_price: Decimal,
}

/// One line of a receiving submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivingLine {
    pub variant_id: String,
    pub quantity: i32,
    pub price_import: Decimal,
}
