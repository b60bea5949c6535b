//! Employee (operator) models

use serde::{Deserialize, Serialize};

/// An employee identity, referenced as the operator of a receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub full_name: String,
}
