//! Operator (employee) registry, read-only
//!
//! Backs the receiving form's operator field. The receiving engine performs
//! its own existence check inside the submission transaction.

use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::Employee;

/// Staff lookup service
#[derive(Clone)]
pub struct StaffService {
    db: PgPool,
}

impl StaffService {
    /// Create a new StaffService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all registered employees
    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT employee_id, full_name FROM employees ORDER BY employee_id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(employee_id, full_name)| Employee {
                employee_id,
                full_name,
            })
            .collect())
    }
}
