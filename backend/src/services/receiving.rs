//! Stock-in (inventory receiving) service
//!
//! The receiving engine is the only writer of variant stock and product
//! average cost. A submission and its mirror reversal each run inside a
//! single transaction: the product and variant rows involved in the cost
//! computation are locked with `SELECT ... FOR UPDATE` before the pre-image
//! read, so concurrent submissions against the same product serialize
//! instead of computing the average from a stale state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::error::{AppError, AppResult};
use crate::models::{Receipt, ReceiptLine, ReceivingLine};
use shared::costing;
use shared::ids::generate_receipt_id;
use shared::validation::{
    validate_entity_code, validate_receiving_quantity, validate_supplier_name, validate_unit_cost,
};

/// Receiving service for stock-in receipts and weighted-average costing
#[derive(Clone)]
pub struct ReceivingService {
    db: PgPool,
}

/// Input for creating or extending a stock-in receipt
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceiptInput {
    /// Existing receipt to extend; a new receipt is created when absent
    pub stock_in_id: Option<String>,
    /// Required when creating a new receipt
    pub supplier_name: Option<String>,
    /// Operator code; must resolve to a registered employee
    pub employee_id: String,
    pub items: Vec<ReceivingLine>,
}

/// Result of a receiving submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReceipt {
    pub stock_in_id: String,
}

/// Receipt header with operator display name
#[derive(Debug, Serialize)]
pub struct ReceiptSummary {
    #[serde(flatten)]
    pub receipt: Receipt,
    pub staff_name: String,
}

/// Line item joined with product display fields
#[derive(Debug, Serialize)]
pub struct ReceiptDetail {
    #[serde(flatten)]
    pub line: ReceiptLine,
    pub product_name: String,
    pub color: String,
    pub size: String,
}

/// Flat line-item listing across all receipts
#[derive(Debug, Serialize, FromRow)]
pub struct LineItemListing {
    pub stock_in_id: String,
    pub supplier_name: String,
    pub import_date: DateTime<Utc>,
    pub variant_id: String,
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub quantity: i32,
    pub cost_price: Decimal,
}

/// Row for the receipt list query
#[derive(Debug, FromRow)]
struct ReceiptRow {
    stock_in_id: String,
    supplier_name: String,
    import_date: DateTime<Utc>,
    employee_id: String,
    total_cost: Decimal,
    staff_name: String,
}

/// Row for the receipt detail query
#[derive(Debug, FromRow)]
struct DetailRow {
    stock_in_id: String,
    variant_id: String,
    product_name: String,
    color: String,
    size: String,
    quantity: i32,
    cost_price: Decimal,
}

impl ReceivingService {
    /// Create a new ReceivingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a new receipt or extend an existing one with a batch of lines.
    ///
    /// All effects (line upsert, variant stock, product average cost,
    /// receipt total) commit together or not at all. Lines are applied in
    /// submission order; the average cost is recomputed per submitted batch
    /// from the pre-increment stock, even when the batch merges into an
    /// existing line item.
    pub async fn submit_receipt(&self, input: CreateReceiptInput) -> AppResult<CreatedReceipt> {
        self.validate_submission(&input)?;

        let mut tx = self.db.begin().await?;

        // Unknown operators are rejected rather than auto-provisioned
        let operator_known = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = $1)",
        )
        .bind(&input.employee_id)
        .fetch_one(&mut *tx)
        .await?;

        if !operator_known {
            return Err(AppError::Validation {
                field: "employeeId".to_string(),
                message: format!("Unknown operator '{}'", input.employee_id),
            });
        }

        // Resolve or create the receipt header. A caller-supplied id is not
        // pre-checked: a missing receipt surfaces as a foreign-key violation
        // on the first line insert.
        let stock_in_id = match &input.stock_in_id {
            Some(id) => id.clone(),
            None => {
                let id = generate_receipt_id();
                let supplier = input.supplier_name.as_deref().unwrap_or_default();
                sqlx::query(
                    r#"
                    INSERT INTO stock_in (stock_in_id, supplier_name, import_date, total_cost, employee_id)
                    VALUES ($1, $2, now(), 0, $3)
                    "#,
                )
                .bind(&id)
                .bind(supplier)
                .bind(&input.employee_id)
                .execute(&mut *tx)
                .await?;
                id
            }
        };

        let mut batch_total = Decimal::ZERO;

        for line in &input.items {
            let applied = self.apply_line(&mut tx, &stock_in_id, line).await?;
            batch_total += applied;
        }

        sqlx::query("UPDATE stock_in SET total_cost = total_cost + $1 WHERE stock_in_id = $2")
            .bind(batch_total)
            .bind(&stock_in_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            stock_in_id = %stock_in_id,
            lines = input.items.len(),
            "stock-in receipt recorded"
        );

        Ok(CreatedReceipt { stock_in_id })
    }

    /// Delete one line item and reverse its effect on the receipt total and
    /// variant stock. The receipt header is removed when its last line goes.
    ///
    /// The average cost is deliberately left untouched: forward receiving
    /// moves it, reversal does not.
    pub async fn delete_line_item(&self, stock_in_id: &str, variant_id: &str) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let (quantity, cost_price) = sqlx::query_as::<_, (i32, Decimal)>(
            r#"
            SELECT quantity, cost_price FROM stock_in_details
            WHERE stock_in_id = $1 AND variant_id = $2
            FOR UPDATE
            "#,
        )
        .bind(stock_in_id)
        .bind(variant_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Line item {stock_in_id}/{variant_id}")))?;

        // Stock may have been sold since receiving; never let it go negative
        let stock = sqlx::query_scalar::<_, i32>(
            "SELECT stock_quantity FROM product_variants WHERE variant_id = $1 FOR UPDATE",
        )
        .bind(variant_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Variant {variant_id}")))?;

        if stock < quantity {
            return Err(AppError::InsufficientStock(format!(
                "Variant {variant_id} holds {stock} units, cannot reverse a receipt line of {quantity}"
            )));
        }

        let amount = costing::line_total(i64::from(quantity), cost_price);

        sqlx::query("DELETE FROM stock_in_details WHERE stock_in_id = $1 AND variant_id = $2")
            .bind(stock_in_id)
            .bind(variant_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE stock_in SET total_cost = total_cost - $1 WHERE stock_in_id = $2")
            .bind(amount)
            .bind(stock_in_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE product_variants SET stock_quantity = stock_quantity - $1 WHERE variant_id = $2",
        )
        .bind(quantity)
        .bind(variant_id)
        .execute(&mut *tx)
        .await?;

        let remaining = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stock_in_details WHERE stock_in_id = $1",
        )
        .bind(stock_in_id)
        .fetch_one(&mut *tx)
        .await?;

        if remaining == 0 {
            sqlx::query("DELETE FROM stock_in WHERE stock_in_id = $1")
                .bind(stock_in_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            stock_in_id = %stock_in_id,
            variant_id = %variant_id,
            "stock-in line item reversed"
        );

        Ok(())
    }

    /// List receipt headers, newest first
    pub async fn list_receipts(&self) -> AppResult<Vec<ReceiptSummary>> {
        let rows = sqlx::query_as::<_, ReceiptRow>(
            r#"
            SELECT si.stock_in_id, si.supplier_name, si.import_date, si.employee_id, si.total_cost,
                   COALESCE(e.full_name, si.employee_id) AS staff_name
            FROM stock_in si
            LEFT JOIN employees e ON e.employee_id = si.employee_id
            ORDER BY si.import_date DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ReceiptSummary {
                receipt: Receipt {
                    stock_in_id: r.stock_in_id,
                    supplier_name: r.supplier_name,
                    import_date: r.import_date,
                    employee_id: r.employee_id,
                    total_cost: r.total_cost,
                },
                staff_name: r.staff_name,
            })
            .collect())
    }

    /// Get the line items of one receipt with product display fields
    pub async fn get_receipt_details(&self, stock_in_id: &str) -> AppResult<Vec<ReceiptDetail>> {
        let rows = sqlx::query_as::<_, DetailRow>(
            r#"
            SELECT sid.stock_in_id, sid.variant_id, p.name AS product_name,
                   pv.color, pv.size, sid.quantity, sid.cost_price
            FROM stock_in_details sid
            JOIN product_variants pv ON pv.variant_id = sid.variant_id
            JOIN products p ON p.product_id = pv.product_id
            WHERE sid.stock_in_id = $1
            ORDER BY sid.variant_id
            "#,
        )
        .bind(stock_in_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ReceiptDetail {
                line: ReceiptLine {
                    stock_in_id: r.stock_in_id,
                    variant_id: r.variant_id,
                    quantity: r.quantity,
                    cost_price: r.cost_price,
                },
                product_name: r.product_name,
                color: r.color,
                size: r.size,
            })
            .collect())
    }

    /// Flat listing of all line items, newest receipts first
    pub async fn list_line_items(&self) -> AppResult<Vec<LineItemListing>> {
        let rows = sqlx::query_as::<_, LineItemListing>(
            r#"
            SELECT sid.stock_in_id, si.supplier_name, si.import_date, sid.variant_id,
                   p.name AS product_name, pv.color, pv.size, sid.quantity, sid.cost_price
            FROM stock_in_details sid
            JOIN stock_in si ON si.stock_in_id = sid.stock_in_id
            JOIN product_variants pv ON pv.variant_id = sid.variant_id
            JOIN products p ON p.product_id = pv.product_id
            ORDER BY si.import_date DESC, sid.variant_id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Upfront input validation; nothing is written before this passes
    fn validate_submission(&self, input: &CreateReceiptInput) -> AppResult<()> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "At least one line item is required".to_string(),
            });
        }

        validate_entity_code(&input.employee_id).map_err(|msg| AppError::Validation {
            field: "employeeId".to_string(),
            message: msg.to_string(),
        })?;

        if input.stock_in_id.is_none() {
            let supplier = input.supplier_name.as_deref().unwrap_or_default();
            validate_supplier_name(supplier).map_err(|msg| AppError::Validation {
                field: "supplierName".to_string(),
                message: msg.to_string(),
            })?;
        }

        for line in &input.items {
            validate_entity_code(&line.variant_id).map_err(|msg| AppError::Validation {
                field: "variantId".to_string(),
                message: msg.to_string(),
            })?;
            validate_receiving_quantity(i64::from(line.quantity)).map_err(|msg| {
                AppError::Validation {
                    field: "quantity".to_string(),
                    message: msg.to_string(),
                }
            })?;
            validate_unit_cost(line.price_import).map_err(|msg| AppError::Validation {
                field: "priceImport".to_string(),
                message: msg.to_string(),
            })?;
        }

        Ok(())
    }

    /// Apply one receiving line inside the submission transaction.
    ///
    /// Returns the monetary value of the line for the receipt total.
    async fn apply_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stock_in_id: &str,
        line: &ReceivingLine,
    ) -> AppResult<Decimal> {
        let quantity = i64::from(line.quantity);

        // Lock the variant row and its product row before any read that
        // feeds the cost computation
        let (product_id, average_cost) = sqlx::query_as::<_, (String, Decimal)>(
            r#"
            SELECT p.product_id, p.cost_price
            FROM product_variants pv
            JOIN products p ON p.product_id = pv.product_id
            WHERE pv.variant_id = $1
            FOR UPDATE
            "#,
        )
        .bind(&line.variant_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Variant {}", line.variant_id)))?;

        // Explicit read-then-branch upsert: quantities accumulate, the
        // latest submitted unit cost wins
        let existing = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT quantity FROM stock_in_details
            WHERE stock_in_id = $1 AND variant_id = $2
            FOR UPDATE
            "#,
        )
        .bind(stock_in_id)
        .bind(&line.variant_id)
        .fetch_optional(&mut **tx)
        .await?;

        if existing.is_some() {
            sqlx::query(
                r#"
                UPDATE stock_in_details
                SET quantity = quantity + $1, cost_price = $2
                WHERE stock_in_id = $3 AND variant_id = $4
                "#,
            )
            .bind(line.quantity)
            .bind(line.price_import)
            .bind(stock_in_id)
            .bind(&line.variant_id)
            .execute(&mut **tx)
            .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO stock_in_details (stock_in_id, variant_id, quantity, cost_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(stock_in_id)
            .bind(&line.variant_id)
            .bind(line.quantity)
            .bind(line.price_import)
            .execute(&mut **tx)
            .await?;
        }

        // Pre-increment total stock across all variants of the product
        let total_stock = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(stock_quantity), 0) FROM product_variants WHERE product_id = $1",
        )
        .bind(&product_id)
        .fetch_one(&mut **tx)
        .await?;

        // The just-submitted batch moves the average, not the merged line
        let new_average =
            costing::moving_average(total_stock, average_cost, quantity, line.price_import);

        sqlx::query("UPDATE products SET cost_price = $1 WHERE product_id = $2")
            .bind(new_average)
            .bind(&product_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "UPDATE product_variants SET stock_quantity = stock_quantity + $1 WHERE variant_id = $2",
        )
        .bind(line.quantity)
        .bind(&line.variant_id)
        .execute(&mut **tx)
        .await?;

        Ok(costing::line_total(quantity, line.price_import))
    }
}
