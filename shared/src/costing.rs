//! Weighted-average (moving average) inventory costing
//!
//! The product average cost is recomputed incrementally on every receiving
//! batch: it is path-dependent on the order in which batches are applied,
//! not a simple historical mean.

use rust_decimal::Decimal;

/// Compute the new weighted-average unit cost after receiving a batch.
///
/// `total_stock` is the product's total stock BEFORE this batch is added
/// (summed across all its variants), `average_cost` the product's current
/// average. The batch contributes `quantity` units at `unit_cost`.
///
/// When the product held no stock before the batch, the batch cost becomes
/// the new average.
pub fn moving_average(
    total_stock: i64,
    average_cost: Decimal,
    quantity: i64,
    unit_cost: Decimal,
) -> Decimal {
    let new_total = total_stock + quantity;
    if new_total <= 0 {
        return unit_cost;
    }
    let old_value = Decimal::from(total_stock) * average_cost;
    let batch_value = Decimal::from(quantity) * unit_cost;
    (old_value + batch_value) / Decimal::from(new_total)
}

/// Monetary value of a receiving line.
pub fn line_total(quantity: i64, unit_cost: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_first_batch_sets_average() {
        // Empty product: the batch cost becomes the average
        let avg = moving_average(0, Decimal::ZERO, 10, dec("100"));
        assert_eq!(avg, dec("100"));
    }

    #[test]
    fn test_moving_average_blends_batches() {
        // 10 units at 100 already held, 5 more at 200
        let avg = moving_average(10, dec("100"), 5, dec("200"));
        assert_eq!(avg.round_dp(2), dec("133.33"));
    }

    #[test]
    fn test_same_cost_keeps_average() {
        let avg = moving_average(40, dec("75"), 60, dec("75"));
        assert_eq!(avg, dec("75"));
    }

    #[test]
    fn test_average_is_order_dependent() {
        // (0 +10@100) then (+5@200) vs (0 +5@200) then (+10@100)
        let a1 = moving_average(0, Decimal::ZERO, 10, dec("100"));
        let a2 = moving_average(10, a1, 5, dec("200"));

        let b1 = moving_average(0, Decimal::ZERO, 5, dec("200"));
        let b2 = moving_average(5, b1, 10, dec("100"));

        // Final averages agree because the total value and quantity agree,
        // but the intermediate states differ
        assert_eq!(a2.round_dp(6), b2.round_dp(6));
        assert_ne!(a1, b1);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(10, dec("100")), dec("1000"));
        assert_eq!(line_total(15, dec("200")), dec("3000"));
        assert_eq!(line_total(3, dec("19.99")), dec("59.97"));
    }
}
