//! Identifier synthesis for system-generated records

use chrono::Utc;

/// Prefix for system-generated receipt identifiers
pub const RECEIPT_ID_PREFIX: &str = "SI";

/// Synthesize a receipt identifier from the current time.
///
/// Format: `SI` followed by the last 8 digits of the unix timestamp in
/// milliseconds. Uniqueness is enforced by the primary key on the receipt
/// table; a collision aborts the enclosing transaction.
pub fn generate_receipt_id() -> String {
    receipt_id_from_millis(Utc::now().timestamp_millis())
}

fn receipt_id_from_millis(millis: i64) -> String {
    let digits = millis.unsigned_abs().to_string();
    let tail = if digits.len() > 8 {
        &digits[digits.len() - 8..]
    } else {
        digits.as_str()
    };
    format!("{RECEIPT_ID_PREFIX}{tail}")
}

/// Split a composite line-item identifier `receiptId_variantId`.
///
/// Receipt identifiers never contain an underscore, variant identifiers may
/// (e.g. `P001_2`), so the split is on the first underscore only.
pub fn split_line_item_id(composite: &str) -> Option<(&str, &str)> {
    let (receipt_id, variant_id) = composite.split_once('_')?;
    if receipt_id.is_empty() || variant_id.is_empty() {
        return None;
    }
    Some((receipt_id, variant_id))
}
