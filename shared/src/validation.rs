//! Validation utilities for the Retail Back-Office Platform

use rust_decimal::Decimal;

// ============================================================================
// Receiving Validations
// ============================================================================

/// Validate a received quantity (strictly positive)
pub fn validate_receiving_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be a positive integer");
    }
    Ok(())
}

/// Validate a unit cost (non-negative)
pub fn validate_unit_cost(unit_cost: Decimal) -> Result<(), &'static str> {
    if unit_cost < Decimal::ZERO {
        return Err("Unit cost cannot be negative");
    }
    Ok(())
}

/// Validate a supplier name for a new receipt
pub fn validate_supplier_name(supplier: &str) -> Result<(), &'static str> {
    if supplier.trim().is_empty() {
        return Err("Supplier name is required for a new receipt");
    }
    Ok(())
}

// ============================================================================
// Identifier Validations
// ============================================================================

/// Validate an entity code: 1-25 characters, alphanumeric plus underscore.
///
/// Covers product codes (`P001`), variant codes (`P001_2`), employee codes
/// (`WH01`) and receipt codes (`SI00123456`).
pub fn validate_entity_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() {
        return Err("Identifier must not be empty");
    }
    if code.len() > 25 {
        return Err("Identifier must be at most 25 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Identifier must be alphanumeric");
    }
    Ok(())
}
