//! # Validation Module
//!
//! Field-level validation rules for line items.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Input masks, basic format checks                                  │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Setter checks (range, allowed set) → typed ValidationError        │
//! │  └── validate() checks (required, positive) → LineItem error set       │
//! │                                                                         │
//! │  The validate() path never returns Err: a failing row stays editable   │
//! │  and its failing fields are surfaced through LineItem::errors().       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{Quantity, TaxRate};

// =============================================================================
// Row Validation (the validate() invariant)
// =============================================================================

/// Validates a designation (the required line label).
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_designation(designation: &str) -> ValidationResult<()> {
    if designation.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "designation".to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be strictly positive (a zero-quantity line has nothing to bill)
pub fn validate_quantity(quantity: Quantity) -> ValidationResult<()> {
    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (offered items)
///
/// ## Example
/// ```rust
/// use facture_core::money::Money;
/// use facture_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_centimes(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_centimes(-100)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "unitPriceHT".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Setter Validation (range and allowed-set checks)
// =============================================================================

/// Validates a per-line discount in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates that a TVA rate is one of the legal Moroccan rates.
///
/// ## Rules
/// - Must be 0%, 7%, 10%, 14% or 20%
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if !rate.is_legal() {
        return Err(ValidationError::NotAllowed {
            field: "tvaRate".to_string(),
            allowed: crate::LEGAL_TVA_RATES_BPS
                .iter()
                .map(|bps| TaxRate::from_bps(*bps).to_string())
                .collect(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_designation() {
        assert!(validate_designation("Plan de travail chêne").is_ok());
        assert!(validate_designation("").is_err());
        assert!(validate_designation("   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::from_units(1)).is_ok());
        assert!(validate_quantity(Quantity::from_millis(1)).is_ok());

        assert!(validate_quantity(Quantity::zero()).is_err());
        assert!(validate_quantity(Quantity::from_millis(-500)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_centimes(1099)).is_ok());
        assert!(validate_unit_price(Money::from_centimes(-1)).is_err());
    }

    #[test]
    fn test_validate_discount_bps() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(1000).is_ok());
        assert!(validate_discount_bps(10_000).is_ok());
        assert!(validate_discount_bps(10_001).is_err());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::from_bps(0)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(2000)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(825)).is_err());
    }
}
