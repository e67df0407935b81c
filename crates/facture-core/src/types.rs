//! # Domain Types
//!
//! Core domain types used throughout the Facture engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    Quantity     │   │      Unit       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  millis (i64)   │   │  Piece "pcs"    │       │
//! │  │  2000 = 20%     │   │  2500 = 2,5     │   │  SquareMeter    │       │
//! │  └─────────────────┘   └─────────────────┘   │  LinearMeter    │       │
//! │                                              │  Hour, LumpSum  │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   └─────────────────┘       │
//! │  │ GlobalDiscount  │   │  CatalogEntry   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Percentage bps │   │  sku, name      │                             │
//! │  │  Fixed Money    │   │  price, rate    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::LEGAL_TVA_RATES_BPS;

// =============================================================================
// Tax Rate
// =============================================================================

/// TVA rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20% (the standard Moroccan TVA rate)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate (exonéré).
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks whether the rate is one of the legal Moroccan TVA rates
    /// (0%, 7%, 10%, 14%, 20%).
    pub fn is_legal(&self) -> bool {
        LEGAL_TVA_RATES_BPS.contains(&self.0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TVA_BPS)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}%", self.percentage())
        }
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// A line quantity in thousandths of a unit.
///
/// ## Why Thousandths?
/// Furniture work is quoted in fractional quantities (2,5 m² of panel,
/// 1,25 ml of edging). Storing thousandths keeps those exact in integer
/// math, the same way `Money` stores centimes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths (2500 = 2,5 units).
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Quantity(millis)
    }

    /// Creates a whole-unit quantity.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::types::Quantity;
    ///
    /// assert_eq!(Quantity::from_units(3).millis(), 3000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * 1000)
    }

    /// Returns the quantity in thousandths.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Checks if the quantity is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the quantity is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

/// A fresh line defaults to quantity 1, matching the editor's new-row state.
impl Default for Quantity {
    fn default() -> Self {
        Quantity::from_units(1)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1000 == 0 {
            write!(f, "{}", self.0 / 1000)
        } else {
            let sign = if self.0 < 0 { "-" } else { "" };
            write!(f, "{}{},{:03}", sign, (self.0 / 1000).abs(), (self.0 % 1000).abs())
        }
    }
}

// =============================================================================
// Unit of Measure
// =============================================================================

/// Unit of measure for a line item.
///
/// Purely descriptive: it is printed next to the quantity but never enters
/// any arithmetic. The serde codes match the values the form layer stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Unit {
    /// Piece / unit count ("pcs").
    #[serde(rename = "pcs")]
    Piece,
    /// Square meter ("m2") - panels, worktops.
    #[serde(rename = "m2")]
    SquareMeter,
    /// Linear meter ("ml") - edging, skirting.
    #[serde(rename = "ml")]
    LinearMeter,
    /// Hour of labor ("h").
    #[serde(rename = "h")]
    Hour,
    /// Lump sum ("forfait") - installation, delivery.
    #[serde(rename = "forfait")]
    LumpSum,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Piece
    }
}

// =============================================================================
// Global Discount
// =============================================================================

/// The document-level discount configuration.
///
/// ## Behavior
/// - `Percentage`: basis points of the subtotal (1000 = 10%).
/// - `Fixed`: a flat amount in centimes, clamped to the subtotal by the
///   totals engine so the net can never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GlobalDiscount {
    /// Percentage of the subtotal, in basis points.
    Percentage(u32),
    /// Flat amount off the subtotal.
    Fixed(Money),
}

impl GlobalDiscount {
    /// No discount at all.
    #[inline]
    pub const fn none() -> Self {
        GlobalDiscount::Percentage(0)
    }
}

impl Default for GlobalDiscount {
    fn default() -> Self {
        GlobalDiscount::none()
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// The batch of field values produced by a catalog lookup.
///
/// The engine never fetches catalog data itself; the surrounding form layer
/// resolves the user's pick into this record and hands it over, and
/// [`crate::line::LineItem::apply_catalog_entry`] copies the values in as
/// one operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogEntry {
    /// Catalog entry ID (UUID v4).
    pub id: Uuid,

    /// Stock Keeping Unit - business identifier, copied to the line reference.
    pub sku: String,

    /// Display name, copied to the line designation.
    pub name: String,

    /// Selling price excluding tax, per unit.
    pub selling_price_ht: Money,

    /// TVA rate for this catalog entry.
    pub tax_rate: TaxRate,

    /// Unit of measure.
    pub unit: Unit,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(2000);
        assert_eq!(rate.bps(), 2000);
        assert!((rate.percentage() - 20.0).abs() < 0.001);
        assert_eq!(rate.to_string(), "20%");
    }

    #[test]
    fn test_tax_rate_legality() {
        assert!(TaxRate::from_bps(0).is_legal());
        assert!(TaxRate::from_bps(700).is_legal());
        assert!(TaxRate::from_bps(1000).is_legal());
        assert!(TaxRate::from_bps(1400).is_legal());
        assert!(TaxRate::from_bps(2000).is_legal());

        assert!(!TaxRate::from_bps(825).is_legal());
        assert!(!TaxRate::from_bps(1960).is_legal());
    }

    #[test]
    fn test_tax_rate_default_is_standard_rate() {
        assert_eq!(TaxRate::default().bps(), 2000);
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::from_units(3).to_string(), "3");
        assert_eq!(Quantity::from_millis(2500).to_string(), "2,500");
        assert_eq!(Quantity::from_millis(50).to_string(), "0,050");
    }

    #[test]
    fn test_quantity_default_is_one() {
        assert_eq!(Quantity::default().millis(), 1000);
    }

    #[test]
    fn test_unit_serde_codes() {
        assert_eq!(serde_json::to_string(&Unit::Piece).unwrap(), "\"pcs\"");
        assert_eq!(serde_json::to_string(&Unit::SquareMeter).unwrap(), "\"m2\"");
        assert_eq!(serde_json::to_string(&Unit::LumpSum).unwrap(), "\"forfait\"");

        let unit: Unit = serde_json::from_str("\"ml\"").unwrap();
        assert_eq!(unit, Unit::LinearMeter);
    }

    #[test]
    fn test_global_discount_serde_shape() {
        let pct = GlobalDiscount::Percentage(1000);
        assert_eq!(
            serde_json::to_string(&pct).unwrap(),
            "{\"type\":\"percentage\",\"value\":1000}"
        );

        let fixed = GlobalDiscount::Fixed(Money::from_centimes(5000));
        assert_eq!(
            serde_json::to_string(&fixed).unwrap(),
            "{\"type\":\"fixed\",\"value\":5000}"
        );
    }

    #[test]
    fn test_global_discount_default_is_none() {
        assert_eq!(GlobalDiscount::default(), GlobalDiscount::Percentage(0));
    }
}
