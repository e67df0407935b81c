//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In the previous Facture editor (binary floats):                        │
//! │    100.00 DH split across TVA brackets → centime drift on the total    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centimes                                         │
//! │    10000 centimes / 3 = 3333 centimes (×3 = 9999 centimes)             │
//! │    We KNOW we lost 1 centime, and handle it explicitly                  │
//! │    (the bracket allocation gives the remainder to the last bracket)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use facture_core::money::Money;
//!
//! // Create from centimes (preferred)
//! let price = Money::from_centimes(109_900); // 1 099,00 DH
//!
//! // Arithmetic operations
//! let total = price + Money::from_centimes(50_000); // 1 599,00 DH
//!
//! // NEVER do this:
//! // let bad = Money::from_float(1099.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{Quantity, TaxRate};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centimes (the smallest MAD unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credit notes and deltas
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  CatalogEntry.selling_price_ht ──► LineItem.unit_price ──► line_total  │
/// │                                                                         │
/// │  subtotal ──► global discount ──► net HT ──► TVA brackets ──► TTC      │
/// │                                                                         │
/// │  EVERY monetary value in the engine flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centimes (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// let price = Money::from_centimes(1099); // Represents 10,99 DH
    /// assert_eq!(price.centimes(), 1099);
    /// ```
    #[inline]
    pub const fn from_centimes(centimes: i64) -> Self {
        Money(centimes)
    }

    /// Creates a Money value from major and minor units (dirhams and centimes).
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // 10,99 DH
    /// assert_eq!(price.centimes(), 1099);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5,50 DH, not -4,50 DH.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in centimes (smallest currency unit).
    #[inline]
    pub const fn centimes(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dirhams) portion.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// assert_eq!(Money::from_centimes(1099).dirhams(), 10);
    /// assert_eq!(Money::from_centimes(-550).dirhams(), -5);
    /// ```
    #[inline]
    pub const fn dirhams(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centimes) portion (always 0-99).
    #[inline]
    pub const fn centimes_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates a percentage of this amount, in basis points.
    ///
    /// ## Implementation
    /// Integer math with a single rounded division:
    /// `(amount * bps + 5000) / 10000`. The +5000 rounds half up
    /// (5000/10000 = 0.5). i128 intermediates prevent overflow.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// let subtotal = Money::from_centimes(20_000); // 200,00 DH
    /// assert_eq!(subtotal.percentage_of(1000).centimes(), 2_000); // 10%
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_centimes(part as i64)
    }

    /// Calculates tax on this amount at the given rate.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    /// use facture_core::types::TaxRate;
    ///
    /// let base = Money::from_centimes(10_000);  // 100,00 DH
    /// let rate = TaxRate::from_bps(2000);       // 20%
    ///
    /// let tax = base.calculate_tax(rate);
    /// assert_eq!(tax.centimes(), 2_000); // 20,00 DH
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Bracket base: 100,00 DH
    ///      │
    ///      ▼
    /// calculate_tax(20%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Bracket amount: 20,00 DH ──► totalTVA ──► totalTTC
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage_of(rate.bps())
    }

    /// Computes a full line total in one rounded division:
    /// `unit_price × quantity × (1 − discount)`.
    ///
    /// ## Why Fused?
    /// Rounding after the quantity multiplication AND after the discount
    /// would compound to a visible centime error on long documents. Here
    /// the division happens once:
    /// `price_centimes × quantity_millis × (10000 − discount_bps)`
    /// over `1000 × 10000`, rounded half up.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    /// use facture_core::types::Quantity;
    ///
    /// let unit_price = Money::from_centimes(10_000); // 100,00 DH
    /// // 2,5 m² at 10% line discount: 100 × 2,5 × 0,9 = 225,00 DH
    /// let total = unit_price.line_total(Quantity::from_millis(2_500), 1000);
    /// assert_eq!(total.centimes(), 22_500);
    /// ```
    pub fn line_total(&self, quantity: Quantity, discount_bps: u32) -> Money {
        let num =
            self.0 as i128 * quantity.millis() as i128 * (10_000 - discount_bps.min(10_000) as i128);
        Money::from_centimes(((num + 5_000_000) / 10_000_000) as i64)
    }

    /// Allocates this amount proportionally: `self × part / whole`.
    ///
    /// Used by the TVA bracket allocation to spread the discounted net
    /// across rate buckets. Returns zero when `whole` is zero (a document
    /// whose lines all total zero has no proportions to speak of).
    ///
    /// ## Rounding
    /// Rounds half up. The caller is responsible for remainder handling:
    /// the per-bracket results may not sum back to `self`, and the totals
    /// engine hands the difference to the last bracket explicitly.
    pub fn allocate(&self, part: Money, whole: Money) -> Money {
        if whole.is_zero() {
            return Money::zero();
        }
        let num = self.0 as i128 * part.0 as i128;
        let den = whole.0 as i128;
        Money::from_centimes(((num + den / 2) / den) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{},{:02} DH",
            sign,
            self.dirhams().abs(),
            self.centimes_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_centimes() {
        let money = Money::from_centimes(1099);
        assert_eq!(money.centimes(), 1099);
        assert_eq!(money.dirhams(), 10);
        assert_eq!(money.centimes_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.centimes(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.centimes(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_centimes(1099)), "10,99 DH");
        assert_eq!(format!("{}", Money::from_centimes(500)), "5,00 DH");
        assert_eq!(format!("{}", Money::from_centimes(-550)), "-5,50 DH");
        assert_eq!(format!("{}", Money::from_centimes(0)), "0,00 DH");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_centimes(1000);
        let b = Money::from_centimes(500);

        assert_eq!((a + b).centimes(), 1500);
        assert_eq!((a - b).centimes(), 500);
    }

    #[test]
    fn test_tax_calculation_basic() {
        // 100,00 DH at 20% = 20,00 DH
        let amount = Money::from_centimes(10_000);
        let rate = TaxRate::from_bps(2000);
        assert_eq!(amount.calculate_tax(rate).centimes(), 2_000);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // 10,75 DH at 7% = 0,7525 DH → rounds to 0,75 DH
        let amount = Money::from_centimes(1075);
        let rate = TaxRate::from_bps(700);
        assert_eq!(amount.calculate_tax(rate).centimes(), 75);

        // 10,79 DH at 7% = 0,7553 DH → rounds to 0,76 DH
        let amount = Money::from_centimes(1079);
        assert_eq!(amount.calculate_tax(rate).centimes(), 76);
    }

    #[test]
    fn test_line_total_whole_quantity() {
        let unit_price = Money::from_centimes(299);
        let total = unit_price.line_total(Quantity::from_units(3), 0);
        assert_eq!(total.centimes(), 897);
    }

    #[test]
    fn test_line_total_fractional_quantity_and_discount() {
        // 80,00 DH/m² × 1,25 m² × (1 − 10%) = 90,00 DH
        let unit_price = Money::from_centimes(8_000);
        let total = unit_price.line_total(Quantity::from_millis(1_250), 1000);
        assert_eq!(total.centimes(), 9_000);
    }

    #[test]
    fn test_line_total_single_rounding() {
        // 0,01 DH × 0,333 at 33,33% discount:
        // 1 × 333 × 6667 / 10_000_000 = 0,222… → 0 centimes, one rounding
        let unit_price = Money::from_centimes(1);
        let total = unit_price.line_total(Quantity::from_millis(333), 3333);
        assert_eq!(total.centimes(), 0);
    }

    #[test]
    fn test_allocate_proportions() {
        let net = Money::from_centimes(18_000);
        let whole = Money::from_centimes(20_000);

        // Half of the gross → half of the net
        let part = Money::from_centimes(10_000);
        assert_eq!(net.allocate(part, whole).centimes(), 9_000);

        // Zero whole → zero share, never a division by zero
        assert_eq!(net.allocate(part, Money::zero()).centimes(), 0);
    }

    /// Critical test: document the intentional per-bracket rounding that the
    /// totals engine compensates for by assigning the remainder to the last
    /// bracket.
    #[test]
    fn test_allocate_remainder_documented() {
        let net = Money::from_centimes(100);
        let whole = Money::from_centimes(300);
        let third = Money::from_centimes(100);

        let share = net.allocate(third, whole); // 33,33…: rounds to 33
        assert_eq!(share.centimes(), 33);

        let reconstructed = share + share + share; // 99 centimes
        assert_eq!((net - reconstructed).centimes(), 1); // 1 centime to re-home
    }
}
