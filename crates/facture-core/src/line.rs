//! # Line Item
//!
//! One editable row of a commercial document, with its validation state
//! machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Line Item States                                    │
//! │                                                                         │
//! │            first field edit                validate() ok                │
//! │   ┌───────┐ ──────────────► ┌─────────┐ ──────────────► ┌───────────┐  │
//! │   │ Draft │                 │ Editing │                 │ Validated │  │
//! │   └───────┘                 └─────────┘ ◄────────────── └───────────┘  │
//! │       │                       ▲   │         unlock()          │        │
//! │       │                       │   │                           │        │
//! │       │     validate() fails ─┘   │                           │        │
//! │       │     (errors recorded,     │                           │        │
//! │       │      row stays open)      │                           │        │
//! │       │                           │                           │        │
//! │       └───────────────────────────┴───────────────────────────┘        │
//! │                     remove: always allowed, any state                  │
//! │                                                                         │
//! │  Draft and Editing render identically; Draft only marks "nothing       │
//! │  typed yet" so the UI knows which row to auto-focus.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogEntry, Quantity, TaxRate, Unit};
use crate::validation;

// =============================================================================
// Line State
// =============================================================================

/// The validation state of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineState {
    /// Newly inserted row, nothing typed yet. Fully editable.
    Draft,
    /// User actively modifying; validation errors may be displayed.
    Editing,
    /// Locked; fields are read-only until explicitly unlocked.
    Validated,
}

impl Default for LineState {
    fn default() -> Self {
        LineState::Draft
    }
}

// =============================================================================
// Line Field
// =============================================================================

/// A field that can fail row validation.
///
/// The serde names match the input ids the form layer highlights in red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LineField {
    #[serde(rename = "designation")]
    Designation,
    #[serde(rename = "quantity")]
    Quantity,
    #[serde(rename = "unitPriceHT")]
    UnitPrice,
}

// =============================================================================
// Line Item
// =============================================================================

/// A line item of a commercial document.
///
/// ## Invariants
/// - `Validated` implies non-empty designation, positive quantity and
///   non-negative unit price, and an empty error set
/// - A `Validated` line rejects every field mutation with
///   [`CoreError::LineLocked`] until [`LineItem::unlock`] is called
/// - The error set is recomputed from scratch on every [`LineItem::validate`]
///   attempt, never patched incrementally
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Line ID (UUID v4), stable for the item's lifetime.
    id: Uuid,

    /// Catalog entry that populated this line, if any.
    catalog_item_id: Option<Uuid>,

    /// Catalog SKU or free-form reference.
    reference: String,

    /// What is being billed. Required for validation.
    designation: String,

    /// Optional longer description printed under the designation.
    description: String,

    /// Quantity in thousandths of a unit.
    quantity: Quantity,

    /// Unit of measure (descriptive only).
    unit: Unit,

    /// Price excluding tax, per unit.
    #[serde(rename = "unitPriceHT")]
    unit_price: Money,

    /// Per-line discount in basis points, this line only.
    discount_bps: u32,

    /// TVA rate for this line.
    #[serde(rename = "tvaRate")]
    tax_rate: TaxRate,

    /// Validation state.
    state: LineState,

    /// Fields currently failing validation; empty when `Validated`.
    #[serde(rename = "validationErrors")]
    errors: Vec<LineField>,
}

impl LineItem {
    /// Creates an empty `Draft` row with the editor's defaults:
    /// quantity 1, unit "pcs", price 0, no discount, 20% TVA.
    pub fn new() -> Self {
        LineItem {
            id: Uuid::new_v4(),
            catalog_item_id: None,
            reference: String::new(),
            designation: String::new(),
            description: String::new(),
            quantity: Quantity::default(),
            unit: Unit::default(),
            unit_price: Money::zero(),
            discount_bps: 0,
            tax_rate: TaxRate::default(),
            state: LineState::Draft,
            errors: Vec::new(),
        }
    }

    /// Creates a pre-filled line, starting `Validated`.
    ///
    /// Used when a facture is built from a source document (PV, BL, BC) or
    /// reopened from a saved draft: those rows arrive complete and locked,
    /// exactly as the user left them.
    pub fn prefilled(
        designation: impl Into<String>,
        quantity: Quantity,
        unit: Unit,
        unit_price: Money,
        tax_rate: TaxRate,
    ) -> Self {
        LineItem {
            id: Uuid::new_v4(),
            catalog_item_id: None,
            reference: String::new(),
            designation: designation.into(),
            description: String::new(),
            quantity,
            unit,
            unit_price,
            discount_bps: 0,
            tax_rate,
            state: LineState::Validated,
            errors: Vec::new(),
        }
    }

    /// Sets the reference at construction time (builder style).
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Sets the description at construction time (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the per-line discount at construction time (builder style).
    pub fn with_discount_bps(mut self, discount_bps: u32) -> Self {
        self.discount_bps = discount_bps.min(10_000);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn catalog_item_id(&self) -> Option<Uuid> {
        self.catalog_item_id
    }

    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[inline]
    pub fn designation(&self) -> &str {
        &self.designation
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn discount_bps(&self) -> u32 {
        self.discount_bps
    }

    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    #[inline]
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Fields currently failing validation, in check order.
    #[inline]
    pub fn errors(&self) -> &[LineField] {
        &self.errors
    }

    #[inline]
    pub fn is_validated(&self) -> bool {
        self.state == LineState::Validated
    }

    /// An empty row: blank designation and zero unit price.
    ///
    /// Empty rows may be discarded without confirmation (Escape in the UI).
    pub fn is_empty(&self) -> bool {
        self.designation.trim().is_empty() && self.unit_price.is_zero()
    }

    /// The line total: `quantity × unit_price × (1 − discount)`.
    ///
    /// Computed in one rounded division; see [`Money::line_total`].
    pub fn line_total(&self) -> Money {
        self.unit_price.line_total(self.quantity, self.discount_bps)
    }

    // -------------------------------------------------------------------------
    // Field Mutation (lock-aware)
    // -------------------------------------------------------------------------

    fn ensure_editable(&self) -> CoreResult<()> {
        if self.state == LineState::Validated {
            return Err(CoreError::LineLocked { line_id: self.id });
        }
        Ok(())
    }

    /// First edit moves a `Draft` row into `Editing`.
    fn touch(&mut self) {
        if self.state == LineState::Draft {
            self.state = LineState::Editing;
        }
    }

    /// Editing a field clears that field's stale error; the full set is
    /// recomputed on the next validate attempt.
    fn clear_error(&mut self, field: LineField) {
        self.errors.retain(|e| *e != field);
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) -> CoreResult<()> {
        self.ensure_editable()?;
        self.touch();
        self.reference = reference.into();
        Ok(())
    }

    pub fn set_designation(&mut self, designation: impl Into<String>) -> CoreResult<()> {
        self.ensure_editable()?;
        self.touch();
        self.clear_error(LineField::Designation);
        self.designation = designation.into();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> CoreResult<()> {
        self.ensure_editable()?;
        self.touch();
        self.description = description.into();
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: Quantity) -> CoreResult<()> {
        self.ensure_editable()?;
        self.touch();
        self.clear_error(LineField::Quantity);
        self.quantity = quantity;
        Ok(())
    }

    pub fn set_unit(&mut self, unit: Unit) -> CoreResult<()> {
        self.ensure_editable()?;
        self.touch();
        self.unit = unit;
        Ok(())
    }

    pub fn set_unit_price(&mut self, unit_price: Money) -> CoreResult<()> {
        self.ensure_editable()?;
        self.touch();
        self.clear_error(LineField::UnitPrice);
        self.unit_price = unit_price;
        Ok(())
    }

    pub fn set_discount_bps(&mut self, discount_bps: u32) -> CoreResult<()> {
        self.ensure_editable()?;
        validation::validate_discount_bps(discount_bps)?;
        self.touch();
        self.discount_bps = discount_bps;
        Ok(())
    }

    pub fn set_tax_rate(&mut self, tax_rate: TaxRate) -> CoreResult<()> {
        self.ensure_editable()?;
        validation::validate_tax_rate(tax_rate)?;
        self.touch();
        self.tax_rate = tax_rate;
        Ok(())
    }

    /// Populates the line from a catalog entry as one batch:
    /// reference, designation, unit price, TVA rate and unit.
    ///
    /// The engine never fetches catalog data; the form layer resolves the
    /// user's pick and hands the resulting [`CatalogEntry`] over.
    pub fn apply_catalog_entry(&mut self, entry: &CatalogEntry) -> CoreResult<()> {
        self.ensure_editable()?;
        self.touch();
        self.clear_error(LineField::Designation);
        self.clear_error(LineField::UnitPrice);
        self.catalog_item_id = Some(entry.id);
        self.reference = entry.sku.clone();
        self.designation = entry.name.clone();
        self.unit_price = entry.selling_price_ht;
        self.tax_rate = entry.tax_rate;
        self.unit = entry.unit;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // State Transitions
    // -------------------------------------------------------------------------

    /// Runs the row invariant check and locks the line on success.
    ///
    /// ## Behavior
    /// - All field checks are recomputed from scratch on every attempt
    /// - Success: errors cleared, state `Validated`, returns `true`
    /// - Failure: errors set to the failing fields, state forced to
    ///   `Editing` (the row is NOT locked), returns `false`
    ///
    /// A failed validation is a normal outcome, not an `Err`.
    pub fn validate(&mut self) -> bool {
        let mut errors = Vec::new();

        if validation::validate_designation(&self.designation).is_err() {
            errors.push(LineField::Designation);
        }
        if validation::validate_quantity(self.quantity).is_err() {
            errors.push(LineField::Quantity);
        }
        if validation::validate_unit_price(self.unit_price).is_err() {
            errors.push(LineField::UnitPrice);
        }

        if errors.is_empty() {
            self.errors.clear();
            self.state = LineState::Validated;
            true
        } else {
            self.errors = errors;
            self.state = LineState::Editing;
            false
        }
    }

    /// Unlocks a validated line back to `Editing` and clears its errors.
    pub fn unlock(&mut self) {
        self.state = LineState::Editing;
        self.errors.clear();
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
