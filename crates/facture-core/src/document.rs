//! # Document
//!
//! The ordered line collection of a commercial document (facture, devis,
//! BL...) and its totals engine.
//!
//! ## Totals Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Totals Pipeline                             │
//! │                                                                         │
//! │  line totals ──► subtotal ──► global discount ──► net HT               │
//! │                                  (clamped to                           │
//! │                                   subtotal)          │                  │
//! │                                                      ▼                  │
//! │              ┌───────────────── TVA allocation ──────┘                  │
//! │              │                                                          │
//! │              │  For each distinct rate r (ascending):                   │
//! │              │    gross_r = Σ line totals at r                          │
//! │              │    base_r  = netHT × gross_r / subtotal                  │
//! │              │    (last bracket absorbs the rounding remainder so       │
//! │              │     Σ base_r == netHT exactly)                           │
//! │              │    amount_r = base_r × r                                 │
//! │              ▼                                                          │
//! │  totalTVA = Σ amount_r          totalTTC = netHT + totalTVA            │
//! │                                                                         │
//! │  Pure function of the current lines + discount. Recomputed from        │
//! │  scratch on every query; nothing is cached or persisted.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Spread the Discount Across Every Line?
//! When a document mixes TVA rates and carries one document-wide discount,
//! subtracting the discount from a single rate bucket would misstate the
//! taxable base of every other bucket. Spreading it proportionally keeps
//! each bracket's tax a fair share of the discounted base and makes
//! `netHT + totalTVA == totalTTC` hold exactly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::line::LineItem;
use crate::money::Money;
use crate::types::{CatalogEntry, GlobalDiscount, TaxRate};
use crate::validation;
use crate::words;
use crate::MAX_DOCUMENT_LINES;

// =============================================================================
// Tax Bracket
// =============================================================================

/// The aggregated taxable base and tax amount for one TVA rate.
///
/// Derived, never stored: recomputed from scratch on every totals query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TaxBracket {
    /// The TVA rate this bracket aggregates.
    pub rate: TaxRate,

    /// Share of the discounted net HT taxed at this rate.
    #[serde(rename = "baseHT")]
    pub base: Money,

    /// TVA amount for this bracket.
    pub amount: Money,
}

// =============================================================================
// Document Totals
// =============================================================================

/// The aggregate totals record.
///
/// Consumed by the summary panel, the save payload sent to the persistence
/// API, and the amount-in-words footer line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DocumentTotals {
    /// Sum of all line totals (after per-line discounts).
    pub subtotal: Money,

    /// The document-level discount actually applied (clamped to subtotal).
    pub global_discount_amount: Money,

    /// Taxable net: subtotal minus global discount. Never negative.
    #[serde(rename = "netHT")]
    pub net_ht: Money,

    /// Per-rate breakdown, ascending by rate.
    #[serde(rename = "tvaBreakdown")]
    pub brackets: Vec<TaxBracket>,

    /// Sum of all bracket amounts.
    #[serde(rename = "totalTVA")]
    pub total_tva: Money,

    /// Grand total including tax: net HT + total TVA.
    #[serde(rename = "totalTTC")]
    pub total_ttc: Money,
}

// =============================================================================
// Document
// =============================================================================

/// A commercial document: an ordered sequence of line items (the printed
/// line order) plus a document-level discount.
///
/// ## Invariants
/// - Line order is meaningful and preserved
/// - At most [`MAX_DOCUMENT_LINES`] lines
/// - The document holds no derived state: totals are a pure function of
///   the lines and the discount, safe to call on every render
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Document {
    /// Lines in printed order.
    lines: Vec<LineItem>,

    /// Document-level discount configuration.
    global_discount: GlobalDiscount,

    /// When the document was created.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Document {
    /// Creates an empty document with no discount.
    pub fn new() -> Self {
        Document {
            lines: Vec::new(),
            global_discount: GlobalDiscount::none(),
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Line Management
    // -------------------------------------------------------------------------

    /// Appends an empty `Draft` row and returns its id.
    pub fn add_line(&mut self) -> CoreResult<Uuid> {
        self.push_line(LineItem::new())
    }

    /// Appends a prepared line (e.g. one imported from a source document).
    pub fn push_line(&mut self, line: LineItem) -> CoreResult<Uuid> {
        if self.lines.len() >= MAX_DOCUMENT_LINES {
            return Err(CoreError::DocumentFull {
                max: MAX_DOCUMENT_LINES,
            });
        }
        let id = line.id();
        self.lines.push(line);
        Ok(id)
    }

    /// Returns the lines in printed order.
    #[inline]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Looks up a line by id.
    pub fn line(&self, line_id: Uuid) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.id() == line_id)
    }

    /// Looks up a line by id for mutation.
    ///
    /// Field mutation stays safe through this: the setters on [`LineItem`]
    /// enforce the lock themselves.
    pub fn line_mut(&mut self, line_id: Uuid) -> Option<&mut LineItem> {
        self.lines.iter_mut().find(|l| l.id() == line_id)
    }

    fn line_index(&self, line_id: Uuid) -> CoreResult<usize> {
        self.lines
            .iter()
            .position(|l| l.id() == line_id)
            .ok_or(CoreError::LineNotFound { line_id })
    }

    /// Validates a line and, on success, locks it.
    ///
    /// ## Side Effect
    /// Successfully validating the *last* row auto-appends a fresh `Draft`
    /// row, keeping the entry flow continuous (Enter, type, Enter, ...).
    /// The append is skipped silently at [`MAX_DOCUMENT_LINES`].
    ///
    /// ## Returns
    /// - `Ok(true)` - line validated and locked
    /// - `Ok(false)` - validation failed; the failing fields are in
    ///   [`LineItem::errors`] and the row stays editable
    /// - `Err(LineNotFound)` - unknown id
    pub fn validate_line(&mut self, line_id: Uuid) -> CoreResult<bool> {
        let index = self.line_index(line_id)?;
        let validated = self.lines[index].validate();

        if validated && index == self.lines.len() - 1 && self.lines.len() < MAX_DOCUMENT_LINES {
            self.lines.push(LineItem::new());
        }

        Ok(validated)
    }

    /// Unlocks a validated line back to `Editing`.
    pub fn unlock_line(&mut self, line_id: Uuid) -> CoreResult<()> {
        let index = self.line_index(line_id)?;
        self.lines[index].unlock();
        Ok(())
    }

    /// Removes a line regardless of its state.
    ///
    /// Removal is always allowed; whether to confirm first for a non-empty
    /// or validated row is UI policy, not an engine invariant.
    pub fn remove_line(&mut self, line_id: Uuid) -> CoreResult<()> {
        let index = self.line_index(line_id)?;
        self.lines.remove(index);
        Ok(())
    }

    /// Discards a line only if it is empty (blank designation, zero price).
    ///
    /// This backs the Escape-to-dismiss affordance: an empty row goes away
    /// without confirmation, a non-empty one is left untouched.
    ///
    /// ## Returns
    /// - `Ok(true)` - the empty line was removed
    /// - `Ok(false)` - the line has content and was kept
    pub fn discard_line(&mut self, line_id: Uuid) -> CoreResult<bool> {
        let index = self.line_index(line_id)?;
        if !self.lines[index].is_empty() {
            return Ok(false);
        }
        self.lines.remove(index);
        Ok(true)
    }

    /// Populates a line from a catalog entry (batch field update).
    pub fn apply_catalog_entry(&mut self, line_id: Uuid, entry: &CatalogEntry) -> CoreResult<()> {
        let index = self.line_index(line_id)?;
        self.lines[index].apply_catalog_entry(entry)
    }

    /// Number of lines, including unvalidated drafts.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the document has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // -------------------------------------------------------------------------
    // Global Discount
    // -------------------------------------------------------------------------

    #[inline]
    pub fn global_discount(&self) -> GlobalDiscount {
        self.global_discount
    }

    /// Sets the document-level discount.
    ///
    /// ## Rules
    /// - Percentage: 0 to 10000 bps
    /// - Fixed: non-negative (clamping to the subtotal happens at totals
    ///   time, since the subtotal moves with every edit)
    pub fn set_global_discount(&mut self, discount: GlobalDiscount) -> CoreResult<()> {
        match discount {
            GlobalDiscount::Percentage(bps) => validation::validate_discount_bps(bps)?,
            GlobalDiscount::Fixed(amount) => {
                if amount.is_negative() {
                    return Err(ValidationError::OutOfRange {
                        field: "discount".to_string(),
                        min: 0,
                        max: i64::MAX,
                    }
                    .into());
                }
            }
        }
        self.global_discount = discount;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Computes the aggregate totals. Pure; recomputed on every call.
    ///
    /// Lines in **any** validation state count toward the totals, so the
    /// summary panel tracks in-progress edits live. This mirrors the
    /// editor's behavior and is a deliberate UX choice.
    pub fn totals(&self) -> DocumentTotals {
        let mut subtotal = Money::zero();
        // Gross per rate, keyed by bps: BTreeMap gives ascending rate order.
        let mut gross_by_rate: BTreeMap<u32, Money> = BTreeMap::new();

        for line in &self.lines {
            let line_total = line.line_total();
            subtotal += line_total;
            *gross_by_rate
                .entry(line.tax_rate().bps())
                .or_insert_with(Money::zero) += line_total;
        }

        let global_discount_amount = match self.global_discount {
            GlobalDiscount::Percentage(bps) => subtotal.percentage_of(bps),
            // Clamp: a fixed discount larger than the subtotal must not
            // drive the net negative.
            GlobalDiscount::Fixed(amount) => amount.min(subtotal),
        };
        let net_ht = subtotal - global_discount_amount;

        let mut brackets = Vec::with_capacity(gross_by_rate.len());
        let mut allocated = Money::zero();
        let last = gross_by_rate.len().saturating_sub(1);

        for (i, (bps, gross)) in gross_by_rate.iter().enumerate() {
            // The last (highest-rate) bracket absorbs the rounding
            // remainder, so the bases reassemble the net exactly.
            let base = if i == last {
                net_ht - allocated
            } else {
                net_ht.allocate(*gross, subtotal)
            };
            allocated += base;

            let rate = TaxRate::from_bps(*bps);
            brackets.push(TaxBracket {
                rate,
                base,
                amount: base.calculate_tax(rate),
            });
        }

        let mut total_tva = Money::zero();
        for bracket in &brackets {
            total_tva += bracket.amount;
        }

        DocumentTotals {
            subtotal,
            global_discount_amount,
            net_ht,
            brackets,
            total_tva,
            total_ttc: net_ht + total_tva,
        }
    }

    /// Renders the grand total as the legal "amount in words" footer line.
    pub fn total_in_words(&self) -> String {
        words::amount_to_words(self.totals().total_ttc)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
