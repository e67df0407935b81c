//! # facture-core: Pure Business Logic for the Facture Editor
//!
//! This crate is the **heart** of the commercial document (facture / devis /
//! BL) editor. It contains all business logic as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Facture Editor Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Document-Editing Frontend                      │   │
//! │  │   Line grid ──► Summary panel ──► Footer "amount in words"     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ facture-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   line    │  │ document  │  │   words   │  │   │
//! │  │   │   Money   │  │ LineItem  │  │ Document  │  │ amount in │  │   │
//! │  │   │  TaxCalc  │  │  states   │  │ TVA split │  │  French   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Persistence API / PDF rendering (external)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TaxRate, Quantity, Unit, GlobalDiscount...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//! - [`line`] - Line item and its validation state machine
//! - [`document`] - The document and its totals engine
//! - [`words`] - Amount-in-words for the legal invoice footer
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Totals are a function of the lines - same input,
//!    same output, recomputed on every query
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centimes (i64), rates in
//!    basis points, quantities in thousandths - no float errors anywhere
//! 4. **Explicit Errors**: API misuse is typed; failed row validation is a
//!    reported state, never a thrown error
//!
//! ## Example Usage
//!
//! ```rust
//! use facture_core::{Document, GlobalDiscount, Money, Quantity, TaxRate};
//!
//! let mut doc = Document::new();
//! let id = doc.add_line().unwrap();
//!
//! let line = doc.line_mut(id).unwrap();
//! line.set_designation("Caisson bas 80cm").unwrap();
//! line.set_quantity(Quantity::from_units(2)).unwrap();
//! line.set_unit_price(Money::from_centimes(120_000)).unwrap(); // 1 200,00 DH
//! line.set_tax_rate(TaxRate::from_bps(2000)).unwrap();         // 20%
//!
//! doc.set_global_discount(GlobalDiscount::Percentage(1000)).unwrap(); // 10%
//!
//! let totals = doc.totals();
//! assert_eq!(totals.subtotal, Money::from_centimes(240_000));
//! assert_eq!(totals.net_ht, Money::from_centimes(216_000));
//! assert_eq!(totals.total_ttc, Money::from_centimes(259_200));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod line;
pub mod money;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use facture_core::Money` instead of
// `use facture_core::money::Money`

pub use document::{Document, DocumentTotals, TaxBracket};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line::{LineField, LineItem, LineState};
pub use money::Money;
pub use types::{CatalogEntry, GlobalDiscount, Quantity, TaxRate, Unit};
pub use words::amount_to_words;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The legal Moroccan TVA rates, in basis points: 0%, 7%, 10%, 14%, 20%.
///
/// ## Why a constant?
/// The editor's rate picker, the setter validation and the catalog all
/// agree on this one list. Making it configurable per tenant is a future
/// concern, not a v0.1 one.
pub const LEGAL_TVA_RATES_BPS: [u32; 5] = [0, 700, 1000, 1400, 2000];

/// The default TVA rate for a fresh line, in basis points (20%).
pub const DEFAULT_TVA_BPS: u32 = 2000;

/// Maximum lines allowed in a single document.
///
/// ## Business Reason
/// A facture is entered by hand: tens of lines, never thousands. The cap
/// keeps runaway documents out of the persistence layer and the PDF.
pub const MAX_DOCUMENT_LINES: usize = 100;
