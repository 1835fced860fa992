//! # tenure-benefits
//!
//! Benefit-sharing agreements between a company and a community for an
//! activity on a territory, and the payments made under them.
//!
//! ## Lifecycle
//!
//! An agreement is created active and can be ended once by the
//! administrator. Ending is terminal: payments are accepted only while the
//! agreement is active. Ending an already ended agreement succeeds again and
//! moves `end_height` to the latest call.
//!
//! ## Storage
//!
//! Payments live in one flat table keyed by `(AgreementId, PaymentId)`.
//! Each agreement carries its own payment sequence, so payment ids restart
//! at 1 for every agreement and never skip a value.

#![deny(unsafe_code)]

pub mod ledger;
pub mod types;

pub use ledger::BenefitLedger;
pub use types::{Agreement, AgreementTerms, LedgerStatistics, Payment};
