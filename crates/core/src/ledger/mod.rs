//! Transaction ledger logic.
//!
//! This module implements the balance-consistency rules:
//! - Transaction kinds and their signed balance effects
//! - The 12-hour edit-window policy
//!
//! The persistence layer applies these as atomic increments; the math here is
//! what makes apply/reverse pairs cancel exactly.

pub mod effect;
pub mod policy;
pub mod types;

pub use effect::{balance_effect, reversal_effect};
pub use policy::{EDIT_WINDOW_HOURS, is_within_edit_window};
pub use types::TransactionKind;
