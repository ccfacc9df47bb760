//! Core business logic for Moneta.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain calculations and policies live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing
//! - `ledger` - Transaction kinds, balance effects, and the edit-window policy
//! - `summary` - Read-side aggregation math (category breakdown, periods, chart buckets)

pub mod auth;
pub mod ledger;
pub mod summary;
