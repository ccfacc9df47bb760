//! Shared types and configuration for Moneta.
//!
//! This crate provides common pieces used across all other crates:
//! - Configuration management (files + `MONETA__*` environment variables)
//! - Bearer-token issuance and verification, including the claim type
//! - Request/response payloads for the auth endpoints

pub mod auth;
pub mod config;
pub mod jwt;

pub use config::AppConfig;
pub use jwt::{Claims, JwtError, JwtService};
