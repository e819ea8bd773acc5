//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! invariants, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, RateTable, FetchState)
//! - `ports/` - Trait definitions that rate source adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, fetch, conversion and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyCode, FetchState, RateTable};
pub use dto::*;
pub use error::{AppError, ConvertError, DomainError, FetchError};
pub use ports::RateSource;
