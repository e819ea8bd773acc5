//! # Converter Hex
//!
//! Conversion engine and adapters for the currency converter.
//!
//! ## Architecture
//!
//! - `normalize` / `calculator` - pure amount handling and triangulation
//! - `repository` - the single owned, replace-only rate table
//! - `selection` - user selection and derived converted amount
//! - `service` - application service (fetch lifecycle + consumer operations)
//! - `outbound/` - rate source adapters (remote provider, static seed)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `S: RateSource`, allowing
//! different rate sources to be injected.

pub mod calculator;
pub mod inbound;
pub mod normalize;
pub mod outbound;
pub mod repository;
pub mod selection;
pub mod service;


pub use calculator::convert;
pub use normalize::{normalize, parse_amount};
pub use repository::RateRepository;
pub use selection::SelectionState;
pub use service::{ConverterService, ConverterSettings};
