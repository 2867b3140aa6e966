//! # FX Types
//!
//! Domain types and port traits for the foreign exchange service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (ConversionRecord, RateTable)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Application and repository error types
//! - `time/` - Epoch and display-format helpers

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod time;

// Re-export commonly used types
pub use domain::{ConversionId, ConversionRecord, NewConversion, RateTable};
pub use dto::*;
pub use error::{AppError, RepoError, THIRD_PARTY_ERROR_PREFIX};
pub use ports::{ConversionRepository, FxProvider, ProviderError};
