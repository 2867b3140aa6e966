//! # FX Hex
//!
//! Application service layer and HTTP adapter for the foreign exchange
//! service.
//!
//! ## Architecture
//!
//! - `service/` - Application services (orchestrate the provider and store)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The services are generic over `R: ConversionRepository` and
//! `P: FxProvider`, allowing different adapter implementations to be
//! injected.

pub mod inbound;
mod openapi;
pub mod service;


pub use service::{ConversionService, RateService};
