//! Port traits implemented by outbound adapters.

pub mod provider;
pub mod repository;

pub use provider::{FxProvider, ProviderError};
pub use repository::ConversionRepository;
