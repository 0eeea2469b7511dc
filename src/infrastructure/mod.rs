//! Infrastructure layer: I/O implementations, draw.io engine and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod drawio;
pub mod error;
pub mod traits;

pub use drawio::DrawioDiagram;
pub use error::{InfraError, InfraResult};
