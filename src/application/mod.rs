//! Application layer: diagram composition and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod composer;
pub mod error;
pub mod error_ext;
pub mod services;

pub use composer::{ComposeStats, DiagramComposer};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
