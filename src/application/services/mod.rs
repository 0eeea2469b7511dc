//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, DiagramEngine)
//! but are themselves concrete structs, not traits.

mod mindmap;

pub use mindmap::{GenerateOptions, GenerateOutput, MindMapService};
