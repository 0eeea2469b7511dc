//! Domain layer: outline tree, colors and styles
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod color;
pub mod error;
pub mod style;

pub use arena::{NodeData, OutlineTree, StyleData, TreeNode, ROOT_ID};
pub use builder::TreeBuilder;
pub use color::{adjust_brightness, brightness_offset, Palette, DEFAULT_COLORS};
pub use error::DomainError;
pub use style::NodeStyle;
