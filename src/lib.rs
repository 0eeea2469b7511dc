//! Create draw.io mind map diagrams from indented text files.
//!
//! Pipeline: outline text → [`domain::TreeBuilder`] → [`domain::OutlineTree`]
//! → [`application::DiagramComposer`] → [`infrastructure::traits::DiagramEngine`]
//! (the draw.io document in [`infrastructure::DrawioDiagram`]).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
