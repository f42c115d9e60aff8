//! Minimal hast-style document tree.
//!
//! The resolver works on this tree: markers are found by walking it, and
//! replaced through [`TreeEditor`] so each marker keeps its slot.

pub mod editor;
pub mod html;
pub mod types;

pub use editor::{EditError, NodePath, TreeEditor};
pub use html::to_html;
pub use types::{Element, Node, Properties};
