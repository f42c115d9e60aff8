use thiserror::Error;

use crate::document::types::{Element, Node};

/// Child-index path from the root to a node; the empty path is the root itself.
pub type NodePath = Vec<usize>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no node at path {0:?}")]
    NoSuchNode(NodePath),

    #[error("node at path {0:?} is not an element")]
    NotAnElement(NodePath),

    #[error("node at path {0:?} cannot have children")]
    NotAParent(NodePath),
}

/// In-place editing operations on a document tree.
pub trait TreeEditor {
    /// Resolve a path to a node.
    fn node_at(&self, path: &[usize]) -> Option<&Node>;

    /// Resolve a path to a mutable node.
    fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node>;

    /// Replace the element at `path` with `fragment`.
    ///
    /// The node keeps its slot in the tree; only its tag, properties and
    /// children are overwritten.
    fn replace(&mut self, path: &[usize], fragment: Element) -> Result<(), EditError>;

    /// Append a child to the root or element at `path`.
    fn append_child(&mut self, path: &[usize], child: Node) -> Result<(), EditError>;
}

impl TreeEditor for Node {
    fn node_at(&self, path: &[usize]) -> Option<&Node> {
        path.iter().try_fold(self, |node, &idx| node.children().get(idx))
    }

    fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &idx in path {
            node = node.children_mut()?.get_mut(idx)?;
        }
        Some(node)
    }

    fn replace(&mut self, path: &[usize], fragment: Element) -> Result<(), EditError> {
        let node = self.node_at_mut(path).ok_or_else(|| EditError::NoSuchNode(path.to_vec()))?;
        let el = node.as_element_mut().ok_or_else(|| EditError::NotAnElement(path.to_vec()))?;

        let Element { tag_name, properties, children } = fragment;
        el.tag_name = tag_name;
        el.properties = properties;
        el.children = children;
        Ok(())
    }

    fn append_child(&mut self, path: &[usize], child: Node) -> Result<(), EditError> {
        let node = self.node_at_mut(path).ok_or_else(|| EditError::NoSuchNode(path.to_vec()))?;
        let children =
            node.children_mut().ok_or_else(|| EditError::NotAParent(path.to_vec()))?;
        children.push(child);
        Ok(())
    }
}
