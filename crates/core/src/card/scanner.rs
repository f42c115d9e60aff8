use crate::card::types::{MarkerKind, MarkerNames};
use crate::document::{Node, NodePath};

/// A marker found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    pub path: NodePath,
    pub kind: MarkerKind,
}

/// Collect every marker element in depth-first document order.
///
/// The tree is only read here; replacement happens afterwards so paths stay
/// valid. Markers are not descended into.
pub fn scan(tree: &Node, names: &MarkerNames) -> Vec<MarkerMatch> {
    let mut found = Vec::new();
    let mut path = Vec::new();
    visit(tree, names, &mut path, &mut found);
    found
}

fn visit(node: &Node, names: &MarkerNames, path: &mut NodePath, found: &mut Vec<MarkerMatch>) {
    if let Some(kind) = node.as_element().and_then(|el| names.kind_of(&el.tag_name)) {
        found.push(MarkerMatch { path: path.clone(), kind });
        return;
    }

    for (idx, child) in node.children().iter().enumerate() {
        path.push(idx);
        visit(child, names, path, found);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;

    fn marker(id: &str) -> Node {
        Element::new("steam-game").with_property("appId", id).into()
    }

    #[test]
    fn finds_markers_in_document_order() {
        let tree = Node::root(vec![
            marker("1"),
            Element::new("section")
                .with_child(Element::new("p").with_text("text"))
                .with_child(marker("2"))
                .into(),
            Element::new("steamgame").with_property("appId", "3").into(),
            marker("4"),
        ]);

        let found = scan(&tree, &MarkerNames::default());
        let paths: Vec<_> = found.iter().map(|m| m.path.clone()).collect();
        assert_eq!(paths, vec![vec![0], vec![1, 1], vec![2], vec![3]]);
        assert_eq!(found[2].kind, MarkerKind::Directive);
        assert_eq!(found[0].kind, MarkerKind::Tag);
    }

    #[test]
    fn does_not_descend_into_markers() {
        let nested = Element::new("steam-game").with_child(marker("2"));
        let tree = Node::root(vec![nested.into()]);

        assert_eq!(scan(&tree, &MarkerNames::default()).len(), 1);
    }

    #[test]
    fn empty_when_no_markers() {
        let tree = Node::root(vec![Node::text("plain"), Node::raw("<p>x</p>")]);
        assert!(scan(&tree, &MarkerNames::default()).is_empty());
    }

    #[test]
    fn honours_custom_names() {
        let names = MarkerNames { tag: "game-card".into(), directive: "game".into() };
        let tree = Node::root(vec![
            marker("1"),
            Element::new("game-card").with_property("appId", "2").into(),
        ]);

        let found = scan(&tree, &names);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, vec![1]);
    }
}
