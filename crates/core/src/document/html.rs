use crate::document::types::{Element, Node};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize a document tree to HTML.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Root { children } => {
            for child in children {
                write_node(child, out);
            }
        }
        Node::Element(el) => write_element(el, out),
        Node::Text { value } => out.push_str(&escape_text(value)),
        Node::Comment { value } => {
            out.push_str("<!--");
            out.push_str(&escape_comment(value));
            out.push_str("-->");
        }
        Node::Raw { value } => out.push_str(value),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag_name);

    for (name, value) in &el.properties {
        out.push(' ');
        out.push_str(attribute_name(name));
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag_name.to_ascii_lowercase().as_str()) {
        return;
    }

    for child in &el.children {
        write_node(child, out);
    }

    out.push_str("</");
    out.push_str(&el.tag_name);
    out.push('>');
}

/// hast property names that differ from their HTML attribute.
fn attribute_name(property: &str) -> &str {
    match property {
        "className" => "class",
        "htmlFor" => "for",
        "httpEquiv" => "http-equiv",
        "acceptCharset" => "accept-charset",
        other => other,
    }
}

pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

pub fn escape_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Comment text that cannot close or nest the comment it sits in: `--` is
/// broken up, and a leading `>`/`->` or trailing `-` is padded.
pub fn escape_comment(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch == '-' && out.ends_with('-') {
            out.push(' ');
        }
        out.push(ch);
    }
    if out.starts_with('>') || out.starts_with("->") {
        out.insert(0, ' ');
    }
    if out.ends_with('-') || out.ends_with("<!") {
        out.push(' ');
    }
    out.replace("<!-", "<! -")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_elements() {
        let tree = Node::root(vec![
            Element::new("a")
                .with_property("href", "https://example.com/?a=1&b=2")
                .with_property("className", "card")
                .with_child(Element::new("img").with_property("src", "x.png"))
                .with_text("Tom & \"Jerry\" <3")
                .into(),
            Node::raw("<p>raw</p>\n"),
        ]);

        assert_eq!(
            to_html(&tree),
            "<a class=\"card\" href=\"https://example.com/?a=1&amp;b=2\"><img src=\"x.png\">\
             Tom &amp; \"Jerry\" &lt;3</a><p>raw</p>\n"
        );
    }

    #[test]
    fn empty_values_render_as_boolean_attributes() {
        let el = Element::new("script").with_property("defer", "");
        assert_eq!(to_html(&el.into()), "<script defer></script>");
    }

    #[test]
    fn comments_cannot_break_out() {
        let tree = Node::root(vec![
            Node::Comment { value: " x --><script>alert(1)</script><!-- ".to_string() },
            Node::Comment { value: "->a-".to_string() },
        ]);

        let html = to_html(&tree);

        assert_eq!(html.matches("-->").count(), 2);
        assert_eq!(html.matches("<!--").count(), 2);
        assert_eq!(
            html,
            "<!-- x - -><script>alert(1)</script><! - - --><!-- ->a- -->"
        );
    }
}
