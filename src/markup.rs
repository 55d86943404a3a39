//! SVG markup rendering for drawing trees.

use svg::node::element::Element;
use svg::node::Text as CharData;
use svg::Node as _;

use crate::node::{Child, Node};

/// Convert a drawing tree into an `svg` crate element.
pub fn to_element(node: &Node) -> Element {
    let mut element = Element::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        element.assign(key.clone(), value.clone());
    }
    for child in &node.children {
        match child {
            Child::Node(inner) => element.append(to_element(inner)),
            Child::Text(text) => element.append(CharData::new(text.clone())),
        }
    }
    element
}

pub fn to_markup(node: &Node) -> String {
    to_element(node).to_string()
}

/// UTF-8 markup bytes, the form handed to rasterizers.
pub fn encode(node: &Node) -> Vec<u8> {
    to_markup(node).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Tag;

    #[test]
    fn test_markup_nests_children_in_order() {
        let node = Node::new(Tag::Group)
            .with_attr("id", "g1")
            .with_child(Node::new(Tag::Rect).with_attr("fill", "red"))
            .with_child(Node::new(Tag::Circle).with_attr("r", "2"));
        let markup = to_markup(&node);
        assert!(markup.starts_with("<g id=\"g1\">"));
        let rect = markup.find("<rect").unwrap();
        let circle = markup.find("<circle").unwrap();
        assert!(rect < circle);
        assert!(markup.trim_end().ends_with("</g>"));
    }

    #[test]
    fn test_text_content_is_emitted() {
        let node = Node::new(Tag::Text).with_attr("y", "4.5").with_child("π");
        let markup = to_markup(&node);
        assert!(markup.contains("π"));
        assert!(markup.contains("y=\"4.5\""));
    }

    #[test]
    fn test_camel_case_tag_survives() {
        let node = Node::new(Tag::ClipPath).with_attr("id", "c");
        assert!(to_markup(&node).starts_with("<clipPath"));
    }
}
