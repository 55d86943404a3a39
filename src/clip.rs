//! Clip Composer
//!
//! A [`Clip`] pairs mask shapes with an identifier. The definition node
//! and every wrapper refer to the mask by that identifier, so it must be
//! unique within the final document. Collisions are not detected.

use crate::node::{Node, Tag};
use crate::shapes::{group, Frame, ViewBox};

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    id: String,
    shapes: Vec<Node>,
}

impl Clip {
    pub fn new(id: impl Into<String>, shapes: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            shapes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw mask shapes, for drawing outlines.
    pub fn shapes(&self) -> &[Node] {
        &self.shapes
    }

    /// `clipPath` definition carrying the identifier.
    pub fn clipper(&self) -> Node {
        Node::new(Tag::ClipPath)
            .with_attr("id", self.id.clone())
            .with_children(self.shapes.iter().cloned())
    }

    pub fn style(&self) -> String {
        format!("clip-path:url(#{})", self.id)
    }

    /// Group restricting `targets` to the mask.
    pub fn clip(&self, targets: impl IntoIterator<Item = Node>) -> Node {
        group(targets).with_attr("style", self.style())
    }

    /// Preview frame: the targets, clipped or not, and optionally the mask
    /// edge drawn over them. The definition is included when clipping.
    pub fn show(&self, targets: Vec<Node>, edge: bool, clip: bool) -> Node {
        let mut frame = Frame::new(ViewBox::HEART);
        if clip {
            frame = frame.child(self.clipper()).child(self.clip(targets));
        } else {
            frame = frame.children(targets);
        }
        if edge {
            frame = frame.children(self.shapes.iter().cloned());
        }
        frame.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Circle;

    fn mask() -> Clip {
        Clip::new("c1", vec![Circle::new(0.0, 0.0, 10.0).into()])
    }

    #[test]
    fn test_clipper_references_id() {
        let clipper = mask().clipper();
        assert_eq!(clipper.tag, Tag::ClipPath);
        assert_eq!(clipper.id(), Some("c1"));
        assert_eq!(clipper.elements().count(), 1);
    }

    #[test]
    fn test_clip_wraps_targets() {
        let wrapped = mask().clip(vec![Node::new(Tag::Rect)]);
        assert_eq!(wrapped.tag, Tag::Group);
        assert_eq!(wrapped.attr("style"), Some("clip-path:url(#c1)"));
        assert_eq!(wrapped.elements().next().unwrap().tag, Tag::Rect);
    }

    #[test]
    fn test_show_edge_without_clip() {
        let frame = mask().show(vec![Node::new(Tag::Rect)], true, false);
        let kids: Vec<_> = frame.elements().map(|n| n.tag.clone()).collect();
        assert_eq!(kids, vec![Tag::Rect, Tag::Circle]);
    }

    #[test]
    fn test_show_clipped_without_edge() {
        let frame = mask().show(vec![Node::new(Tag::Rect)], false, true);
        let kids: Vec<_> = frame.elements().map(|n| n.tag.clone()).collect();
        assert_eq!(kids, vec![Tag::ClipPath, Tag::Group]);
    }
}
