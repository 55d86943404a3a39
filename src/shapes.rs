//! Shape Primitive Builder
//!
//! Typed records for each element kind this crate draws. Every record turns
//! into a [`Node`] through `From`; typed fields are written first and the
//! `extra` pairs after them, so an extra can override a typed attribute.

use std::fmt;

use crate::node::{Node, Tag};

/// `[x, y]`, the layout used by the geometry files.
pub type Point = [f64; 2];

/// A quadratic segment: control point, then end point.
pub type Quad = [Point; 2];

/// Format a number the way it appears in markup (`10`, `-2.5`).
pub fn num(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    value.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Units(f64),
    Percent(f64),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Units(v) => write!(f, "{}", num(*v)),
            Length::Percent(v) => write!(f, "{}%", num(*v)),
        }
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Length::Units(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// The square every single heart or flag is drawn in.
    pub const HEART: ViewBox = ViewBox {
        min_x: -25.0,
        min_y: -25.0,
        width: 50.0,
        height: 50.0,
    };

    pub const fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self { min_x, min_y, width, height }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            num(self.min_x),
            num(self.min_y),
            num(self.width),
            num(self.height)
        )
    }
}

type Extra = Vec<(String, String)>;

fn finish(node: Node, extra: Extra) -> Node {
    node.with_attrs(extra)
}

fn set_opt(node: Node, key: &str, value: Option<String>) -> Node {
    match value {
        Some(v) => node.with_attr(key, v),
        None => node,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub extra: Extra,
}

impl Rect {
    pub fn new(
        x: impl Into<Length>,
        y: impl Into<Length>,
        width: impl Into<Length>,
        height: impl Into<Length>,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            width: width.into(),
            height: height.into(),
            fill: None,
            stroke: None,
            extra: vec![],
        }
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(color.into());
        self
    }
}

impl From<Rect> for Node {
    fn from(rect: Rect) -> Self {
        let node = Node::new(Tag::Rect)
            .with_attr("x", rect.x.to_string())
            .with_attr("y", rect.y.to_string())
            .with_attr("width", rect.width.to_string())
            .with_attr("height", rect.height.to_string());
        let node = set_opt(node, "fill", rect.fill);
        let node = set_opt(node, "stroke", rect.stroke);
        finish(node, rect.extra)
    }
}

/// Path data for a closed curve: `M x,y Qcx,cy x,y ... Z`.
pub fn quad_path_data(start: Point, quads: &[Quad]) -> String {
    let mut data = format!("M{},{}", num(start[0]), num(start[1]));
    for [control, end] in quads {
        data.push_str(&format!(
            " Q{},{} {},{}",
            num(control[0]),
            num(control[1]),
            num(end[0]),
            num(end[1])
        ));
    }
    data.push_str(" Z");
    data
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurvePath {
    pub start: Point,
    pub quads: Vec<Quad>,
    pub id: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<String>,
    pub transform: Option<String>,
    pub extra: Extra,
}

impl CurvePath {
    pub fn new(start: Point, quads: Vec<Quad>) -> Self {
        Self {
            start,
            quads,
            id: None,
            fill: None,
            stroke: None,
            stroke_width: None,
            transform: None,
            extra: vec![],
        }
    }

    pub fn data(&self) -> String {
        quad_path_data(self.start, &self.quads)
    }
}

impl From<CurvePath> for Node {
    fn from(path: CurvePath) -> Self {
        let d = path.data();
        let node = set_opt(Node::new(Tag::Path), "id", path.id);
        let node = set_opt(node, "fill", path.fill);
        let node = set_opt(node, "stroke", path.stroke);
        let node = node.with_attr("d", d);
        let node = set_opt(node, "transform", path.transform);
        let node = set_opt(node, "stroke-width", path.stroke_width);
        finish(node, path.extra)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub content: String,
    pub x: Option<Length>,
    pub y: Option<Length>,
    pub anchor: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub fill: Option<String>,
    pub extra: Extra,
}

impl Label {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            x: None,
            y: None,
            anchor: None,
            font_family: None,
            font_size: None,
            fill: None,
            extra: vec![],
        }
    }

    /// Centered label in the face used across the gallery.
    pub fn centered(content: impl Into<String>, y: f64) -> Self {
        Self {
            y: Some(Length::Units(y)),
            anchor: Some("middle".into()),
            font_family: Some("Minion Pro".into()),
            font_size: Some("15".into()),
            ..Self::new(content)
        }
    }
}

impl From<Label> for Node {
    fn from(label: Label) -> Self {
        let node = set_opt(Node::new(Tag::Text), "x", label.x.map(|v| v.to_string()));
        let node = set_opt(node, "y", label.y.map(|v| v.to_string()));
        let node = set_opt(node, "fill", label.fill);
        let node = set_opt(node, "text-anchor", label.anchor);
        let node = set_opt(node, "font-family", label.font_family);
        let node = set_opt(node, "font-size", label.font_size);
        finish(node, label.extra).with_child(label.content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<String>,
    pub extra: Extra,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self {
            cx,
            cy,
            r,
            fill: None,
            stroke: None,
            stroke_width: None,
            extra: vec![],
        }
    }
}

impl From<Circle> for Node {
    fn from(circle: Circle) -> Self {
        let node = Node::new(Tag::Circle)
            .with_attr("cx", num(circle.cx))
            .with_attr("cy", num(circle.cy))
            .with_attr("r", num(circle.r));
        let node = set_opt(node, "fill", circle.fill);
        let node = set_opt(node, "stroke", circle.stroke);
        let node = set_opt(node, "stroke-width", circle.stroke_width);
        finish(node, circle.extra)
    }
}

/// Root `svg` element with the namespace attributes every output carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view_box: ViewBox,
    pub x: Option<String>,
    pub y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub style: Option<String>,
    pub children: Vec<Node>,
    pub extra: Extra,
}

impl Frame {
    pub fn new(view_box: ViewBox) -> Self {
        Self {
            view_box,
            x: None,
            y: None,
            width: None,
            height: None,
            style: None,
            children: vec![],
            extra: vec![],
        }
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }
}

impl From<Frame> for Node {
    fn from(frame: Frame) -> Self {
        let node = set_opt(Node::new(Tag::Svg), "x", frame.x);
        let node = set_opt(node, "y", frame.y);
        let node = set_opt(node, "width", frame.width);
        let node = set_opt(node, "height", frame.height);
        let node = set_opt(node, "style", frame.style);
        let node = node
            .with_attr("viewBox", frame.view_box.to_string())
            .with_attr("version", "1.1")
            .with_attr("baseProfile", "full")
            .with_attr("xmlns", "http://www.w3.org/2000/svg")
            .with_attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
            .with_attr("xml:space", "preserve");
        finish(node, frame.extra).with_children(frame.children)
    }
}

/// SMIL `animate` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Animate {
    pub id: Option<String>,
    pub attribute_name: String,
    pub from: String,
    pub to: String,
    pub begin: String,
    pub dur: String,
    pub fill: Option<String>,
    pub repeat_count: Option<String>,
    pub extra: Extra,
}

impl Animate {
    pub fn new(attribute_name: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: None,
            attribute_name: attribute_name.into(),
            from: from.into(),
            to: to.into(),
            begin: "0s".into(),
            dur: "1s".into(),
            fill: None,
            repeat_count: None,
            extra: vec![],
        }
    }
}

impl From<Animate> for Node {
    fn from(anim: Animate) -> Self {
        let node = set_opt(Node::new(Tag::Animate), "id", anim.id);
        let node = node
            .with_attr("attributeName", anim.attribute_name)
            .with_attr("dur", anim.dur)
            .with_attr("begin", anim.begin);
        let node = set_opt(node, "fill", anim.fill);
        let node = set_opt(node, "repeatCount", anim.repeat_count);
        let node = node.with_attr("from", anim.from).with_attr("to", anim.to);
        finish(node, anim.extra)
    }
}

pub fn group(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(Tag::Group).with_children(children)
}

pub fn stylesheet(css: impl Into<String>) -> Node {
    Node::new(Tag::Style).with_child(css.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_percent_lengths() {
        let node: Node = Rect::new(-25.0, Length::Percent(-31.5), 50.0, Length::Percent(14.6))
            .fill("red")
            .stroke("red")
            .into();
        assert_eq!(node.attr("x"), Some("-25"));
        assert_eq!(node.attr("y"), Some("-31.5%"));
        assert_eq!(node.attr("height"), Some("14.6%"));
        assert_eq!(node.attr("fill"), Some("red"));
    }

    #[test]
    fn test_path_closes_explicitly() {
        let data = quad_path_data([0.0, -16.0], &[[[-10.0, -8.0], [-16.0, 2.0]]]);
        assert_eq!(data, "M0,-16 Q-10,-8 -16,2 Z");
    }

    #[test]
    fn test_empty_curve_is_degenerate_not_error() {
        let node: Node = CurvePath::new([1.0, 2.0], vec![]).into();
        assert_eq!(node.attr("d"), Some("M1,2 Z"));
    }

    #[test]
    fn test_extra_overrides_typed_field() {
        let mut circle = Circle::new(0.0, 2.0, 5.0);
        circle.fill = Some("transparent".into());
        circle.extra.push(("fill".into(), "none".into()));
        let node: Node = circle.into();
        assert_eq!(node.attr("fill"), Some("none"));
        assert_eq!(node.attr("cy"), Some("2"));
    }

    #[test]
    fn test_label_carries_content() {
        let node: Node = Label::centered("pride", -20.0).into();
        assert_eq!(node.text(), "pride");
        assert_eq!(node.attr("text-anchor"), Some("middle"));
        assert_eq!(node.attr("font-size"), Some("15"));
        assert_eq!(node.attr("y"), Some("-20"));
    }

    #[test]
    fn test_frame_namespace_attributes() {
        let node: Node = Frame::new(ViewBox::HEART).into();
        assert_eq!(node.tag, Tag::Svg);
        assert_eq!(node.attr("viewBox"), Some("-25 -25 50 50"));
        assert_eq!(node.attr("xmlns"), Some("http://www.w3.org/2000/svg"));
        assert_eq!(node.attr("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_negative_zero_formats_plain() {
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(1.25), "1.25");
    }
}
