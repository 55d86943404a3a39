//! Scene Assembler - single hearts, galleries and animated hearts

use log::debug;

use crate::clip::Clip;
use crate::error::HeartError;
use crate::flag::{FlagSpec, StripeLayout};
use crate::geometry::{HeartOutline, LayoutTable};
use crate::ids::{random_id, IdAllocator};
use crate::markup;
use crate::node::Node;
use crate::shapes::{group, num, stylesheet, Animate, Frame, Label, ViewBox};

/// Gallery entries sit this far below their stored y coordinate.
pub const GALLERY_Y_OFFSET: f64 = 50.0;
pub const GALLERY_WIDTH: &str = "720";
pub const GALLERY_VIEW_BOX: ViewBox = ViewBox::new(250.0, 0.0, 675.0, 675.0);
pub const GALLERY_LABEL_Y: f64 = -20.0;

pub const FADE_BEGIN: &str = "6s";
pub const FADE_DURATION: &str = "3s";
pub const ANIMATION_HEIGHT: &str = "450";

const MASK_STROKE: &str = "red";

/// Ids used as CSS selectors or animation targets must start with a
/// letter; allocator output that does not is prefixed with `h`.
pub fn element_id(raw: &str) -> String {
    if raw.starts_with(|c: char| c.is_ascii_alphabetic()) {
        raw.to_string()
    } else {
        format!("h{raw}")
    }
}

fn dash_css(target_id: &str) -> String {
    format!(
        "#{target_id} {{
    stroke-dasharray: 400;
    stroke-dashoffset: 400;
    animation: dash 10s linear forwards;
    animation-delay: 2s
}}
@keyframes dash {{
    to {{
        stroke-dashoffset: 100;
    }}
}}"
    )
}

/// One-shot opacity fade that holds its final state.
pub fn fade_out() -> Node {
    let mut fade = Animate::new("opacity", "1", "0");
    fade.begin = FADE_BEGIN.into();
    fade.dur = FADE_DURATION.into();
    fade.fill = Some("freeze".into());
    fade.into()
}

pub struct SceneAssembler {
    outline: HeartOutline,
    stripes: StripeLayout,
}

impl SceneAssembler {
    pub fn new(outline: HeartOutline, stripes: StripeLayout) -> Self {
        Self { outline, stripes }
    }

    pub fn outline(&self) -> &HeartOutline {
        &self.outline
    }

    /// A clip region shaped like the heart, identified by `id`.
    pub fn heart_clip(&self, id: &str) -> Clip {
        let mask = self.outline.path(&format!("{id}-outline"), MASK_STROKE);
        Clip::new(id, vec![mask])
    }

    /// Flag banner clipped to the heart. Without an explicit id a fresh
    /// random one is used.
    pub fn heart_flag(&self, spec: &FlagSpec, id: Option<&str>) -> Node {
        let id = id.map_or_else(random_id, str::to_string);
        debug!(flag = spec.name.as_str(), clip_id = id.as_str(); "Assembling heart");
        let heart = self.heart_clip(&id);
        Frame::new(ViewBox::HEART)
            .child(heart.clipper())
            .child(heart.clip([spec.flag(self.stripes)]))
            .into()
    }

    pub fn encode_heart(&self, spec: &FlagSpec) -> Vec<u8> {
        markup::encode(&self.heart_flag(spec, None))
    }

    pub fn encode_flag(&self, spec: &FlagSpec) -> Vec<u8> {
        spec.encode(self.stripes)
    }

    /// All flags as labelled hearts, slot `i` taken from `coords[i]`.
    pub fn gallery(
        &self,
        specs: &[FlagSpec],
        coords: &LayoutTable,
        ids: &mut dyn IdAllocator,
    ) -> Result<Node, HeartError> {
        if specs.len() > coords.len() {
            return Err(HeartError::IndexExhaustion {
                flags: specs.len(),
                coords: coords.len(),
            });
        }

        let heart = self.heart_clip(&ids.next_id());
        let mut gallery = Frame::new(GALLERY_VIEW_BOX).child(heart.clipper());
        gallery.width = Some(GALLERY_WIDTH.into());

        for (spec, coord) in specs.iter().zip(&coords.heart_coords) {
            let mut entry = Frame::new(ViewBox::HEART)
                .child(Label::centered(spec.name.as_str(), GALLERY_LABEL_Y).into())
                .child(heart.clip([spec.flag(self.stripes)]));
            entry.x = Some(num(coord.x));
            entry.y = Some(num(coord.y.trunc() + GALLERY_Y_OFFSET));
            entry.height = Some("100px".into());
            entry.style = Some("overflow:visible".into());
            gallery = gallery.child(entry.into());
        }

        debug!(entries = specs.len(), clip_id = heart.id(); "Assembled gallery");
        Ok(gallery.into())
    }

    /// Stroked heart outline whose dash pattern draws itself in.
    pub fn animated_heart(&self, id: &str, stroke: &str) -> Node {
        let id = element_id(id);
        group([self.outline.path(&id, stroke), stylesheet(dash_css(&id))])
    }

    /// Clipped flag under an overlay of the flag plus the drawing outline,
    /// the overlay fading out once the outline is complete.
    pub fn animated_flag_heart(
        &self,
        spec: &FlagSpec,
        stroke: &str,
        ids: &mut dyn IdAllocator,
    ) -> Node {
        let heart = self.heart_clip(&ids.next_id());
        let outline_id = ids.next_id();
        let flag_id = element_id(&ids.next_id());
        let fade_id = element_id(&ids.next_id());

        let overlay = group([
            spec.flag_with(self.stripes, [("id", flag_id)]),
            self.animated_heart(&outline_id, stroke),
            fade_out().with_attr("id", fade_id),
        ]);

        let mut frame = Frame::new(ViewBox::HEART)
            .child(heart.clipper())
            .child(heart.clip([spec.flag(self.stripes)]))
            .child(overlay);
        frame.height = Some(ANIMATION_HEIGHT.into());
        frame.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;
    use crate::ids::{RandomIds, SequentialIds};
    use crate::node::Tag;

    fn assembler() -> SceneAssembler {
        let outline = HeartOutline {
            initial_point: [0.0, -16.0],
            quad_points: vec![[[-16.0, 0.0], [0.0, 10.0]], [[16.0, 0.0], [0.0, -16.0]]],
        };
        SceneAssembler::new(outline, StripeLayout::default())
    }

    fn spec(name: &str, colors: &[&str]) -> FlagSpec {
        FlagSpec::new(name, colors.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_heart_flag_explicit_id() {
        let node = assembler().heart_flag(&spec("bi", &["deeppink", "blue"]), Some("h"));
        let kids: Vec<_> = node.elements().collect();
        assert_eq!(kids[0].tag, Tag::ClipPath);
        assert_eq!(kids[0].id(), Some("h"));
        assert_eq!(kids[1].attr("style"), Some("clip-path:url(#h)"));
        assert_eq!(kids[1].find_all(&Tag::Rect).len(), 2);
        assert_eq!(node.attr("viewBox"), Some("-25 -25 50 50"));
    }

    #[test]
    fn test_gallery_single_slot_offsets_y() {
        let coords = LayoutTable {
            heart_coords: vec![Coord { x: 10.0, y: 20.0 }],
        };
        let mut ids = SequentialIds::new("g");
        let node = assembler()
            .gallery(&[spec("pride", &["red"])], &coords, &mut ids)
            .unwrap();
        let entries: Vec<_> = node.elements().filter(|n| n.tag == Tag::Svg).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].attr("x"), Some("10"));
        assert_eq!(entries[0].attr("y"), Some("70"));
        assert_eq!(entries[0].find_all(&Tag::Text)[0].text(), "pride");
        assert_eq!(node.attr("width"), Some("720"));
        assert_eq!(node.attr("viewBox"), Some("250 0 675 675"));
    }

    #[test]
    fn test_gallery_shares_one_clip() {
        let coords = LayoutTable {
            heart_coords: vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 100.0, y: 7.9 }],
        };
        let mut ids = SequentialIds::new("g");
        let node = assembler()
            .gallery(&[spec("a", &["red"]), spec("b", &["blue"])], &coords, &mut ids)
            .unwrap();
        assert_eq!(node.find_all(&Tag::ClipPath).len(), 1);
        let styles: Vec<_> = node
            .find_all(&Tag::Group)
            .into_iter()
            .filter_map(|g| g.attr("style"))
            .collect();
        assert_eq!(styles, vec!["clip-path:url(#g-0)", "clip-path:url(#g-0)"]);
        let second = node.elements().filter(|n| n.tag == Tag::Svg).nth(1).unwrap();
        assert_eq!(second.attr("y"), Some("57"));
    }

    #[test]
    fn test_gallery_index_exhaustion() {
        let coords = LayoutTable {
            heart_coords: vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }],
        };
        let flags = [spec("a", &["red"]), spec("b", &["red"]), spec("c", &["red"])];
        let err = assembler()
            .gallery(&flags, &coords, &mut SequentialIds::default())
            .unwrap_err();
        assert!(matches!(err, HeartError::IndexExhaustion { flags: 3, coords: 2 }));
    }

    #[test]
    fn test_animation_timing() {
        let mut ids = SequentialIds::new("a");
        let node = assembler().animated_flag_heart(&spec("trans", &["lightpink"]), "grey", &mut ids);
        assert_eq!(node.attr("height"), Some("450"));
        let fades = node.find_all(&Tag::Animate);
        assert_eq!(fades.len(), 1);
        let fade = fades[0];
        assert_eq!(fade.attr("attributeName"), Some("opacity"));
        assert_eq!(fade.attr("begin"), Some("6s"));
        assert_eq!(fade.attr("dur"), Some("3s"));
        assert_eq!(fade.attr("fill"), Some("freeze"));
        assert_eq!(fade.attr("to"), Some("0"));
        assert!(fade.attr("repeatCount").is_none());
    }

    #[test]
    fn test_animation_ids_are_distinct_and_styled() {
        let mut ids = SequentialIds::new("a");
        let node = assembler().animated_flag_heart(&spec("trans", &["lightpink"]), "grey", &mut ids);
        let outline = node.find_by_id("a-1").unwrap();
        assert_eq!(outline.attr("stroke"), Some("grey"));
        assert!(node.find_by_id("a-2").is_some());
        let css = node.find_all(&Tag::Style)[0].text();
        assert!(css.starts_with("#a-1 {"));
        assert!(css.contains("animation: dash 10s linear forwards"));
        assert!(css.contains("animation-delay: 2s"));
        assert_eq!(node.find_all(&Tag::Animate)[0].id(), Some("a-3"));
    }

    #[test]
    fn test_random_ids_make_valid_selectors() {
        let assembler = assembler();
        let spec = spec("trans", &["lightpink"]);
        for _ in 0..500 {
            let node = assembler.animated_flag_heart(&spec, "grey", &mut RandomIds);
            let css = node.find_all(&Tag::Style)[0].text();
            let selector = css.split_whitespace().next().unwrap();
            assert!(selector[1..].starts_with(|c: char| c.is_ascii_alphabetic()), "{selector}");
            assert!(node.find_by_id(&selector[1..]).is_some());
            let fade_id = node.find_all(&Tag::Animate)[0].id().unwrap();
            assert!(fade_id.starts_with(|c: char| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_element_id_prefixes_leading_digit() {
        assert_eq!(element_id("3fa0"), "h3fa0");
        assert_eq!(element_id("fa03"), "fa03");
        assert_eq!(element_id("-x"), "h-x");
    }

    #[test]
    fn test_gallery_huge_y_does_not_overflow() {
        let coords = LayoutTable {
            heart_coords: vec![Coord { x: 0.0, y: 1e19 }],
        };
        let node = assembler()
            .gallery(&[spec("pride", &["red"])], &coords, &mut SequentialIds::default())
            .unwrap();
        let entry = node.elements().find(|n| n.tag == Tag::Svg).unwrap();
        let y: f64 = entry.attr("y").unwrap().parse().unwrap();
        assert_eq!(y, 1e19 + 50.0);
    }
}
