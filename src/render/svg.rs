//! SVG output for a drawn dendrogram.

use super::ids::next_markup_id;
use crate::interaction::IndexSet;
use crate::layout::{Bracket, Point};
use crate::transform::CoordinateTransform;

/// Path data for a drawing-space bracket.
pub fn bracket_path(bracket: &Bracket) -> String {
    let [bl, tl, tr, br] = bracket.corners();
    format!(
        "M{} {} L{} {} L{} {} L{} {}",
        bl.x, bl.y, tl.x, tl.y, tr.x, tr.y, br.x, br.y
    )
}

/// Path data for a straight line.
pub fn line_path(from: Point, to: Point) -> String {
    format!("M{} {} L{} {}", from.x, from.y, to.x, to.y)
}

/// Drawing-space selection markers: a short segment under each selected
/// leaf, `width` leaf units wide. Indices outside `0..leaf_count` are skipped.
pub fn selection_markers(
    selected: &IndexSet,
    leaf_count: usize,
    width: f64,
    transform: &CoordinateTransform,
) -> Vec<(Point, Point)> {
    let half = width / 2.0;
    selected
        .range(..leaf_count)
        .map(|&leaf| {
            let x = leaf as f64;
            (
                transform.apply(Point::new(x - half, 0.0)),
                transform.apply(Point::new(x + half, 0.0)),
            )
        })
        .collect()
}

/// Everything needed to emit one dendrogram `<svg>` element.
#[derive(Debug, Clone, Copy)]
pub struct SvgScene<'a> {
    /// Brackets in drawing space and draw order.
    pub brackets: &'a [Bracket],
    /// Entry indices rendered with the `hovered` class.
    pub hovered: &'a [usize],
    /// Entry indices rendered with the `selected` class.
    pub selected: &'a [usize],
    pub markers: &'a [(Point, Point)],
    pub view_box: &'a str,
}

/// Render the scene as an SVG document fragment.
pub fn render_svg(scene: &SvgScene<'_>) -> String {
    let clip_id = next_markup_id("dendrogram-clip");
    let mut out = String::new();

    out.push_str(&format!(
        r#"<svg width="100%" height="100%" viewBox="{}" preserveAspectRatio="none">"#,
        scene.view_box
    ));
    out.push_str(&format!(
        r#"<defs><clipPath id="{clip_id}"><rect x="0" y="0" width="100%" height="100%"/></clipPath></defs>"#
    ));
    out.push_str(&format!(r#"<g clip-path="url(#{clip_id})">"#));

    for bracket in scene.brackets {
        let mut class = String::from("dendrogram-path");
        if scene.hovered.contains(&bracket.index) {
            class.push_str(" hovered");
        }
        if scene.selected.contains(&bracket.index) {
            class.push_str(" selected");
        }
        out.push_str(&format!(
            r#"<path class="{class}" data-index="{}" d="{}"/>"#,
            bracket.index,
            bracket_path(bracket)
        ));
    }

    for &(from, to) in scene.markers {
        out.push_str(&format!(
            r#"<path class="selection-marker" d="{}"/>"#,
            line_path(from, to)
        ));
    }

    out.push_str("</g></svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DendrogramLayout;
    use crate::linkage::{Linkage, LinkageEntry};
    use crate::transform::{Side, Viewbox};

    fn scenario() -> DendrogramLayout {
        DendrogramLayout::compute(&Linkage::List(vec![
            LinkageEntry::leaves(0, 1, 1.0),
            LinkageEntry::new(0, true, 2, false, 2.0),
        ]))
        .unwrap()
    }

    #[test]
    fn test_bracket_path() {
        let layout = scenario();
        assert_eq!(bracket_path(&layout.brackets()[0]), "M0.5 1 L0.5 2 L2 2 L2 0");
    }

    #[test]
    fn test_top_side_path() {
        let layout = scenario();
        let transform = CoordinateTransform::new(
            Side::Top,
            Viewbox {
                width: 3.0,
                height: 2.0,
            },
            0.5,
            0.0,
        );
        let drawn = transform.apply_bracket(&layout.brackets()[1]);
        assert_eq!(bracket_path(&drawn), "M0.5 2 L0.5 1 L1.5 1 L1.5 2");
    }

    #[test]
    fn test_selection_markers() {
        let transform = CoordinateTransform::unshifted(Side::Bottom, Viewbox::default());
        let selected: IndexSet = [1, 7].into_iter().collect();
        let markers = selection_markers(&selected, 3, 0.5, &transform);
        assert_eq!(
            markers,
            vec![(Point::new(0.75, 0.0), Point::new(1.25, 0.0))]
        );
    }

    #[test]
    fn test_render_svg_classes() {
        let layout = scenario();
        let svg = render_svg(&SvgScene {
            brackets: layout.brackets(),
            hovered: &[0],
            selected: &[0, 1],
            markers: &[],
            view_box: "0 0 3 2",
        });

        assert!(svg.starts_with(r#"<svg width="100%" height="100%" viewBox="0 0 3 2""#));
        assert!(svg.contains(r#"<path class="dendrogram-path selected" data-index="1""#));
        assert!(svg.contains(r#"<path class="dendrogram-path hovered selected" data-index="0""#));
        assert!(svg.ends_with("</g></svg>"));
    }
}
