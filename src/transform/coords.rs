//! Engine space → drawing space.
//!
//! The dendrogram is laid out with leaves along x and height along y. Each
//! side rotates or reflects that so leaves line up with the grid edge and the
//! tree grows away from it:
//! - top: height grows upward
//! - bottom: height grows downward
//! - left: axes swapped, height grows leftward
//! - right: axes swapped, height grows rightward

use super::side::Side;
use crate::layout::{Bracket, Point};

/// Drawing extents of a dendrogram panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewbox {
    pub width: f64,
    pub height: f64,
}

impl Viewbox {
    /// Viewbox for a laid-out dendrogram.
    ///
    /// The draw size is the dendrogram size plus a shift on both ends of
    /// each axis; vertical sides swap the axes.
    pub fn for_dendrogram(
        dendrogram_width: f64,
        dendrogram_height: f64,
        side: Side,
        x_shift: f64,
        y_shift: f64,
    ) -> Self {
        let draw_width = dendrogram_width + 2.0 * x_shift;
        let draw_height = dendrogram_height + 2.0 * y_shift;
        if side.is_horizontal() {
            Self {
                width: draw_width,
                height: draw_height,
            }
        } else {
            Self {
                width: draw_height,
                height: draw_width,
            }
        }
    }

    /// SVG `viewBox` attribute value with `padding` (a fraction of the
    /// extent) added on the side facing away from the grid.
    pub fn svg_view_box(&self, side: Side, padding: f64) -> String {
        let pad_x = self.width * padding;
        let pad_y = self.height * padding;
        let min_x = if side == Side::Left { -pad_x } else { 0.0 };
        let min_y = if side == Side::Top { -pad_y } else { 0.0 };
        let width = self.width + if side == Side::Right { pad_x } else { 0.0 };
        let height = self.height + if side == Side::Bottom { pad_y } else { 0.0 };
        format!("{min_x} {min_y} {width} {height}")
    }
}

/// Per-side coordinate mapping.
///
/// A pure function of side, viewbox and shifts; rebuild it whenever any of
/// them change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    side: Side,
    viewbox: Viewbox,
    x_shift: f64,
    y_shift: f64,
}

impl CoordinateTransform {
    pub fn new(side: Side, viewbox: Viewbox, x_shift: f64, y_shift: f64) -> Self {
        Self {
            side,
            viewbox,
            x_shift,
            y_shift,
        }
    }

    /// Transform without translation.
    pub fn unshifted(side: Side, viewbox: Viewbox) -> Self {
        Self::new(side, viewbox, 0.0, 0.0)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn viewbox(&self) -> Viewbox {
        self.viewbox
    }

    /// Map one engine-space point into drawing space.
    #[inline]
    pub fn apply(&self, point: Point) -> Point {
        let along = point.x + self.x_shift;
        let away = point.y + self.y_shift;
        match self.side {
            Side::Top => Point::new(along, self.viewbox.height - away),
            Side::Bottom => Point::new(along, away),
            Side::Left => Point::new(self.viewbox.width - away, along),
            Side::Right => Point::new(away, along),
        }
    }

    /// Map all four corners of a bracket.
    pub fn apply_bracket(&self, bracket: &Bracket) -> Bracket {
        bracket.map_points(|p| self.apply(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VIEWBOX: Viewbox = Viewbox {
        width: 10.0,
        height: 4.0,
    };

    #[rstest]
    #[case::top(Side::Top, Point::new(1.0, 3.0))]
    #[case::bottom(Side::Bottom, Point::new(1.0, 1.0))]
    #[case::left(Side::Left, Point::new(9.0, 1.0))]
    #[case::right(Side::Right, Point::new(1.0, 1.0))]
    fn test_unshifted_sides(#[case] side: Side, #[case] expected: Point) {
        let transform = CoordinateTransform::unshifted(side, VIEWBOX);
        assert_eq!(transform.apply(Point::new(1.0, 1.0)), expected);
    }

    #[test]
    fn test_bottom_is_identity() {
        let transform = CoordinateTransform::unshifted(Side::Bottom, VIEWBOX);
        for p in [Point::new(0.0, 0.0), Point::new(2.5, 7.0), Point::new(-1.0, 3.0)] {
            assert_eq!(transform.apply(p), p);
        }
    }

    #[test]
    fn test_vertical_sides_swap_axes() {
        let p = Point::new(2.0, 5.0);
        let right = CoordinateTransform::unshifted(Side::Right, VIEWBOX).apply(p);
        assert_eq!(right, Point::new(5.0, 2.0));

        let left = CoordinateTransform::unshifted(Side::Left, VIEWBOX).apply(p);
        assert_eq!(left, Point::new(VIEWBOX.width - 5.0, 2.0));
    }

    #[test]
    fn test_shifts_apply_along_and_away() {
        let transform = CoordinateTransform::new(Side::Top, VIEWBOX, 0.5, 0.25);
        assert_eq!(transform.apply(Point::new(0.0, 0.0)), Point::new(0.5, 3.75));

        let transform = CoordinateTransform::new(Side::Left, VIEWBOX, 0.5, 0.25);
        assert_eq!(transform.apply(Point::new(0.0, 0.0)), Point::new(9.75, 0.5));
    }

    #[test]
    fn test_viewbox_swaps_for_vertical_sides() {
        let horizontal = Viewbox::for_dendrogram(2.0, 3.0, Side::Top, 0.5, 0.0);
        assert_eq!(horizontal, Viewbox { width: 3.0, height: 3.0 });

        let vertical = Viewbox::for_dendrogram(4.0, 2.0, Side::Left, 0.5, 0.0);
        assert_eq!(vertical, Viewbox { width: 2.0, height: 5.0 });
    }

    #[test]
    fn test_svg_view_box_padding() {
        let viewbox = Viewbox {
            width: 100.0,
            height: 50.0,
        };
        assert_eq!(viewbox.svg_view_box(Side::Bottom, 0.02), "0 0 100 51");
        assert_eq!(viewbox.svg_view_box(Side::Top, 0.02), "0 -1 100 50");
        assert_eq!(viewbox.svg_view_box(Side::Left, 0.02), "-2 0 100 50");
        assert_eq!(viewbox.svg_view_box(Side::Right, 0.02), "0 0 102 50");
    }
}
