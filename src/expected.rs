//! Expected paint geometry for each strategy, derived from a border specification.
//!
//! Matchers and the comparator both go through these functions, so a fixture is verified
//! with exactly the formulas it was extracted with.

use std::fmt;

use lyon::geom::LineSegment;
use lyon::math::{point, Box2D};

use crate::geometry::{Rect, Side};

/// Stroke width of each of the two lines of a double border: a third of the border width,
/// rounded up.
///
/// # Examples
///
/// ```
/// use border_fixtures::expected::double_stroke_width;
///
/// assert_eq!(double_stroke_width(9.0), 3.0);
/// assert_eq!(double_stroke_width(10.0), 4.0);
/// ```
pub fn double_stroke_width(border_width: f32) -> f32 {
    (border_width / 3.0).ceil()
}

/// Insets of the outer and inner stroked rects of a double border.
pub fn double_insets(border_width: f32) -> (f32, f32) {
    let stroke_width = double_stroke_width(border_width);
    (stroke_width / 2.0, border_width - stroke_width / 2.0)
}

/// The line a stroke of `side_width` follows to cover `side`'s band: on the band's midline,
/// spanning the full box along the band.
pub fn side_midline(rect: &Rect, side: Side, side_width: f32) -> LineSegment<f32> {
    let half = side_width / 2.0;
    let (from, to) = match side {
        Side::Top => (point(rect.x, rect.y + half), point(rect.right(), rect.y + half)),
        Side::Bottom => (
            point(rect.x, rect.bottom() - half),
            point(rect.right(), rect.bottom() - half),
        ),
        Side::Left => (point(rect.x + half, rect.y), point(rect.x + half, rect.bottom())),
        Side::Right => (
            point(rect.right() - half, rect.y),
            point(rect.right() - half, rect.bottom()),
        ),
    };
    LineSegment { from, to }
}

/// The band `side` covers when painted as a filled rect, spanning the full box.
pub fn side_band(rect: &Rect, side: Side, side_width: f32) -> Box2D {
    match side {
        Side::Top => Box2D::new(
            point(rect.x, rect.y),
            point(rect.right(), rect.y + side_width),
        ),
        Side::Bottom => Box2D::new(
            point(rect.x, rect.bottom() - side_width),
            point(rect.right(), rect.bottom()),
        ),
        Side::Left => Box2D::new(
            point(rect.x, rect.y),
            point(rect.x + side_width, rect.bottom()),
        ),
        Side::Right => Box2D::new(
            point(rect.right() - side_width, rect.y),
            point(rect.right(), rect.bottom()),
        ),
    }
}

/// Which half of a groove/ridge band a slot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BandHalf {
    Outer,
    Inner,
}

/// One of the eight groove/ridge slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfBand {
    pub side: Side,
    pub half: BandHalf,
}

impl HalfBand {
    /// Slot order: per side in painting order, outer half first.
    pub const ALL: [HalfBand; 8] = [
        HalfBand::new(Side::Top, BandHalf::Outer),
        HalfBand::new(Side::Top, BandHalf::Inner),
        HalfBand::new(Side::Right, BandHalf::Outer),
        HalfBand::new(Side::Right, BandHalf::Inner),
        HalfBand::new(Side::Bottom, BandHalf::Outer),
        HalfBand::new(Side::Bottom, BandHalf::Inner),
        HalfBand::new(Side::Left, BandHalf::Outer),
        HalfBand::new(Side::Left, BandHalf::Inner),
    ];

    pub const fn new(side: Side, half: BandHalf) -> Self {
        Self { side, half }
    }

    /// Role name, e.g. `top_outer`.
    pub fn role(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HalfBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = match self.half {
            BandHalf::Outer => "outer",
            BandHalf::Inner => "inner",
        };
        write!(f, "{}_{}", self.side, half)
    }
}

/// The filled rect covering one half of a uniform groove/ridge band.
pub fn half_band(rect: &Rect, slot: HalfBand, border_width: f32) -> Box2D {
    let half = border_width / 2.0;
    let (near, far) = match slot.half {
        BandHalf::Outer => (0.0, half),
        BandHalf::Inner => (half, border_width),
    };
    match slot.side {
        Side::Top => Box2D::new(
            point(rect.x, rect.y + near),
            point(rect.right(), rect.y + far),
        ),
        Side::Bottom => Box2D::new(
            point(rect.x, rect.bottom() - far),
            point(rect.right(), rect.bottom() - near),
        ),
        Side::Left => Box2D::new(
            point(rect.x + near, rect.y),
            point(rect.x + far, rect.bottom()),
        ),
        Side::Right => Box2D::new(
            point(rect.right() - far, rect.y),
            point(rect.right() - near, rect.bottom()),
        ),
    }
}
