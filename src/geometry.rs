//! Layout-side geometry: the border box rectangle, per-side maps and corner radii.

use std::fmt;
use std::ops::{Index, IndexMut};

use lyon::math::{point, Box2D};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// An axis-aligned rectangle in layout coordinates.
///
/// # Examples
///
/// ```
/// use border_fixtures::Rect;
///
/// let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.right(), 110.0);
/// assert_eq!(rect.bottom(), 70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The rectangle as two corners.
    pub fn to_box(&self) -> Box2D {
        Box2D::new(point(self.x, self.y), point(self.right(), self.bottom()))
    }

    /// The rectangle shrunk by `amount` on every edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use border_fixtures::Rect;
    ///
    /// let inset = Rect::new(0.0, 0.0, 100.0, 50.0).inset(2.0);
    /// assert_eq!([inset.min.x, inset.min.y, inset.max.x, inset.max.y], [2.0, 2.0, 98.0, 48.0]);
    /// ```
    pub fn inset(&self, amount: f32) -> Box2D {
        Box2D::new(
            point(self.x + amount, self.y + amount),
            point(self.right() - amount, self.bottom() - amount),
        )
    }
}

/// One side of a border box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides in painting order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value for each of the four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T> Sides<T> {
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Iterates `(side, value)` pairs in the order top, right, bottom, left.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().map(move |side| (side, &self[side]))
    }

    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> Sides<U> {
        Sides {
            top: f(Side::Top, self.top),
            right: f(Side::Right, self.right),
            bottom: f(Side::Bottom, self.bottom),
            left: f(Side::Left, self.left),
        }
    }
}

impl<T: Clone> Sides<T> {
    pub fn uniform(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value.clone(), value)
    }
}

impl<T> Index<Side> for Sides<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }
}

impl<T> IndexMut<Side> for Sides<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }
}

/// Corner radii in corner order (top-left, top-right, bottom-right, bottom-left).
///
/// Either one value per corner (4 entries) or a horizontal/vertical pair per corner
/// (8 entries). Other lengths are rejected by [`CornerRadii::new`] and when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct CornerRadii(SmallVec<[f32; 8]>);

/// A radius list that is neither 4 nor 8 entries long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("corner radii must have 4 or 8 entries, got {0}")]
pub struct RadiiCountError(pub usize);

impl TryFrom<Vec<f32>> for CornerRadii {
    type Error = RadiiCountError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        let count = values.len();
        Self::new(values).ok_or(RadiiCountError(count))
    }
}

impl From<CornerRadii> for Vec<f32> {
    fn from(radii: CornerRadii) -> Self {
        radii.0.into_vec()
    }
}

impl CornerRadii {
    /// Returns `None` unless `values` has 4 or 8 entries.
    pub fn new(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        let values: SmallVec<[f32; 8]> = values.into_iter().collect();
        matches!(values.len(), 4 | 8).then_some(Self(values))
    }

    /// Four equal radii.
    pub fn uniform(radius: f32) -> Self {
        Self(SmallVec::from_elem(radius, 4))
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Radii of the curve a stroke of `stroke_width` follows when centered inside the border
    /// edge: every radius shrinks by half the stroke, clamped at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use border_fixtures::CornerRadii;
    ///
    /// let radii = CornerRadii::new([10.0, 1.0, 4.0, 0.0]).unwrap();
    /// assert_eq!(radii.shrunk_for_stroke(4.0).values(), &[8.0, 0.0, 2.0, 0.0]);
    /// ```
    pub fn shrunk_for_stroke(&self, stroke_width: f32) -> Self {
        let adjustment = stroke_width / 2.0;
        Self(
            self.0
                .iter()
                .map(|radius| (radius - adjustment).max(0.0))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CornerRadii, Side, Sides};

    #[test]
    fn corner_radii_accepts_only_four_or_eight_values() {
        assert!(CornerRadii::new([1.0; 4]).is_some());
        assert!(CornerRadii::new([1.0; 8]).is_some());
        assert!(CornerRadii::new([1.0; 3]).is_none());
        assert!(CornerRadii::new(std::iter::empty()).is_none());
    }

    #[test]
    fn corner_radii_deserialize_with_the_same_length_check() {
        let radii: CornerRadii = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(radii.values(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(serde_json::to_string(&radii).unwrap(), "[1.0,2.0,3.0,4.0]");

        let error = serde_json::from_str::<CornerRadii>("[1, 2, 3]").unwrap_err();
        assert!(error.to_string().contains("4 or 8 entries, got 3"));
    }

    #[test]
    fn sides_iterate_in_painting_order() {
        let sides = Sides::new(1, 2, 3, 4);
        let order: Vec<(Side, i32)> = sides.iter().map(|(side, value)| (side, *value)).collect();
        assert_eq!(
            order,
            vec![
                (Side::Top, 1),
                (Side::Right, 2),
                (Side::Bottom, 3),
                (Side::Left, 4)
            ]
        );
    }

    #[test]
    fn sides_index_mut_updates_one_side() {
        let mut sides = Sides::uniform(0.0);
        sides[Side::Left] = 3.0;
        assert_eq!(sides.left, 3.0);
        assert_eq!(sides.top, 0.0);
    }
}
