//! The `paint_op` module models the low-level drawing operations a rendering backend records
//! while painting borders: filled rectangles, stroked rectangles (optionally rounded) and
//! stroked line segments.
//!
//! # Examples
//!
//! ```rust
//! use border_fixtures::{Color, PaintOperation, SceneIds, Stroke};
//! use lyon::math::{point, Box2D};
//!
//! // A stroked rectangle, as painted for a uniform solid border
//! let outline = PaintOperation::stroked_rect(
//!     Box2D::new(point(2.0, 2.0), point(98.0, 48.0)),
//!     Stroke::new(4.0, Color::BLACK),
//! )
//! .with_scene_ids(SceneIds::new(1, 2, 3));
//!
//! // A line along the top edge
//! let top = PaintOperation::line(point(0.0, 1.0), point(100.0, 1.0), Stroke::new(2.0, Color::BLACK));
//!
//! assert_eq!(outline.kind_name(), "DrawRectOp");
//! assert_eq!(top.kind_name(), "DrawLineOp");
//! ```

use lyon::geom::LineSegment;
use lyon::math::{Box2D, Point};

use crate::geometry::CornerRadii;
use crate::id::SceneIds;
use crate::{Color, Stroke};

/// A filled rectangle, optionally with rounded corners.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRectOp {
    pub rect: Box2D,
    pub radii: Option<CornerRadii>,
    pub color: Color,
    pub scene_ids: Option<SceneIds>,
}

impl FilledRectOp {
    /// True if exactly one dimension is below `threshold` and the other above it, the shape
    /// of a single border band rather than a background fill.
    pub fn is_thin(&self, threshold: f32) -> bool {
        let width = self.rect.width();
        let height = self.rect.height();
        (width < threshold && height > threshold) || (height < threshold && width > threshold)
    }
}

/// A stroked rectangle, optionally with rounded corners. The stroke is centered on `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokedRectOp {
    pub rect: Box2D,
    pub radii: Option<CornerRadii>,
    pub stroke: Stroke,
    pub scene_ids: Option<SceneIds>,
}

/// A stroked line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOp {
    pub segment: LineSegment<f32>,
    pub stroke: Stroke,
    pub scene_ids: Option<SceneIds>,
}

/// One recorded drawing operation.
///
/// # Variants
///
/// - `FilledRect`: a rectangle painted with the fill style.
/// - `StrokedRect`: a rectangle painted with the stroke style.
/// - `Line`: a line segment.
/// - `Unsupported`: any other backend operation. It keeps its position in the pool so indices
///   stay aligned with the recorded list, but no border strategy ever uses it.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOperation {
    FilledRect(FilledRectOp),
    StrokedRect(StrokedRectOp),
    Line(LineOp),
    Unsupported {
        kind: String,
        scene_ids: Option<SceneIds>,
    },
}

impl PaintOperation {
    pub fn filled_rect(rect: Box2D, color: Color) -> Self {
        PaintOperation::FilledRect(FilledRectOp {
            rect,
            radii: None,
            color,
            scene_ids: None,
        })
    }

    pub fn stroked_rect(rect: Box2D, stroke: Stroke) -> Self {
        PaintOperation::StrokedRect(StrokedRectOp {
            rect,
            radii: None,
            stroke,
            scene_ids: None,
        })
    }

    pub fn line(from: Point, to: Point, stroke: Stroke) -> Self {
        PaintOperation::Line(LineOp {
            segment: LineSegment { from, to },
            stroke,
            scene_ids: None,
        })
    }

    /// Attaches corner radii. Lines and unsupported operations are returned unchanged.
    pub fn with_radii(mut self, corner_radii: CornerRadii) -> Self {
        match &mut self {
            PaintOperation::FilledRect(op) => op.radii = Some(corner_radii),
            PaintOperation::StrokedRect(op) => op.radii = Some(corner_radii),
            PaintOperation::Line(_) | PaintOperation::Unsupported { .. } => {}
        }
        self
    }

    pub fn with_scene_ids(mut self, ids: SceneIds) -> Self {
        match &mut self {
            PaintOperation::FilledRect(op) => op.scene_ids = Some(ids),
            PaintOperation::StrokedRect(op) => op.scene_ids = Some(ids),
            PaintOperation::Line(op) => op.scene_ids = Some(ids),
            PaintOperation::Unsupported { scene_ids, .. } => *scene_ids = Some(ids),
        }
        self
    }

    /// Scene ids the operation was recorded with, or `None` if the producer reported none.
    pub fn recorded_scene_ids(&self) -> Option<SceneIds> {
        match self {
            PaintOperation::FilledRect(op) => op.scene_ids,
            PaintOperation::StrokedRect(op) => op.scene_ids,
            PaintOperation::Line(op) => op.scene_ids,
            PaintOperation::Unsupported { scene_ids, .. } => *scene_ids,
        }
    }

    /// Scene ids, defaulting to all zeros when none were recorded.
    pub fn scene_ids(&self) -> SceneIds {
        self.recorded_scene_ids().unwrap_or_default()
    }

    /// The backend's name for this kind of operation, used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            PaintOperation::FilledRect(FilledRectOp { radii: None, .. })
            | PaintOperation::StrokedRect(StrokedRectOp { radii: None, .. }) => "DrawRectOp",
            PaintOperation::FilledRect(_) | PaintOperation::StrokedRect(_) => "DrawRRectOp",
            PaintOperation::Line(_) => "DrawLineOp",
            PaintOperation::Unsupported { kind, .. } => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use lyon::math::{point, Box2D};

    use super::PaintOperation;
    use crate::{Color, CornerRadii, SceneIds, Stroke};

    #[test]
    fn radii_turn_rect_into_rounded_rect() {
        let rect = Box2D::new(point(0.0, 0.0), point(10.0, 10.0));
        let op = PaintOperation::stroked_rect(rect, Stroke::new(1.0, Color::BLACK));
        assert_eq!(op.kind_name(), "DrawRectOp");
        assert_eq!(
            op.with_radii(CornerRadii::uniform(2.0)).kind_name(),
            "DrawRRectOp"
        );
    }

    #[test]
    fn scene_ids_are_carried_verbatim() {
        let ids = SceneIds::new(-1, 42, 7);
        let op = PaintOperation::line(
            point(0.0, 0.0),
            point(1.0, 0.0),
            Stroke::new(1.0, Color::WHITE),
        )
        .with_scene_ids(ids);
        assert_eq!(op.scene_ids(), ids);
        assert_eq!(op.recorded_scene_ids(), Some(ids));
    }

    #[test]
    fn unrecorded_scene_ids_read_as_zero() {
        let op = PaintOperation::line(
            point(0.0, 0.0),
            point(1.0, 0.0),
            Stroke::new(1.0, Color::WHITE),
        );
        assert_eq!(op.recorded_scene_ids(), None);
        assert_eq!(op.scene_ids(), SceneIds::default());
    }

    #[test]
    fn thin_rect_needs_one_narrow_and_one_long_side() {
        let band = |width: f32, height: f32| match PaintOperation::filled_rect(
            Box2D::new(point(0.0, 0.0), point(width, height)),
            Color::BLACK,
        ) {
            PaintOperation::FilledRect(op) => op.is_thin(10.0),
            _ => unreachable!(),
        };
        assert!(band(100.0, 2.0));
        assert!(band(3.0, 40.0));
        assert!(!band(5.0, 5.0));
        assert!(!band(100.0, 50.0));
        assert!(!band(100.0, 10.0));
    }
}
