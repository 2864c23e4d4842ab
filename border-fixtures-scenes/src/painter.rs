//! A reference border painter: paints a specification into the operations a backend emits
//! for each strategy.
//!
//! The arithmetic is written out here on purpose rather than taken from
//! `border_fixtures::expected`, so scenes exercise the matchers against an independent
//! rendition of the same rules.

use border_fixtures::{
    BorderSpecification, BorderStyle, Color, CornerRadii, PaintOperation, Rect, Side, Strategy,
    Stroke,
};
use lyon::math::{point, Box2D};

/// How far dash-patterned lines stop short of the box corners.
pub const DASH_SHORTFALL: f32 = 3.0;

/// Paints `spec` the way a backend using `strategy` would.
pub fn paint_border(spec: &BorderSpecification, strategy: Strategy) -> Vec<PaintOperation> {
    match strategy {
        Strategy::StrokedRect => vec![stroked_rect(spec)],
        Strategy::DoubleStroked => double_stroked(spec),
        Strategy::DottedLines => side_lines(spec, DASH_SHORTFALL),
        Strategy::GrooveRidge => groove_ridge(spec),
        Strategy::DrawLine => side_lines(spec, 0.0),
        Strategy::FilledThinRect => filled_bands(spec),
    }
}

fn inset_box(rect: &Rect, inset: f32) -> Box2D {
    Box2D::new(
        point(rect.x + inset, rect.y + inset),
        point(rect.x + rect.width - inset, rect.y + rect.height - inset),
    )
}

fn stroked_rect(spec: &BorderSpecification) -> PaintOperation {
    let width = spec.widths().top;
    let operation = PaintOperation::stroked_rect(
        inset_box(spec.rect(), width / 2.0),
        Stroke::new(width, spec.colors().top),
    );
    match spec.radii() {
        Some(radii) => {
            let shrunk = radii.values().iter().map(|radius| (radius - width / 2.0).max(0.0));
            match CornerRadii::new(shrunk) {
                Some(shrunk) => operation.with_radii(shrunk),
                None => operation,
            }
        }
        None => operation,
    }
}

fn double_stroked(spec: &BorderSpecification) -> Vec<PaintOperation> {
    let width = spec.widths().top;
    let line_width = (width / 3.0).ceil();
    let stroke = Stroke::new(line_width, spec.colors().top);
    vec![
        PaintOperation::stroked_rect(inset_box(spec.rect(), line_width / 2.0), stroke),
        PaintOperation::stroked_rect(inset_box(spec.rect(), width - line_width / 2.0), stroke),
    ]
}

/// One line per painted side along its midline, `shortfall` short of each end.
fn side_lines(spec: &BorderSpecification, shortfall: f32) -> Vec<PaintOperation> {
    let rect = spec.rect();
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);

    Side::ALL
        .into_iter()
        .filter(|side| spec.widths()[*side] > 0.0)
        .map(|side| {
            let width = spec.widths()[side];
            let half = width / 2.0;
            let (from, to) = match side {
                Side::Top => (
                    point(left + shortfall, top + half),
                    point(right - shortfall, top + half),
                ),
                Side::Right => (
                    point(right - half, top + shortfall),
                    point(right - half, bottom - shortfall),
                ),
                Side::Bottom => (
                    point(right - shortfall, bottom - half),
                    point(left + shortfall, bottom - half),
                ),
                Side::Left => (
                    point(left + half, bottom - shortfall),
                    point(left + half, top + shortfall),
                ),
            };
            PaintOperation::line(from, to, Stroke::new(width, spec.colors()[side]))
        })
        .collect()
}

fn band(rect: &Rect, side: Side, near: f32, far: f32) -> Box2D {
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
    match side {
        Side::Top => Box2D::new(point(left, top + near), point(right, top + far)),
        Side::Right => Box2D::new(point(right - far, top), point(right - near, bottom)),
        Side::Bottom => Box2D::new(point(left, bottom - far), point(right, bottom - near)),
        Side::Left => Box2D::new(point(left + near, top), point(left + far, bottom)),
    }
}

fn filled_bands(spec: &BorderSpecification) -> Vec<PaintOperation> {
    Side::ALL
        .into_iter()
        .filter(|side| spec.widths()[*side] > 0.0)
        .map(|side| {
            let width = spec.widths()[side];
            PaintOperation::filled_rect(band(spec.rect(), side, 0.0, width), spec.colors()[side])
        })
        .collect()
}

pub fn darken(color: Color) -> Color {
    Color::rgba(color.r * 0.7, color.g * 0.7, color.b * 0.7, color.a)
}

pub fn lighten(color: Color) -> Color {
    let light = |channel: f32| (channel * 1.2).min(1.0);
    Color::rgba(light(color.r), light(color.g), light(color.b), color.a)
}

/// Eight half-thickness strips, outer then inner per side in top, right, bottom, left order.
/// A groove is dark outside and light inside; a ridge the other way round.
fn groove_ridge(spec: &BorderSpecification) -> Vec<PaintOperation> {
    let width = spec.widths().top;
    let half = width / 2.0;
    let base = spec.colors().top;
    let ridge = spec
        .styles()
        .is_some_and(|styles| styles.top == BorderStyle::Ridge);
    let (outer, inner) = if ridge {
        (lighten(base), darken(base))
    } else {
        (darken(base), lighten(base))
    };

    Side::ALL
        .into_iter()
        .flat_map(|side| {
            [
                PaintOperation::filled_rect(band(spec.rect(), side, 0.0, half), outer),
                PaintOperation::filled_rect(band(spec.rect(), side, half, width), inner),
            ]
        })
        .collect()
}
