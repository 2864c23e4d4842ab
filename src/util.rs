use lyon::geom::LineSegment;
use lyon::math::{Box2D, Point};

pub fn channel_from_u8(channel: u8) -> f32 {
    channel as f32 / 255.0
}

/// Absolute-difference comparison. The boundary is inclusive: a value off by exactly
/// `tolerance` still matches.
#[inline(always)]
pub fn within(actual: f32, expected: f32, tolerance: f32) -> bool {
    (actual - expected).abs() <= tolerance
}

/// Left, top, right, bottom of a box, in that order.
#[inline(always)]
pub fn edges(rect: &Box2D) -> [f32; 4] {
    [rect.min.x, rect.min.y, rect.max.x, rect.max.y]
}

pub fn edges_within(actual: &Box2D, expected: &Box2D, tolerance: f32) -> bool {
    edges(actual)
        .into_iter()
        .zip(edges(expected))
        .all(|(actual, expected)| within(actual, expected, tolerance))
}

pub fn points_within(actual: Point, expected: Point, tolerance: f32) -> bool {
    within(actual.x, expected.x, tolerance) && within(actual.y, expected.y, tolerance)
}

/// Largest per-edge deviation between two boxes. Used to rank candidates when several fit.
pub fn edge_distance(actual: &Box2D, expected: &Box2D) -> f32 {
    edges(actual)
        .into_iter()
        .zip(edges(expected))
        .map(|(actual, expected)| (actual - expected).abs())
        .fold(0.0, f32::max)
}

/// Largest coordinate deviation between two segments, taking whichever endpoint pairing
/// fits better. Backends are free to draw a side in either direction.
pub fn segment_distance(actual: &LineSegment<f32>, expected: &LineSegment<f32>) -> f32 {
    let deviation = |from: Point, to: Point| {
        [
            (from.x - expected.from.x).abs(),
            (from.y - expected.from.y).abs(),
            (to.x - expected.to.x).abs(),
            (to.y - expected.to.y).abs(),
        ]
        .into_iter()
        .fold(0.0, f32::max)
    };
    deviation(actual.from, actual.to).min(deviation(actual.to, actual.from))
}

pub fn segment_within(
    actual: &LineSegment<f32>,
    expected: &LineSegment<f32>,
    tolerance: f32,
) -> bool {
    (points_within(actual.from, expected.from, tolerance)
        && points_within(actual.to, expected.to, tolerance))
        || (points_within(actual.to, expected.from, tolerance)
            && points_within(actual.from, expected.to, tolerance))
}

#[cfg(test)]
mod tests {
    use lyon::geom::LineSegment;
    use lyon::math::{point, Box2D};

    use super::{edge_distance, edges_within, segment_distance, segment_within, within};

    #[test]
    fn within_is_inclusive_at_the_boundary() {
        assert!(within(4.0, 2.0, 2.0));
        assert!(!within(4.25, 2.0, 2.0));
    }

    #[test]
    fn edges_within_checks_every_edge() {
        let expected = Box2D::new(point(0.0, 0.0), point(10.0, 10.0));
        let shifted = Box2D::new(point(0.0, 0.0), point(10.0, 13.0));
        assert!(edges_within(&shifted, &expected, 3.0));
        assert!(!edges_within(&shifted, &expected, 2.0));
        assert_eq!(edge_distance(&shifted, &expected), 3.0);
    }

    #[test]
    fn segments_match_in_either_direction() {
        let expected = LineSegment {
            from: point(0.0, 1.0),
            to: point(100.0, 1.0),
        };
        let reversed = LineSegment {
            from: point(100.0, 2.0),
            to: point(0.0, 2.0),
        };
        assert!(segment_within(&reversed, &expected, 1.0));
        assert_eq!(segment_distance(&reversed, &expected), 1.0);
        assert!(!segment_within(&reversed, &expected, 0.5));
    }
}
