use smallvec::SmallVec;

use super::{best_available, BorderMatcher, MatchResult, MatchedOps, Strategy};
use crate::expected::side_midline;
use crate::geometry::{Side, Sides};
use crate::pool::{ConsumptionSet, OperationPool};
use crate::util::{segment_distance, segment_within, within};
use crate::{BorderSpecification, PaintOperation, Tolerances};

/// Each painted side drawn as one stroked line along the side's midline, as wide as the
/// side.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawLineMatcher;

impl BorderMatcher for DrawLineMatcher {
    fn strategy(&self) -> Strategy {
        Strategy::DrawLine
    }

    fn attempt(
        &self,
        spec: &BorderSpecification,
        pool: &OperationPool,
        consumed: &ConsumptionSet,
        tolerances: &Tolerances,
    ) -> Option<MatchResult> {
        let sides = match_side_lines(spec, pool, consumed, tolerances.geometry, tolerances)?;
        Some(MatchResult::new(Strategy::DrawLine, MatchedOps::PerSide(sides)))
    }
}

/// One line per non-zero side, each on its side's midline within `geometry_tolerance`.
/// Sides are searched top, right, bottom, left; a side's pick is reserved before the next
/// side is searched. Fails unless every non-zero side finds a line.
pub(super) fn match_side_lines(
    spec: &BorderSpecification,
    pool: &OperationPool,
    consumed: &ConsumptionSet,
    geometry_tolerance: f32,
    tolerances: &Tolerances,
) -> Option<Sides<Option<usize>>> {
    let mut matched: Sides<Option<usize>> = Sides::default();
    let mut reserved: SmallVec<[usize; 4]> = SmallVec::new();

    for side in Side::ALL {
        let width = spec.widths()[side];
        if width <= 0.0 {
            continue;
        }
        let expected = side_midline(spec.rect(), side, width);
        let color = spec.colors()[side];

        let index = best_available(pool, consumed, &reserved, |operation| {
            let PaintOperation::Line(op) = operation else {
                return None;
            };
            let fits = within(op.stroke.width, width, tolerances.line_stroke_width)
                && segment_within(&op.segment, &expected, geometry_tolerance)
                && op.stroke.color.rgb_approx_eq(&color, tolerances.side_color);
            fits.then(|| segment_distance(&op.segment, &expected))
        })?;

        reserved.push(index);
        matched[side] = Some(index);
    }

    Some(matched)
}

#[cfg(test)]
mod tests {
    use lyon::math::point;

    use super::DrawLineMatcher;
    use crate::matcher::{BorderMatcher, MatchedOps};
    use crate::pool::{ConsumptionSet, OperationPool};
    use crate::{
        BorderSpecification, Color, NodeId, PaintOperation, Rect, Sides, Stroke, Tolerances,
    };

    const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    fn top_and_bottom() -> BorderSpecification {
        BorderSpecification::new(
            NodeId(5),
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Sides::new(2.0, 0.0, 2.0, 0.0),
            Sides::uniform(BLUE),
        )
        .unwrap()
    }

    fn line(x0: f32, y0: f32, x1: f32, y1: f32) -> PaintOperation {
        PaintOperation::line(point(x0, y0), point(x1, y1), Stroke::new(2.0, BLUE))
    }

    fn attempt(spec: &BorderSpecification, pool: &OperationPool) -> Option<MatchedOps> {
        DrawLineMatcher
            .attempt(spec, pool, &ConsumptionSet::new(), &Tolerances::default())
            .map(|result| *result.ops())
    }

    #[test]
    fn matches_one_line_per_painted_side() {
        let pool = OperationPool::new(vec![
            line(0.0, 49.0, 100.0, 49.0),
            line(0.0, 1.0, 100.0, 1.0),
        ]);
        assert_eq!(
            attempt(&top_and_bottom(), &pool),
            Some(MatchedOps::PerSide(Sides::new(Some(1), None, Some(0), None)))
        );
    }

    #[test]
    fn reversed_lines_still_match() {
        let pool = OperationPool::new(vec![
            line(100.0, 1.0, 0.0, 1.0),
            line(100.0, 49.0, 0.0, 49.0),
        ]);
        assert!(attempt(&top_and_bottom(), &pool).is_some());
    }

    #[test]
    fn a_missing_side_fails_the_whole_match() {
        let pool = OperationPool::new(vec![line(0.0, 1.0, 100.0, 1.0)]);
        assert!(attempt(&top_and_bottom(), &pool).is_none());
    }

    #[test]
    fn alpha_is_ignored_for_side_colors() {
        let faded = PaintOperation::line(
            point(0.0, 1.0),
            point(100.0, 1.0),
            Stroke::new(2.0, Color::rgba(0.0, 0.0, 1.0, 0.5)),
        );
        let pool = OperationPool::new(vec![faded, line(0.0, 49.0, 100.0, 49.0)]);
        assert!(attempt(&top_and_bottom(), &pool).is_some());
    }

    #[test]
    fn a_line_cannot_serve_two_sides() {
        // On a 4px tall box the top and bottom midlines are 2px apart, so one line in the
        // middle fits both.
        let spec = BorderSpecification::new(
            NodeId(6),
            Rect::new(0.0, 0.0, 100.0, 4.0),
            Sides::new(2.0, 0.0, 2.0, 0.0),
            Sides::uniform(BLUE),
        )
        .unwrap();
        let pool = OperationPool::new(vec![line(0.0, 2.0, 100.0, 2.0)]);
        assert!(attempt(&spec, &pool).is_none());

        let pool = OperationPool::new(vec![line(0.0, 2.0, 100.0, 2.0), line(0.0, 2.0, 100.0, 2.0)]);
        assert_eq!(
            attempt(&spec, &pool),
            Some(MatchedOps::PerSide(Sides::new(Some(0), None, Some(1), None)))
        );
    }
}
