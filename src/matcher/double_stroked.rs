use lyon::math::Box2D;

use super::{best_available, BorderMatcher, MatchResult, MatchedOps, Strategy};
use crate::expected::{double_insets, double_stroke_width};
use crate::pool::{ConsumptionSet, OperationPool};
use crate::util::{edge_distance, edges_within, within};
use crate::{BorderSpecification, Color, PaintOperation, Tolerances};

/// A uniform `double` border painted as two concentric stroked rects, each a third of the
/// border width thick (rounded up), hugging the outer and inner edge of the band.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleStrokedMatcher;

impl BorderMatcher for DoubleStrokedMatcher {
    fn strategy(&self) -> Strategy {
        Strategy::DoubleStroked
    }

    fn attempt(
        &self,
        spec: &BorderSpecification,
        pool: &OperationPool,
        consumed: &ConsumptionSet,
        tolerances: &Tolerances,
    ) -> Option<MatchResult> {
        let width = spec.uniform_width()?;
        let stroke_width = double_stroke_width(width);
        let (outer_inset, inner_inset) = double_insets(width);
        let color = spec.primary_color();

        let outer_rect = spec.rect().inset(outer_inset);
        let outer = best_available(pool, consumed, &[], |operation| {
            fits_line_of_double(operation, &outer_rect, stroke_width, &color, tolerances)
        })?;

        let inner_rect = spec.rect().inset(inner_inset);
        let inner = best_available(pool, consumed, &[outer], |operation| {
            fits_line_of_double(operation, &inner_rect, stroke_width, &color, tolerances)
        })?;

        Some(MatchResult::new(
            Strategy::DoubleStroked,
            MatchedOps::Double { outer, inner },
        ))
    }
}

fn fits_line_of_double(
    operation: &PaintOperation,
    expected_rect: &Box2D,
    stroke_width: f32,
    color: &Color,
    tolerances: &Tolerances,
) -> Option<f32> {
    let PaintOperation::StrokedRect(op) = operation else {
        return None;
    };
    let fits = within(op.stroke.width, stroke_width, tolerances.stroke_width)
        && edges_within(&op.rect, expected_rect, tolerances.geometry)
        && op.stroke.color.approx_eq(color, tolerances.color);
    fits.then(|| edge_distance(&op.rect, expected_rect))
}

#[cfg(test)]
mod tests {
    use lyon::math::{point, Box2D};

    use super::DoubleStrokedMatcher;
    use crate::matcher::{BorderMatcher, MatchedOps};
    use crate::pool::{ConsumptionSet, OperationPool};
    use crate::{
        BorderSpecification, Color, NodeId, PaintOperation, Rect, Sides, Stroke, Tolerances,
    };

    fn spec() -> BorderSpecification {
        BorderSpecification::new(
            NodeId(3),
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Sides::uniform(9.0),
            Sides::uniform(Color::BLACK),
        )
        .unwrap()
    }

    fn stroked_at_inset(inset: f32) -> PaintOperation {
        PaintOperation::stroked_rect(
            Box2D::new(point(inset, inset), point(100.0 - inset, 50.0 - inset)),
            Stroke::new(3.0, Color::BLACK),
        )
    }

    #[test]
    fn matches_outer_and_inner_rects_in_any_pool_order() {
        let pool = OperationPool::new(vec![stroked_at_inset(7.5), stroked_at_inset(1.5)]);
        let result = DoubleStrokedMatcher
            .attempt(&spec(), &pool, &ConsumptionSet::new(), &Tolerances::default())
            .unwrap();
        assert_eq!(*result.ops(), MatchedOps::Double { outer: 1, inner: 0 });
    }

    #[test]
    fn one_rect_is_not_a_double_border() {
        for inset in [1.5, 7.5] {
            let pool = OperationPool::new(vec![stroked_at_inset(inset)]);
            assert!(DoubleStrokedMatcher
                .attempt(&spec(), &pool, &ConsumptionSet::new(), &Tolerances::default())
                .is_none());
        }
    }
}
