use smallvec::SmallVec;

use super::{best_available, BorderMatcher, MatchResult, MatchedOps, Strategy};
use crate::expected::side_band;
use crate::geometry::{Side, Sides};
use crate::pool::{ConsumptionSet, OperationPool};
use crate::util::{edge_distance, edges_within};
use crate::{BorderSpecification, PaintOperation, Tolerances};

/// Each painted side filled as one thin plain rect covering the side's band.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilledThinRectMatcher;

impl BorderMatcher for FilledThinRectMatcher {
    fn strategy(&self) -> Strategy {
        Strategy::FilledThinRect
    }

    fn attempt(
        &self,
        spec: &BorderSpecification,
        pool: &OperationPool,
        consumed: &ConsumptionSet,
        tolerances: &Tolerances,
    ) -> Option<MatchResult> {
        let mut matched: Sides<Option<usize>> = Sides::default();
        let mut reserved: SmallVec<[usize; 4]> = SmallVec::new();

        for side in Side::ALL {
            let width = spec.widths()[side];
            if width <= 0.0 {
                continue;
            }
            let expected = side_band(spec.rect(), side, width);
            let color = spec.colors()[side];

            let index = best_available(pool, consumed, &reserved, |operation| {
                let PaintOperation::FilledRect(op) = operation else {
                    return None;
                };
                let fits = op.radii.is_none()
                    && op.is_thin(tolerances.thin_rect)
                    && edges_within(&op.rect, &expected, tolerances.geometry)
                    && op.color.rgb_approx_eq(&color, tolerances.side_color);
                fits.then(|| edge_distance(&op.rect, &expected))
            })?;

            reserved.push(index);
            matched[side] = Some(index);
        }

        Some(MatchResult::new(
            Strategy::FilledThinRect,
            MatchedOps::PerSide(matched),
        ))
    }
}

#[cfg(test)]
mod tests {
    use lyon::math::{point, Box2D};

    use super::FilledThinRectMatcher;
    use crate::matcher::{BorderMatcher, MatchedOps};
    use crate::pool::{ConsumptionSet, OperationPool};
    use crate::{
        BorderSpecification, Color, CornerRadii, NodeId, PaintOperation, Rect, Sides, Tolerances,
    };

    const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

    fn filled(left: f32, top: f32, right: f32, bottom: f32) -> PaintOperation {
        PaintOperation::filled_rect(Box2D::new(point(left, top), point(right, bottom)), GRAY)
    }

    fn left_and_right() -> BorderSpecification {
        BorderSpecification::new(
            NodeId(9),
            Rect::new(10.0, 10.0, 100.0, 50.0),
            Sides::new(0.0, 6.0, 0.0, 6.0),
            Sides::uniform(GRAY),
        )
        .unwrap()
    }

    fn attempt(spec: &BorderSpecification, pool: &OperationPool) -> Option<MatchedOps> {
        FilledThinRectMatcher
            .attempt(spec, pool, &ConsumptionSet::new(), &Tolerances::default())
            .map(|result| *result.ops())
    }

    #[test]
    fn matches_a_band_per_painted_side() {
        let pool = OperationPool::new(vec![
            filled(10.0, 10.0, 16.0, 60.0),
            filled(104.0, 10.0, 110.0, 60.0),
        ]);
        assert_eq!(
            attempt(&left_and_right(), &pool),
            Some(MatchedOps::PerSide(Sides::new(None, Some(1), None, Some(0))))
        );
    }

    #[test]
    fn background_fills_are_not_bands() {
        let pool = OperationPool::new(vec![
            filled(10.0, 10.0, 110.0, 60.0),
            filled(104.0, 10.0, 110.0, 60.0),
        ]);
        assert!(attempt(&left_and_right(), &pool).is_none());
    }

    #[test]
    fn rounded_fills_are_not_bands() {
        let pool = OperationPool::new(vec![
            filled(10.0, 10.0, 16.0, 60.0).with_radii(CornerRadii::uniform(2.0)),
            filled(104.0, 10.0, 110.0, 60.0),
        ]);
        assert!(attempt(&left_and_right(), &pool).is_none());
    }

    #[test]
    fn side_colors_are_checked_per_side() {
        let spec = BorderSpecification::new(
            NodeId(10),
            Rect::new(10.0, 10.0, 100.0, 50.0),
            Sides::new(0.0, 6.0, 0.0, 6.0),
            Sides::new(GRAY, Color::WHITE, GRAY, GRAY),
        )
        .unwrap();
        let pool = OperationPool::new(vec![
            filled(10.0, 10.0, 16.0, 60.0),
            filled(104.0, 10.0, 110.0, 60.0),
        ]);
        assert!(attempt(&spec, &pool).is_none());
    }
}
