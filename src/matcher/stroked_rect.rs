use super::{best_available, BorderMatcher, MatchResult, MatchedOps, Strategy};
use crate::geometry::CornerRadii;
use crate::pool::{ConsumptionSet, OperationPool};
use crate::util::{edge_distance, edges_within, within};
use crate::{BorderSpecification, PaintOperation, Tolerances};

/// A uniform border painted as one stroked rect, inset by half the border width so the
/// stroke exactly covers the border band.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokedRectMatcher;

impl BorderMatcher for StrokedRectMatcher {
    fn strategy(&self) -> Strategy {
        Strategy::StrokedRect
    }

    fn attempt(
        &self,
        spec: &BorderSpecification,
        pool: &OperationPool,
        consumed: &ConsumptionSet,
        tolerances: &Tolerances,
    ) -> Option<MatchResult> {
        let width = spec.uniform_width()?;
        let expected_rect = spec.rect().inset(width / 2.0);
        let expected_radii = spec.radii().map(|radii| radii.shrunk_for_stroke(width));
        let color = spec.primary_color();

        let index = best_available(pool, consumed, &[], |operation| {
            let PaintOperation::StrokedRect(op) = operation else {
                return None;
            };
            let fits = within(op.stroke.width, width, tolerances.stroke_width)
                && edges_within(&op.rect, &expected_rect, tolerances.geometry)
                && op.stroke.color.approx_eq(&color, tolerances.color)
                && radii_fit(
                    expected_radii.as_ref(),
                    op.radii.as_ref(),
                    tolerances.radius,
                );
            fits.then(|| edge_distance(&op.rect, &expected_rect))
        })?;

        Some(MatchResult::new(
            Strategy::StrokedRect,
            MatchedOps::Single(index),
        ))
    }
}

/// A border with radii needs a rounded rect with matching radii. A border without radii also
/// accepts a rounded rect: backends emit those for radii too small to show.
fn radii_fit(expected: Option<&CornerRadii>, actual: Option<&CornerRadii>, tolerance: f32) -> bool {
    match (expected, actual) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(expected), Some(actual)) => {
            expected.len() == actual.len()
                && expected
                    .values()
                    .iter()
                    .zip(actual.values())
                    .all(|(expected, actual)| within(*actual, *expected, tolerance))
        }
    }
}
