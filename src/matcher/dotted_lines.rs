use super::draw_line::match_side_lines;
use super::{BorderMatcher, MatchResult, MatchedOps, Strategy};
use crate::pool::{ConsumptionSet, OperationPool};
use crate::{BorderSpecification, Tolerances};

/// A uniform dotted or dashed border drawn as four dash-patterned lines, one per side.
///
/// Backends start and end dash patterns on whole dashes, so line endpoints drift further
/// from the midline ends than solid lines do; geometry is checked with
/// [`Tolerances::dash_geometry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedLinesMatcher;

impl BorderMatcher for DottedLinesMatcher {
    fn strategy(&self) -> Strategy {
        Strategy::DottedLines
    }

    fn attempt(
        &self,
        spec: &BorderSpecification,
        pool: &OperationPool,
        consumed: &ConsumptionSet,
        tolerances: &Tolerances,
    ) -> Option<MatchResult> {
        if spec.uniform_width().is_none() || !spec.has_dash_pattern() {
            return None;
        }
        let sides = match_side_lines(spec, pool, consumed, tolerances.dash_geometry, tolerances)?;
        Some(MatchResult::new(
            Strategy::DottedLines,
            MatchedOps::PerSide(sides),
        ))
    }
}
