use smallvec::SmallVec;

use super::{best_available, BorderMatcher, MatchResult, MatchedOps, Strategy};
use crate::expected::{half_band, HalfBand};
use crate::pool::{ConsumptionSet, OperationPool};
use crate::util::{edge_distance, edges_within, within};
use crate::{BorderSpecification, Color, PaintOperation, Tolerances};

const DARK_FACTORS: std::ops::RangeInclusive<f32> = 0.6..=0.75;
const LIGHT_FACTOR: f32 = 0.9;

/// A uniform `groove` or `ridge` border painted as two half-thickness filled rects per side,
/// one darker and one lighter than the border color.
///
/// Backends skip or merge some of the eight strips depending on corner joins, so the match
/// succeeds once [`Tolerances::groove_ridge_min_parts`] slots are found.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrooveRidgeMatcher;

impl BorderMatcher for GrooveRidgeMatcher {
    fn strategy(&self) -> Strategy {
        Strategy::GrooveRidge
    }

    fn attempt(
        &self,
        spec: &BorderSpecification,
        pool: &OperationPool,
        consumed: &ConsumptionSet,
        tolerances: &Tolerances,
    ) -> Option<MatchResult> {
        let width = spec.uniform_width()?;
        let base = spec.primary_color();

        let mut slots = [None; 8];
        let mut reserved: SmallVec<[usize; 8]> = SmallVec::new();
        for (slot, matched) in HalfBand::ALL.iter().zip(slots.iter_mut()) {
            let expected = half_band(spec.rect(), *slot, width);
            let index = best_available(pool, consumed, &reserved, |operation| {
                let PaintOperation::FilledRect(op) = operation else {
                    return None;
                };
                let fits = edges_within(&op.rect, &expected, tolerances.geometry)
                    && groove_color_matches(&op.color, &base, tolerances.color);
                fits.then(|| edge_distance(&op.rect, &expected))
            });
            if let Some(index) = index {
                reserved.push(index);
                *matched = Some(index);
            }
        }

        if reserved.len() < tolerances.groove_ridge_min_parts.max(1) {
            return None;
        }
        Some(MatchResult::new(
            Strategy::GrooveRidge,
            MatchedOps::GrooveRidge(slots),
        ))
    }
}

/// True if `candidate` is the border color itself, its darkened shade (every rgb channel
/// scaled into `0.6..=0.75`), or its lightened shade (every rgb channel at least 0.9 of the
/// base). Alpha must match in all three cases.
pub(crate) fn groove_color_matches(candidate: &Color, base: &Color, tolerance: f32) -> bool {
    if !within(candidate.a, base.a, tolerance) {
        return false;
    }
    let lighter = [
        (candidate.r, base.r),
        (candidate.g, base.g),
        (candidate.b, base.b),
    ]
    .into_iter()
    .all(|(channel, base)| channel >= base * LIGHT_FACTOR - tolerance);

    candidate.approx_eq(base, tolerance)
        || candidate.is_scaled_from(base, DARK_FACTORS, tolerance)
        || lighter
}

#[cfg(test)]
mod tests {
    use super::{groove_color_matches, GrooveRidgeMatcher};
    use crate::expected::{half_band, side_band, HalfBand};
    use crate::matcher::{BorderMatcher, MatchedOps, Strategy};
    use crate::pool::{ConsumptionSet, OperationPool};
    use crate::{
        BorderSpecification, Classifier, Color, NodeId, PaintOperation, Rect, Side, Sides,
        Tolerances,
    };

    const BASE: Color = Color::rgb(0.8, 0.4, 0.2);
    const DARK: Color = Color::rgb(0.56, 0.28, 0.14);
    const LIGHT: Color = Color::rgb(0.96, 0.48, 0.24);
    const RECT: Rect = Rect::new(0.0, 0.0, 100.0, 50.0);

    fn spec() -> BorderSpecification {
        BorderSpecification::new(NodeId(11), RECT, Sides::uniform(6.0), Sides::uniform(BASE))
            .unwrap()
    }

    /// The first `count` half bands, outer halves dark and inner halves light.
    fn strips(count: usize) -> OperationPool {
        HalfBand::ALL
            .iter()
            .take(count)
            .enumerate()
            .map(|(index, slot)| {
                let color = if index % 2 == 0 { DARK } else { LIGHT };
                PaintOperation::filled_rect(half_band(&RECT, *slot, 6.0), color)
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn attempt(pool: &OperationPool, tolerances: &Tolerances) -> Option<MatchedOps> {
        GrooveRidgeMatcher
            .attempt(&spec(), pool, &ConsumptionSet::new(), tolerances)
            .map(|result| *result.ops())
    }

    #[test]
    fn all_eight_strips_fill_every_slot() {
        let matched = attempt(&strips(8), &Tolerances::default());
        let expected: [Option<usize>; 8] = std::array::from_fn(Some);
        assert_eq!(matched, Some(MatchedOps::GrooveRidge(expected)));
    }

    #[test]
    fn four_strips_are_enough_three_are_not() {
        let Some(MatchedOps::GrooveRidge(slots)) = attempt(&strips(4), &Tolerances::default())
        else {
            panic!("four strips should match");
        };
        assert_eq!(slots.iter().flatten().count(), 4);
        assert!(attempt(&strips(3), &Tolerances::default()).is_none());
    }

    #[test]
    fn minimum_part_count_is_configurable() {
        let strict = Tolerances::default().with_groove_ridge_min_parts(8);
        assert!(attempt(&strips(6), &strict).is_none());
        let lenient = Tolerances::default().with_groove_ridge_min_parts(2);
        assert!(attempt(&strips(2), &lenient).is_some());
    }

    /// A thin solid border painted as four full-side bands: each band sits within geometry
    /// tolerance of one half band, so four slots fill and groove/ridge claims it ahead of
    /// filled_thin_rect. At width 6 the bands are too far from the halves.
    #[test]
    fn thin_solid_bands_are_taken_as_groove_ridge() {
        let classify = |width: f32| {
            let widths = Sides::uniform(width);
            let spec =
                BorderSpecification::new(NodeId(12), RECT, widths, Sides::uniform(BASE)).unwrap();
            let pool: OperationPool = Side::ALL
                .iter()
                .map(|side| PaintOperation::filled_rect(side_band(&RECT, *side, width), BASE))
                .collect::<Vec<_>>()
                .into();
            Classifier::new()
                .classify(std::slice::from_ref(&spec), &pool)
                .match_for(0)
                .map(|node_match| node_match.result.strategy())
        };

        assert_eq!(classify(4.0), Some(Strategy::GrooveRidge));
        assert_eq!(classify(6.0), Some(Strategy::FilledThinRect));
    }

    #[test]
    fn shades_of_the_border_color_are_accepted() {
        assert!(groove_color_matches(&BASE, &BASE, 0.01));
        assert!(groove_color_matches(&DARK, &BASE, 0.01));
        assert!(groove_color_matches(&LIGHT, &BASE, 0.01));
        assert!(!groove_color_matches(&Color::rgb(0.0, 0.0, 1.0), &BASE, 0.01));
        assert!(!groove_color_matches(
            &Color::rgba(0.56, 0.28, 0.14, 0.5),
            &BASE,
            0.01
        ));
    }
}
