//! Strategy matchers: each one explains a border specification with one family of paint
//! operation shapes.

mod dotted_lines;
mod double_stroked;
mod draw_line;
mod filled_thin_rect;
mod groove_ridge;
mod stroked_rect;

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::expected::HalfBand;
use crate::geometry::{Side, Sides};
use crate::pool::{ConsumptionSet, OperationPool};
use crate::{BorderSpecification, PaintOperation, Tolerances};

pub use dotted_lines::DottedLinesMatcher;
pub use double_stroked::DoubleStrokedMatcher;
pub use draw_line::DrawLineMatcher;
pub use filled_thin_rect::FilledThinRectMatcher;
pub(crate) use groove_ridge::groove_color_matches;
pub use groove_ridge::GrooveRidgeMatcher;
pub use stroked_rect::StrokedRectMatcher;

/// The ways a border can be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One stroked rect (or rounded rect) centered in the border.
    StrokedRect,
    /// Two concentric stroked rects, for `double` borders.
    DoubleStroked,
    /// One dash-patterned line per side.
    DottedLines,
    /// Two half-thickness filled rects per side, for `groove` and `ridge` borders.
    GrooveRidge,
    /// One stroked line per painted side.
    DrawLine,
    /// One filled rect per painted side.
    FilledThinRect,
}

impl Strategy {
    /// Strategies in the order they are tried. Most specific first: a single stroked rect is
    /// unambiguous, per-side filled rects are the most permissive fallback.
    pub const PRIORITY: [Strategy; 6] = [
        Strategy::StrokedRect,
        Strategy::DoubleStroked,
        Strategy::DottedLines,
        Strategy::GrooveRidge,
        Strategy::DrawLine,
        Strategy::FilledThinRect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::StrokedRect => "stroked_rect",
            Strategy::DoubleStroked => "double_stroked",
            Strategy::DottedLines => "dotted_lines",
            Strategy::GrooveRidge => "groove_ridge",
            Strategy::DrawLine => "draw_line",
            Strategy::FilledThinRect => "filled_thin_rect",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pool positions a match assigned, by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedOps {
    /// The only operation of a single-op strategy.
    Single(usize),
    /// The two stroked rects of a double border.
    Double { outer: usize, inner: usize },
    /// One operation per painted side; unpainted sides are `None`.
    PerSide(Sides<Option<usize>>),
    /// Groove/ridge half bands in [`HalfBand::ALL`] order; unmatched slots are `None`.
    GrooveRidge([Option<usize>; 8]),
}

impl MatchedOps {
    /// `(role, index)` pairs in role order.
    pub fn roles(&self) -> SmallVec<[(String, usize); 8]> {
        match self {
            MatchedOps::Single(index) => SmallVec::from_iter([("single".to_string(), *index)]),
            MatchedOps::Double { outer, inner } => SmallVec::from_iter([
                ("outer".to_string(), *outer),
                ("inner".to_string(), *inner),
            ]),
            MatchedOps::PerSide(sides) => sides
                .iter()
                .filter_map(|(side, index)| Some((side.as_str().to_string(), (*index)?)))
                .collect(),
            MatchedOps::GrooveRidge(slots) => HalfBand::ALL
                .iter()
                .zip(slots)
                .filter_map(|(slot, index)| Some((slot.role(), (*index)?)))
                .collect(),
        }
    }

    /// Every consumed pool position, in role order.
    pub fn consumed(&self) -> SmallVec<[usize; 8]> {
        self.roles().into_iter().map(|(_, index)| index).collect()
    }

    /// The operation whose scene ids stand for the whole match: the single operation, or the
    /// operation in the lexicographically first role.
    pub fn representative(&self) -> Option<usize> {
        self.roles()
            .into_iter()
            .min_by(|(left, _), (right, _)| left.cmp(right))
            .map(|(_, index)| index)
    }

    /// Index matched for `side`, for per-side matches.
    pub fn side(&self, side: Side) -> Option<usize> {
        match self {
            MatchedOps::PerSide(sides) => sides[side],
            _ => None,
        }
    }
}

/// A successful explanation of one border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    strategy: Strategy,
    ops: MatchedOps,
}

impl MatchResult {
    pub fn new(strategy: Strategy, ops: MatchedOps) -> Self {
        Self { strategy, ops }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn ops(&self) -> &MatchedOps {
        &self.ops
    }

    pub fn consumed(&self) -> SmallVec<[usize; 8]> {
        self.ops.consumed()
    }
}

/// One way of explaining a border with paint operations.
///
/// Implementations never pick an index that is already in `consumed`, never pick the same
/// index for two roles, and leave `consumed` untouched; the caller claims the returned
/// indices.
pub trait BorderMatcher: Send + Sync {
    fn strategy(&self) -> Strategy;

    fn attempt(
        &self,
        spec: &BorderSpecification,
        pool: &OperationPool,
        consumed: &ConsumptionSet,
        tolerances: &Tolerances,
    ) -> Option<MatchResult>;
}

/// The six matchers in [`Strategy::PRIORITY`] order.
pub fn default_matchers() -> Vec<Box<dyn BorderMatcher>> {
    vec![
        Box::new(StrokedRectMatcher),
        Box::new(DoubleStrokedMatcher),
        Box::new(DottedLinesMatcher),
        Box::new(GrooveRidgeMatcher),
        Box::new(DrawLineMatcher),
        Box::new(FilledThinRectMatcher),
    ]
}

/// The available operation that fits best.
///
/// `score` returns `None` for operations that do not fit and a deviation for those that do.
/// The smallest deviation wins; ties go to the earlier pool position. Positions in `reserved`
/// are skipped along with consumed ones.
pub(crate) fn best_available(
    pool: &OperationPool,
    consumed: &ConsumptionSet,
    reserved: &[usize],
    mut score: impl FnMut(&PaintOperation) -> Option<f32>,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, operation) in pool.available(consumed) {
        if reserved.contains(&index) {
            continue;
        }
        let Some(deviation) = score(operation) else {
            continue;
        };
        if best.map_or(true, |(_, best_deviation)| deviation < best_deviation) {
            best = Some((index, deviation));
        }
    }
    best.map(|(index, _)| index)
}
