//! Greedy assignment of paint operations to border specifications.

use ahash::{HashMap, HashMapExt};
use tracing::{debug, info, trace, warn};

use crate::descriptor::CanonicalDescriptor;
use crate::matcher::{default_matchers, BorderMatcher, MatchResult, Strategy};
use crate::pool::{ConsumptionSet, OperationPool};
use crate::{BorderSpecification, NodeId, Tolerances};

/// Tries each matcher in order against a shared pool, claiming what the first successful one
/// picks.
///
/// # Examples
///
/// ```
/// use border_fixtures::{
///     BorderSpecification, Classifier, Color, NodeId, OperationPool, PaintOperation, Rect,
///     Sides, Strategy, Stroke,
/// };
/// use lyon::math::{point, Box2D};
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let spec = BorderSpecification::new(
///     NodeId(1),
///     Rect::new(0.0, 0.0, 100.0, 50.0),
///     Sides::uniform(4.0),
///     Sides::uniform(red),
/// )
/// .unwrap();
/// let pool = OperationPool::new(vec![PaintOperation::stroked_rect(
///     Box2D::new(point(2.0, 2.0), point(98.0, 48.0)),
///     Stroke::new(4.0, red),
/// )]);
///
/// let classification = Classifier::new().classify(&[spec], &pool);
/// assert_eq!(classification.matches()[0].result.strategy(), Strategy::StrokedRect);
/// ```
pub struct Classifier {
    matchers: Vec<Box<dyn BorderMatcher>>,
    tolerances: Tolerances,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// A classifier with the six built-in matchers in priority order and default tolerances.
    pub fn new() -> Self {
        Self {
            matchers: default_matchers(),
            tolerances: Tolerances::default(),
        }
    }

    /// Replaces the matcher list. Matchers are tried in the given order.
    pub fn with_matchers(mut self, matchers: Vec<Box<dyn BorderMatcher>>) -> Self {
        self.matchers = matchers;
        self
    }

    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Matches one specification against the operations not yet in `consumed`, and claims
    /// the operations of the first matcher that succeeds.
    pub fn classify_one(
        &self,
        spec: &BorderSpecification,
        pool: &OperationPool,
        consumed: &mut ConsumptionSet,
    ) -> Option<MatchResult> {
        for matcher in &self.matchers {
            let Some(result) = matcher.attempt(spec, pool, consumed, &self.tolerances) else {
                continue;
            };
            match consumed.claim_all(&result.consumed()) {
                Ok(()) => return Some(result),
                Err(index) => {
                    // Only a misbehaving custom matcher gets here.
                    warn!(
                        "Matcher {} picked operation {} for node {}, which is already claimed",
                        matcher.strategy(),
                        index,
                        spec.node_id()
                    );
                }
            }
        }
        None
    }

    /// Classifies `specs` in order with one consumption set for the whole run.
    ///
    /// Earlier specifications win contested operations; there is no backtracking.
    pub fn classify(&self, specs: &[BorderSpecification], pool: &OperationPool) -> Classification {
        let mut consumed = ConsumptionSet::new();
        let mut classification = Classification::default();

        for (spec_index, spec) in specs.iter().enumerate() {
            match self.classify_one(spec, pool, &mut consumed) {
                Some(result) => {
                    trace!(
                        "Node {} matched as {} using {:?}",
                        spec.node_id(),
                        result.strategy(),
                        result.consumed().as_slice()
                    );
                    classification.matches.push(NodeMatch {
                        spec_index,
                        node_id: spec.node_id(),
                        result,
                    });
                }
                None => {
                    debug!("No paint operations match the border of node {}", spec.node_id());
                    classification.unmatched.push(spec_index);
                }
            }
        }

        info!(
            "Matched {}/{} borders ({} of {} operations consumed): {}",
            classification.matches.len(),
            specs.len(),
            consumed.len(),
            pool.len(),
            classification
                .strategy_counts()
                .iter()
                .map(|(strategy, count)| format!("{strategy}={count}"))
                .collect::<Vec<_>>()
                .join(", ")
        );

        classification
    }
}

/// A specification that found a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMatch {
    /// Position of the specification in the classified list.
    pub spec_index: usize,
    pub node_id: NodeId,
    pub result: MatchResult,
}

/// Outcome of one classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    matches: Vec<NodeMatch>,
    unmatched: Vec<usize>,
}

impl Classification {
    /// Matches in specification order.
    pub fn matches(&self) -> &[NodeMatch] {
        &self.matches
    }

    /// Positions of the specifications no strategy explained.
    pub fn unmatched(&self) -> &[usize] {
        &self.unmatched
    }

    pub fn match_for(&self, spec_index: usize) -> Option<&NodeMatch> {
        self.matches
            .iter()
            .find(|node_match| node_match.spec_index == spec_index)
    }

    /// Match counts per strategy, in priority order, strategies without matches included.
    pub fn strategy_counts(&self) -> Vec<(Strategy, usize)> {
        let mut counts: HashMap<Strategy, usize> = HashMap::new();
        for node_match in &self.matches {
            *counts.entry(node_match.result.strategy()).or_default() += 1;
        }
        Strategy::PRIORITY
            .iter()
            .map(|strategy| (*strategy, counts.get(strategy).copied().unwrap_or(0)))
            .collect()
    }

    /// One descriptor per match, in specification order.
    ///
    /// `specs` and `pool` must be the ones this classification was computed from.
    pub fn descriptors(
        &self,
        specs: &[BorderSpecification],
        pool: &OperationPool,
    ) -> Vec<CanonicalDescriptor> {
        self.matches
            .iter()
            .filter_map(|node_match| {
                let spec = specs.get(node_match.spec_index)?;
                Some(CanonicalDescriptor::from_match(spec, &node_match.result, pool))
            })
            .collect()
    }
}
