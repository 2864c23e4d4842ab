use border_fixtures::{Classification, NodeId, Strategy};

/// What a scene expects the classifier to decide for one specification.
pub struct ClassificationExpectation {
    /// Position of the specification in the scene.
    pub spec_index: usize,
    pub node_id: NodeId,
    /// `None` if the border must stay unmatched.
    pub expected_strategy: Option<Strategy>,
    /// Number of operations the match must consume, if checked.
    pub expected_op_count: Option<usize>,
    /// Human-readable label for failure messages.
    pub label: &'static str,
}

impl ClassificationExpectation {
    pub fn matched(
        spec_index: usize,
        node_id: NodeId,
        strategy: Strategy,
        label: &'static str,
    ) -> Self {
        Self {
            spec_index,
            node_id,
            expected_strategy: Some(strategy),
            expected_op_count: None,
            label,
        }
    }

    pub fn unmatched(spec_index: usize, node_id: NodeId, label: &'static str) -> Self {
        Self {
            spec_index,
            node_id,
            expected_strategy: None,
            expected_op_count: None,
            label,
        }
    }

    pub fn with_op_count(mut self, count: usize) -> Self {
        self.expected_op_count = Some(count);
        self
    }
}

/// Validates classification expectations against the outcome of a run.
///
/// Returns a list of human-readable failure descriptions. An empty list means
/// all expectations passed.
pub fn check_classifications(
    classification: &Classification,
    expectations: &[ClassificationExpectation],
) -> Vec<String> {
    let mut failures = Vec::new();

    for expectation in expectations {
        let node_match = classification.match_for(expectation.spec_index);

        match (node_match, expectation.expected_strategy) {
            (None, None) => {}
            (None, Some(expected)) => failures.push(format!(
                "[{}] node {} expected {} but stayed unmatched",
                expectation.label, expectation.node_id, expected,
            )),
            (Some(node_match), None) => failures.push(format!(
                "[{}] node {} expected to stay unmatched but matched as {}",
                expectation.label,
                expectation.node_id,
                node_match.result.strategy(),
            )),
            (Some(node_match), Some(expected)) => {
                if node_match.node_id != expectation.node_id {
                    failures.push(format!(
                        "[{}] spec {} belongs to node {}, expected node {}",
                        expectation.label,
                        expectation.spec_index,
                        node_match.node_id,
                        expectation.node_id,
                    ));
                }
                let actual = node_match.result.strategy();
                if actual != expected {
                    failures.push(format!(
                        "[{}] node {} expected {} but matched as {}",
                        expectation.label, expectation.node_id, expected, actual,
                    ));
                }
                let consumed = node_match.result.consumed().len();
                if let Some(count) = expectation.expected_op_count {
                    if consumed != count {
                        failures.push(format!(
                            "[{}] node {} consumed {} ops, expected {}",
                            expectation.label, expectation.node_id, consumed, count,
                        ));
                    }
                }
            }
        }
    }

    failures
}
