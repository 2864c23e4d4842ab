use ahash::{HashSet, HashSetExt};

use crate::PaintOperation;

/// The recorded paint operations in backend order. Positions are stable and are what
/// matchers claim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationPool {
    operations: Vec<PaintOperation>,
}

impl OperationPool {
    pub fn new(operations: Vec<PaintOperation>) -> Self {
        Self { operations }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PaintOperation> {
        self.operations.get(index)
    }

    pub fn operations(&self) -> &[PaintOperation] {
        &self.operations
    }

    /// Operations not yet claimed in `consumed`, with their pool positions, in pool order.
    pub fn available<'pool>(
        &'pool self,
        consumed: &'pool ConsumptionSet,
    ) -> impl Iterator<Item = (usize, &'pool PaintOperation)> + 'pool {
        self.operations
            .iter()
            .enumerate()
            .filter(move |(index, _)| !consumed.contains(*index))
    }
}

impl From<Vec<PaintOperation>> for OperationPool {
    fn from(operations: Vec<PaintOperation>) -> Self {
        Self::new(operations)
    }
}

/// Pool positions already assigned to a border during one classification run.
///
/// A position can be claimed once. The set lives for exactly one run; a new run starts with
/// an empty set.
#[derive(Debug, Clone, Default)]
pub struct ConsumptionSet {
    claimed: HashSet<usize>,
}

impl ConsumptionSet {
    pub fn new() -> Self {
        Self {
            claimed: HashSet::new(),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.claimed.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    /// Claims every index in `indices`, or none of them if any is already taken.
    ///
    /// Returns the first conflicting index on failure.
    pub fn claim_all(&mut self, indices: &[usize]) -> Result<(), usize> {
        let mut seen = HashSet::with_capacity(indices.len());
        if let Some(conflict) = indices
            .iter()
            .copied()
            .find(|index| self.claimed.contains(index) || !seen.insert(*index))
        {
            return Err(conflict);
        }
        self.claimed.extend(indices.iter().copied());
        Ok(())
    }
}
