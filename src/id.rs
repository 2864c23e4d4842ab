use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a layout node, opaque to matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Property-tree state a paint operation was recorded under.
///
/// The values are never interpreted; they are copied from a matched operation into the
/// descriptor so the painter under test can be driven with the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SceneIds {
    pub transform_id: i64,
    pub clip_id: i64,
    pub effect_id: i64,
}

impl SceneIds {
    pub const fn new(transform_id: i64, clip_id: i64, effect_id: i64) -> Self {
        Self {
            transform_id,
            clip_id,
            effect_id,
        }
    }
}

impl fmt::Display for SceneIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform {} / clip {} / effect {}",
            self.transform_id, self.clip_id, self.effect_id
        )
    }
}
