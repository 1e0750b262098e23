//! Node entity: manufacturing sites, hubs, breadrooms, and pure frozen
//! storage nodes, distinguished by capability flags rather than a closed
//! type hierarchy (a node can be a hub that also manufactures, etc.).

use crate::cohort::CohortState;
use crate::ids::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Capability flags for a node. Any combination is legal; the invariants
/// that constrain combinations (at least one manufacturing node, every
/// demand node reachable) are checked by [`crate::network::Network::validate`],
/// not by this struct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCapabilities {
    pub can_manufacture: bool,
    pub has_demand: bool,
    pub requires_trucks: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub capabilities: NodeCapabilities,
    /// Storage modes this node can hold inventory in. A pure frozen
    /// cold-store has only `{Frozen}`; most breadrooms have only
    /// `{Ambient}`; a hub may support both.
    pub storage_modes: HashSet<CohortState>,
    /// Daily production rate in units per labor hour, for manufacturing
    /// nodes (§3.1's `ManufacturingSite.production_rate`). `None` for
    /// non-manufacturing nodes.
    pub production_rate_units_per_hour: Option<f64>,
    /// Optional hard ceiling on daily production, independent of the
    /// labor-hours-derived capacity (`ManufacturingSite.max_daily_capacity`
    /// in the original cost model).
    pub max_daily_capacity_units: Option<f64>,
}

impl Node {
    pub fn supports(&self, state: CohortState) -> bool {
        self.storage_modes.contains(&state)
    }

    pub fn is_ambient_only(&self) -> bool {
        self.storage_modes.contains(&CohortState::Ambient)
            && !self.storage_modes.contains(&CohortState::Frozen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_only_breadroom_is_detected() {
        let mut modes = HashSet::new();
        modes.insert(CohortState::Ambient);
        let node = Node {
            id: NodeId::new("6103"),
            name: "Breadroom".into(),
            capabilities: NodeCapabilities {
                has_demand: true,
                ..Default::default()
            },
            storage_modes: modes,
            production_rate_units_per_hour: None,
            max_daily_capacity_units: None,
        };
        assert!(node.is_ambient_only());
        assert!(!node.supports(CohortState::Frozen));
    }
}
