//! The distribution network graph: nodes and directed routes, modeled as a
//! petgraph `DiGraph` the way `gat_core::Network` models a grid as an
//! undirected graph of buses and branches.

use crate::diagnostics::Diagnostics;
use crate::ids::NodeId;
use crate::node::Node;
use crate::route::Route;
use crate::cohort::CohortState;
use petgraph::algo::has_path_connecting;
use petgraph::prelude::*;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// The distribution network: nodes carry manufacturing/storage/demand
/// capabilities, edges carry a route's mode, transit time, and cost.
#[derive(Debug, Default)]
pub struct Network {
    pub graph: DiGraph<Node, Route>,
    index_by_node: HashMap<NodeId, NodeIndex>,
}

impl Network {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index_by_node: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index_by_node.insert(id, idx);
        idx
    }

    pub fn add_route(&mut self, route: Route) -> Option<petgraph::graph::EdgeIndex> {
        let origin = *self.index_by_node.get(&route.origin)?;
        let destination = *self.index_by_node.get(&route.destination)?;
        Some(self.graph.add_edge(origin, destination, route))
    }

    pub fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index_by_node.get(id).copied()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_index(id).map(|idx| &self.graph[idx])
    }

    /// Routes leaving `origin`, for model/index code that needs a route's
    /// cost or transit time rather than just its endpoints and mode.
    pub fn routes_from(&self, origin: &NodeId) -> impl Iterator<Item = &Route> {
        self.node_index(origin)
            .into_iter()
            .flat_map(move |idx| self.graph.edges(idx).map(|e| e.weight()))
    }

    pub fn route(&self, origin: &NodeId, destination: &NodeId, state: CohortState) -> Option<&Route> {
        self.routes_from(origin)
            .find(|r| &r.destination == destination && r.transport_mode == state)
    }

    pub fn manufacturing_nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph
            .node_weights()
            .filter(|n| n.capabilities.can_manufacture)
    }

    pub fn demand_nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph
            .node_weights()
            .filter(|n| n.capabilities.has_demand)
    }

    /// Whether `destination` is reachable from `origin` by following routes
    /// forward in time (any number of hops, any mode).
    pub fn is_reachable(&self, origin: &NodeId, destination: &NodeId) -> bool {
        match (self.node_index(origin), self.node_index(destination)) {
            (Some(from), Some(to)) => {
                has_path_connecting(&self.graph, from, to, None)
            }
            _ => false,
        }
    }

    /// Runs the structural checks implied by §3's network invariants: at
    /// least one manufacturing node exists, and every demand node is
    /// reachable from some manufacturing node. Neither failure prevents
    /// downstream construction by itself — both are recorded as diagnostics,
    /// not returned as hard errors, since a demand node with no route simply
    /// produces guaranteed shortages rather than an invalid model.
    pub fn validate_into(&self, diag: &mut Diagnostics) {
        let manufacturing: Vec<&Node> = self.manufacturing_nodes().collect();
        if manufacturing.is_empty() {
            diag.add_error("structure", "network has no manufacturing node");
            return;
        }

        for demand_node in self.demand_nodes() {
            let reachable = manufacturing
                .iter()
                .any(|m| self.is_reachable(&m.id, &demand_node.id));
            if !reachable {
                diag.add_warning_with_entity(
                    "reachability",
                    "demand node is not reachable from any manufacturing node",
                    &demand_node.id.to_string(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::CohortState;
    use crate::node::NodeCapabilities;
    use crate::units::DaysSpan;
    use std::collections::HashSet;

    fn manufacturing_node(id: &str) -> Node {
        Node {
            id: NodeId::new(id),
            name: id.to_string(),
            capabilities: NodeCapabilities {
                can_manufacture: true,
                ..Default::default()
            },
            storage_modes: HashSet::from([CohortState::Ambient, CohortState::Frozen]),
            production_rate_units_per_hour: Some(1400.0),
            max_daily_capacity_units: None,
        }
    }

    fn demand_node(id: &str) -> Node {
        Node {
            id: NodeId::new(id),
            name: id.to_string(),
            capabilities: NodeCapabilities {
                has_demand: true,
                ..Default::default()
            },
            storage_modes: HashSet::from([CohortState::Ambient]),
            production_rate_units_per_hour: None,
            max_daily_capacity_units: None,
        }
    }

    #[test]
    fn demand_node_with_no_route_is_flagged_unreachable() {
        let mut network = Network::new();
        network.add_node(manufacturing_node("6122"));
        network.add_node(demand_node("6104"));

        let mut diag = Diagnostics::new();
        network.validate_into(&mut diag);
        assert_eq!(diag.warning_count(), 1);
    }

    #[test]
    fn connected_demand_node_passes_validation() {
        let mut network = Network::new();
        network.add_node(manufacturing_node("6122"));
        network.add_node(demand_node("6104"));
        network.add_route(Route {
            origin: NodeId::new("6122"),
            destination: NodeId::new("6104"),
            transport_mode: CohortState::Ambient,
            transit_days: DaysSpan(1),
            cost_per_unit: 0.1,
        });

        let mut diag = Diagnostics::new();
        network.validate_into(&mut diag);
        assert_eq!(diag.warning_count(), 0);
        assert_eq!(diag.error_count(), 0);
    }

    #[test]
    fn network_with_no_manufacturing_node_is_an_error() {
        let mut network = Network::new();
        network.add_node(demand_node("6104"));

        let mut diag = Diagnostics::new();
        network.validate_into(&mut diag);
        assert_eq!(diag.error_count(), 1);
    }
}
