//! # planner-core: domain model for perishable-goods production & distribution planning
//!
//! Provides the fundamental data structures for a cohort-based inventory
//! model: nodes and routes form a directed network, products carry
//! shelf-life rules, and cohorts (inventory, shipment, demand) are tracked
//! by production date so shelf life falls out of index-set membership
//! instead of an explicit constraint.
//!
//! ## Design Philosophy
//!
//! The network is a **directed graph** where:
//! - **Nodes**: manufacturing sites, distribution hubs, breadrooms — any
//!   combination of capabilities via [`node::NodeCapabilities`]
//! - **Edges**: [`route::Route`]s, each fixed to one transport mode
//!   (ambient or frozen)
//!
//! Inventory, in-transit, and demand are never modeled as a single scalar
//! per node/product/date — they are partitioned into **cohorts** keyed by
//! production date, so a unit's remaining shelf life is always derivable
//! from its key rather than tracked as separate state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use planner_core::prelude::*;
//! use std::collections::HashSet;
//!
//! let mut network = Network::new();
//!
//! network.add_node(Node {
//!     id: NodeId::new("6122"),
//!     name: "Manufacturing".to_string(),
//!     capabilities: NodeCapabilities { can_manufacture: true, ..Default::default() },
//!     storage_modes: HashSet::from([CohortState::Ambient, CohortState::Frozen]),
//!     production_rate_units_per_hour: Some(1400.0),
//!     max_daily_capacity_units: None,
//! });
//!
//! network.add_node(Node {
//!     id: NodeId::new("6104"),
//!     name: "Breadroom".to_string(),
//!     capabilities: NodeCapabilities { has_demand: true, ..Default::default() },
//!     storage_modes: HashSet::from([CohortState::Ambient]),
//!     production_rate_units_per_hour: None,
//!     max_daily_capacity_units: None,
//! });
//!
//! network.add_route(Route {
//!     origin: NodeId::new("6122"),
//!     destination: NodeId::new("6104"),
//!     transport_mode: CohortState::Ambient,
//!     transit_days: DaysSpan(1),
//!     cost_per_unit: 0.18,
//! });
//!
//! assert!(network.is_reachable(&NodeId::new("6122"), &NodeId::new("6104")));
//! ```
//!
//! ## Modules
//!
//! - [`diagnostics`] - soft-issue reporting shared by index and model construction
//! - [`network`] - the node/route graph and its structural checks
//! - [`cohort`] - the cohort state machine and tuple-keyed cohort indices
//! - [`ids`], [`units`] - newtype identifiers and unit wrappers
//! - [`node`], [`product`], [`route`], [`forecast`], [`labor`], [`truck`],
//!   [`cost`], [`inventory`] - the planner's domain entities
//! - [`error`] - the unified error type returned by fallible construction and solves

pub mod cohort;
pub mod cost;
pub mod diagnostics;
pub mod error;
pub mod forecast;
pub mod ids;
pub mod inventory;
pub mod labor;
pub mod network;
pub mod node;
pub mod product;
pub mod route;
pub mod truck;
pub mod units;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{PlannerError, PlannerResult};
pub use network::Network;
pub use petgraph::graph::NodeIndex;

/// Common imports for code that works across most of the domain model.
pub mod prelude {
    pub use crate::cohort::{CohortState, DemandCohortKey, InventoryCohortKey, ShipmentCohortKey};
    pub use crate::cost::CostStructure;
    pub use crate::diagnostics::{Diagnostics, Severity};
    pub use crate::error::{PlannerError, PlannerResult};
    pub use crate::forecast::{Forecast, ForecastEntry};
    pub use crate::ids::{NodeId, ProductId, TruckScheduleId};
    pub use crate::inventory::{InventorySnapshot, InventorySnapshotEntry};
    pub use crate::labor::{LaborCalendar, LaborDay};
    pub use crate::network::Network;
    pub use crate::node::{Node, NodeCapabilities};
    pub use crate::product::{
        Product, AMBIENT_SHELF_LIFE_DAYS, DEFAULT_UNITS_PER_PALLET, MIN_FRESHNESS_DAYS,
        THAWED_SHELF_LIFE_DAYS,
    };
    pub use crate::route::{Route, TransportMode};
    pub use crate::truck::{DayPattern, TruckSchedule, TruckScheduleCollection};
    pub use crate::units::{DaysSpan, Pallets, Units};
}
