pub mod build_cost;
pub mod consumption;
pub mod engine;
pub mod ledger;
pub mod priority;
pub mod production;
pub mod queries;
pub mod registry;
pub mod storage;

pub use build_cost::{Affordability, BuildCostLedger, MissingResource};
pub use consumption::{ConsumptionEntry, ConsumptionIndex};
pub use engine::{ConstructionStart, EconomyEngine, ProductionToggle};
pub use ledger::{AdjustOutcome, ResourceLedger};
pub use priority::{Decision, PriorityState};
pub use production::{CycleReport, FullResource, StorageCheck};
pub use queries::ResourceUsage;
pub use registry::BuildingRegistry;
pub use storage::Capacities;
