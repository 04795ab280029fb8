pub mod config;
pub mod economy;
pub mod ecs;
pub mod id;
pub mod model;
pub mod scenario;

pub use config::{ConfigError, EconomyConfig};
pub use economy::{
    Affordability, BuildCostLedger, Capacities, ConstructionStart, CycleReport, Decision,
    EconomyEngine, ProductionToggle, ResourceLedger, StorageCheck,
};
pub use id::HandleGenerator;
pub use model::{
    Allocation, AllocationHandle, AllocationPurpose, BuildingDefinition, BuildingKey,
    EconomySnapshot, PlacedBuilding, Resource, ResourceAmount, ResourceBalance, ResourceId,
};
pub use scenario::Scenario;
