pub mod allocation;
pub mod building;
pub mod resource;
pub mod snapshot;

pub use allocation::{Allocation, AllocationHandle, AllocationPurpose};
pub use building::{BuildingDefinition, BuildingKey, PlacedBuilding};
pub use resource::{Resource, ResourceAmount, ResourceId};
pub use snapshot::{EconomySnapshot, ResourceBalance};
