use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::building::BuildingKey;
use super::resource::ResourceId;

/// Why a labor resource is held by a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AllocationPurpose {
    /// Workforce on a construction site, returned when construction completes.
    Build,
    /// Workforce staffing production, held while production is switched on.
    Operate,
}

impl Serialize for AllocationPurpose {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = match self {
            AllocationPurpose::Build => "build",
            AllocationPurpose::Operate => "operate",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for AllocationPurpose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "build" => Ok(AllocationPurpose::Build),
            "operate" => Ok(AllocationPurpose::Operate),
            other => Err(de::Error::custom(format!(
                "unknown allocation purpose `{other}`"
            ))),
        }
    }
}

/// Opaque ticket for one outstanding labor allocation.
///
/// Returned by labor deductions; handing it back closes the allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationHandle(pub(crate) u64);

impl AllocationHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// An outstanding labor allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub handle: AllocationHandle,
    pub resource_id: ResourceId,
    pub amount: f64,
    pub building_key: BuildingKey,
    pub purpose: AllocationPurpose,
}
