use std::collections::HashMap;

use crate::model::{BuildingKey, PlacedBuilding};

/// Placed buildings in placement order, indexed by key.
///
/// Placement order is what the consumption index uses to break ties, so it
/// must survive removals unchanged.
#[derive(Debug, Clone, Default)]
pub struct BuildingRegistry {
    buildings: Vec<PlacedBuilding>,
    slots: HashMap<BuildingKey, usize>,
}

impl BuildingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a building. Returns `false` (and changes nothing) if the key is taken.
    pub fn insert(&mut self, building: PlacedBuilding) -> bool {
        if self.slots.contains_key(&building.key) {
            return false;
        }
        self.slots.insert(building.key, self.buildings.len());
        self.buildings.push(building);
        true
    }

    pub fn remove(&mut self, key: BuildingKey) -> Option<PlacedBuilding> {
        let slot = self.slots.remove(&key)?;
        let removed = self.buildings.remove(slot);
        for later in &self.buildings[slot..] {
            if let Some(s) = self.slots.get_mut(&later.key) {
                *s -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, key: BuildingKey) -> Option<&PlacedBuilding> {
        self.slots.get(&key).map(|&slot| &self.buildings[slot])
    }

    pub fn get_mut(&mut self, key: BuildingKey) -> Option<&mut PlacedBuilding> {
        self.slots.get(&key).map(|&slot| &mut self.buildings[slot])
    }

    pub fn contains(&self, key: BuildingKey) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedBuilding> {
        self.buildings.iter()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

impl<'a> IntoIterator for &'a BuildingRegistry {
    type Item = &'a PlacedBuilding;
    type IntoIter = std::slice::Iter<'a, PlacedBuilding>;

    fn into_iter(self) -> Self::IntoIter {
        self.buildings.iter()
    }
}
