use std::ops::{Deref, DerefMut};

use bevy_ecs::resource::Resource;

use crate::economy::EconomyEngine;

/// The engine as an ECS resource. Systems borrow it through `Res`/`ResMut`;
/// the command applicator takes it out of the world while it works.
#[derive(Resource, Debug, Clone, Default)]
pub struct EconomyState(pub EconomyEngine);

impl Deref for EconomyState {
    type Target = EconomyEngine;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for EconomyState {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
