pub mod economy;

pub use economy::add_economy_systems;
