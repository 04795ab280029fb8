use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for one economy tick.
/// Run manually via `app.world_mut().run_schedule(EconomyTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EconomyTick;

/// Ordered phases within each tick.
/// Phases run in declaration order: PreUpdate < Update < PostUpdate < Reactions < Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EconomyPhase {
    PreUpdate,
    Update,
    PostUpdate,
    Reactions,
    Last,
}

/// Stages within `EconomyPhase::Update`.
///
/// ```text
/// Commands → Evaluation → Production → Decay
/// ```
///
/// Collaborator commands land before evaluation so that a construction
/// event and a priority pass in the same tick never interleave.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EconomySet {
    Commands,
    Evaluation,
    Production,
    Decay,
}

/// Build the tick schedule. The economy has exactly one mutator, so the
/// single-threaded executor is the only one offered.
pub fn configure_economy_schedule() -> Schedule {
    let mut schedule = Schedule::new(EconomyTick);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.configure_sets(
        (
            EconomyPhase::PreUpdate,
            EconomyPhase::Update,
            EconomyPhase::PostUpdate,
            EconomyPhase::Reactions,
            EconomyPhase::Last,
        )
            .chain(),
    );
    schedule.configure_sets(
        (
            EconomySet::Commands,
            EconomySet::Evaluation,
            EconomySet::Production,
            EconomySet::Decay,
        )
            .chain()
            .in_set(EconomyPhase::Update),
    );
    schedule.add_systems(advance_clock.in_set(EconomyPhase::Last));
    schedule
}
