//! TrackerStarted system: initial generation, first auto tick, and the
//! location request.

use bevy_ecs::prelude::{Res, ResMut};

use crate::board::{SurgeBoard, SurgeHistory};
use crate::catalog::ServiceCatalog;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::location::LocationPlan;
use crate::scenario::{AutoRefresh, SurgeRng, WallClockEpoch};
use crate::surge::SurgeFactorTable;
use crate::systems::run_generation;

pub fn tracker_started_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    auto: Res<AutoRefresh>,
    plan: Res<LocationPlan>,
    epoch: Res<WallClockEpoch>,
    catalog: Res<ServiceCatalog>,
    table: Res<SurgeFactorTable>,
    mut rng: ResMut<SurgeRng>,
    mut board: ResMut<SurgeBoard>,
    mut history: ResMut<SurgeHistory>,
) {
    if event.0.kind != EventKind::TrackerStarted {
        return;
    }

    let now = clock.now();
    run_generation(now, &epoch, &catalog, &table, &mut rng, &mut board);
    history.record(now, &board.results);

    if auto.enabled {
        clock.schedule_in_ms(
            auto.interval_ms,
            EventKind::AutoRefreshTick,
            Some(EventSubject::RefreshEpoch(auto.epoch)),
        );
    }
    clock.schedule_in_ms(plan.resolve_after_ms, EventKind::LocationResolved, None);
}

#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::{Schedule, World};

    use super::*;
    use crate::clock::Event;
    use crate::scenario::{build_tracker, TrackerParams};

    #[test]
    fn startup_generates_and_schedules_tick_and_location() {
        let mut world = World::new();
        build_tracker(&mut world, TrackerParams::default().with_seed(42));

        assert!(
            world.resource::<SimulationClock>().is_empty(),
            "clock starts empty"
        );

        world.insert_resource(CurrentEvent(Event {
            timestamp: 0,
            kind: EventKind::TrackerStarted,
            subject: None,
        }));

        let mut schedule = Schedule::default();
        schedule.add_systems(tracker_started_system);
        schedule.run(&mut world);

        assert_eq!(world.resource::<SurgeBoard>().results.len(), 5);
        assert_eq!(world.resource::<SurgeHistory>().len(), 1);

        let clock = world.resource::<SimulationClock>();
        assert_eq!(clock.pending_event_count(), 2);
        assert_eq!(clock.next_event_time(), Some(1_000), "location resolves first");
    }
}
