//! ManualRefresh system: debounced user-triggered refresh with simulated
//! latency.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::scenario::{ManualRefreshConfig, RefreshInFlight};

pub fn manual_refresh_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    config: Res<ManualRefreshConfig>,
    mut in_flight: ResMut<RefreshInFlight>,
) {
    if event.0.kind != EventKind::ManualRefresh {
        return;
    }
    // A refresh is already pending; repeated requests are ignored.
    if in_flight.0 {
        return;
    }

    in_flight.0 = true;
    clock.schedule_in_ms(config.latency_ms, EventKind::RefreshCompleted, None);
}

#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::{Schedule, World};

    use super::*;
    use crate::scenario::{build_tracker, TrackerParams};

    fn fire_manual(world: &mut World, timestamp: u64) {
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(timestamp, EventKind::ManualRefresh, None);
        let event = world
            .resource_mut::<SimulationClock>()
            .pop_next()
            .expect("manual event");
        world.insert_resource(CurrentEvent(event));
        let mut schedule = Schedule::default();
        schedule.add_systems(manual_refresh_system);
        schedule.run(world);
    }

    #[test]
    fn manual_refresh_sets_busy_and_schedules_completion() {
        let mut world = World::new();
        build_tracker(&mut world, TrackerParams::default().with_seed(42));

        fire_manual(&mut world, 5_000);

        assert!(world.resource::<RefreshInFlight>().0);
        assert_eq!(
            world.resource::<SimulationClock>().next_event_time(),
            Some(6_500)
        );
    }

    #[test]
    fn second_request_while_in_flight_is_ignored() {
        let mut world = World::new();
        build_tracker(&mut world, TrackerParams::default().with_seed(42));

        fire_manual(&mut world, 5_000);
        fire_manual(&mut world, 5_100);

        // Only the first request's completion is pending.
        assert_eq!(world.resource::<SimulationClock>().pending_event_count(), 1);
        assert_eq!(
            world.resource::<SimulationClock>().next_event_time(),
            Some(6_500)
        );
    }
}
