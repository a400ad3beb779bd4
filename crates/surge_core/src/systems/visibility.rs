//! VisibilityChanged system: pause the periodic refresh when the view goes
//! to the background, resume it when the view returns.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::scenario::AutoRefresh;

pub fn visibility_changed_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    mut auto: ResMut<AutoRefresh>,
) {
    if event.0.kind != EventKind::VisibilityChanged {
        return;
    }
    let Some(EventSubject::Visibility(visible)) = event.0.subject else {
        return;
    };

    if !visible {
        auto.enabled = false;
        return;
    }

    // Resume under a fresh epoch so ticks scheduled before the pause no
    // longer match, then restart the chain one interval out.
    auto.enabled = true;
    auto.epoch += 1;
    clock.schedule_in_ms(
        auto.interval_ms,
        EventKind::AutoRefreshTick,
        Some(EventSubject::RefreshEpoch(auto.epoch)),
    );
}

#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::{Schedule, World};

    use super::*;
    use crate::scenario::{build_tracker, TrackerParams};

    fn fire_visibility(world: &mut World, timestamp: u64, visible: bool) {
        world.resource_mut::<SimulationClock>().schedule_at(
            timestamp,
            EventKind::VisibilityChanged,
            Some(EventSubject::Visibility(visible)),
        );
        let event = world
            .resource_mut::<SimulationClock>()
            .pop_next()
            .expect("visibility event");
        world.insert_resource(CurrentEvent(event));
        let mut schedule = Schedule::default();
        schedule.add_systems(visibility_changed_system);
        schedule.run(world);
    }

    #[test]
    fn hiding_disables_auto_refresh() {
        let mut world = World::new();
        build_tracker(&mut world, TrackerParams::default().with_seed(42));

        fire_visibility(&mut world, 45_000, false);

        assert!(!world.resource::<AutoRefresh>().enabled);
        assert!(world.resource::<SimulationClock>().is_empty());
    }

    #[test]
    fn showing_bumps_the_epoch_and_restarts_the_chain() {
        let mut world = World::new();
        build_tracker(&mut world, TrackerParams::default().with_seed(42));
        world.resource_mut::<AutoRefresh>().enabled = false;

        fire_visibility(&mut world, 90_000, true);

        let auto = world.resource::<AutoRefresh>();
        assert!(auto.enabled);
        assert_eq!(auto.epoch, 1);
        assert_eq!(
            world.resource::<SimulationClock>().next_event_time(),
            Some(120_000)
        );
    }
}
