//! Tracker runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each
//! step pops the next event from [SimulationClock], inserts it as
//! [CurrentEvent], then runs the schedule.

use bevy_ecs::prelude::Res;
use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{CurrentEvent, Event, EventKind, EventSubject, SimulationClock};
use crate::scenario::TrackerEndTimeMs;
use crate::systems::{
    auto_refresh::auto_refresh_system, location_resolved::location_resolved_system,
    manual_refresh::manual_refresh_system, refresh_completed::refresh_completed_system,
    tracker_started::tracker_started_system, visibility::visibility_changed_system,
};

// Condition functions for each event kind
fn is_tracker_started(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::TrackerStarted)
        .unwrap_or(false)
}

fn is_location_resolved(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::LocationResolved)
        .unwrap_or(false)
}

fn is_auto_refresh_tick(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::AutoRefreshTick)
        .unwrap_or(false)
}

fn is_manual_refresh(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::ManualRefresh)
        .unwrap_or(false)
}

fn is_refresh_completed(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::RefreshCompleted)
        .unwrap_or(false)
}

fn is_visibility_changed(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::VisibilityChanged)
        .unwrap_or(false)
}

/// Runs one tracker step: pops the next event, inserts it as [CurrentEvent],
/// then runs the schedule. Returns `true` if an event was processed, `false`
/// if the clock was empty or if the next event is at or past
/// [TrackerEndTimeMs] (when that resource is present).
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let stop_at = world.get_resource::<TrackerEndTimeMs>().map(|e| e.0);
    let next_ts = world
        .get_resource::<SimulationClock>()
        .and_then(|c| c.next_event_time());
    if let (Some(end_ms), Some(ts)) = (stop_at, next_ts) {
        if ts >= end_ms {
            return false;
        }
    }

    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));

    schedule.run(world);
    true
}

/// Runs one tracker step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(world: &mut World, schedule: &mut Schedule, mut hook: F) -> bool
where
    F: FnMut(&World, &Event),
{
    if !run_next_event(world, schedule) {
        return false;
    }
    let event = world.resource::<CurrentEvent>().0;
    hook(world, &event);
    true
}

/// Runs tracker steps until the event queue is empty (or past the end time)
/// or `max_steps` is reached. Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Runs tracker steps until empty and invokes `hook` after each step.
pub fn run_until_empty_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
    mut hook: F,
) -> usize
where
    F: FnMut(&World, &Event),
{
    let mut steps = 0;
    while steps < max_steps && run_next_event_with_hook(world, schedule, &mut hook) {
        steps += 1;
    }
    steps
}

/// Builds the tracker schedule: all event-reacting systems, conditionally
/// executed based on event type.
pub fn tracker_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.add_systems((
        // TrackerStarted
        tracker_started_system.run_if(is_tracker_started),
        // LocationResolved
        location_resolved_system.run_if(is_location_resolved),
        // AutoRefreshTick
        auto_refresh_system.run_if(is_auto_refresh_tick),
        // ManualRefresh
        manual_refresh_system.run_if(is_manual_refresh),
        // RefreshCompleted
        refresh_completed_system.run_if(is_refresh_completed),
        // VisibilityChanged
        visibility_changed_system.run_if(is_visibility_changed),
    ));

    schedule
}

/// Initializes the tracker by scheduling the TrackerStarted event at time 0.
/// Call this after building the tracker and before running events.
pub fn initialize_tracker(world: &mut World) {
    let mut clock = world.resource_mut::<SimulationClock>();
    clock.schedule_at(0, EventKind::TrackerStarted, None);
}

/// Request a manual refresh at the current simulation time. The request is
/// ignored by the system if a refresh is already in flight.
pub fn request_manual_refresh(world: &mut World) {
    let mut clock = world.resource_mut::<SimulationClock>();
    let now = clock.now();
    clock.schedule_at(now, EventKind::ManualRefresh, None);
}

/// Report a visibility change at the current simulation time; hiding pauses
/// the periodic refresh, showing resumes it.
pub fn notify_visibility(world: &mut World, visible: bool) {
    let mut clock = world.resource_mut::<SimulationClock>();
    let now = clock.now();
    clock.schedule_at(
        now,
        EventKind::VisibilityChanged,
        Some(EventSubject::Visibility(visible)),
    );
}
