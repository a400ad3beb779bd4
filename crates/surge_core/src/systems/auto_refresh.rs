//! AutoRefreshTick system: periodic regeneration while the view is visible.

use bevy_ecs::prelude::{Res, ResMut};

use crate::board::{SurgeBoard, SurgeHistory};
use crate::catalog::ServiceCatalog;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::scenario::{AutoRefresh, SurgeRng, WallClockEpoch};
use crate::surge::SurgeFactorTable;
use crate::systems::run_generation;

pub fn auto_refresh_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    auto: Res<AutoRefresh>,
    epoch: Res<WallClockEpoch>,
    catalog: Res<ServiceCatalog>,
    table: Res<SurgeFactorTable>,
    mut rng: ResMut<SurgeRng>,
    mut board: ResMut<SurgeBoard>,
    mut history: ResMut<SurgeHistory>,
) {
    if event.0.kind != EventKind::AutoRefreshTick {
        return;
    }
    let Some(EventSubject::RefreshEpoch(tick_epoch)) = event.0.subject else {
        return;
    };
    // Ticks scheduled before a pause carry a stale epoch; drop them without
    // rescheduling so the cadence never doubles after a resume.
    if !auto.enabled || tick_epoch != auto.epoch {
        return;
    }

    let now = clock.now();
    run_generation(now, &epoch, &catalog, &table, &mut rng, &mut board);
    history.record(now, &board.results);

    clock.schedule_in_ms(
        auto.interval_ms,
        EventKind::AutoRefreshTick,
        Some(EventSubject::RefreshEpoch(auto.epoch)),
    );
}
