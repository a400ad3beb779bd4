//! RefreshCompleted system: a manual refresh finishes after its simulated
//! latency.

use bevy_ecs::prelude::{Res, ResMut};

use crate::board::{SurgeBoard, SurgeHistory};
use crate::catalog::ServiceCatalog;
use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::scenario::{RefreshInFlight, SurgeRng, WallClockEpoch};
use crate::surge::SurgeFactorTable;
use crate::systems::run_generation;

pub fn refresh_completed_system(
    clock: Res<SimulationClock>,
    event: Res<CurrentEvent>,
    epoch: Res<WallClockEpoch>,
    catalog: Res<ServiceCatalog>,
    table: Res<SurgeFactorTable>,
    mut rng: ResMut<SurgeRng>,
    mut board: ResMut<SurgeBoard>,
    mut history: ResMut<SurgeHistory>,
    mut in_flight: ResMut<RefreshInFlight>,
) {
    if event.0.kind != EventKind::RefreshCompleted {
        return;
    }

    let now = clock.now();
    run_generation(now, &epoch, &catalog, &table, &mut rng, &mut board);
    history.record(now, &board.results);
    in_flight.0 = false;
}
