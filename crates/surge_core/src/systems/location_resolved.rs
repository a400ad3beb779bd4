//! LocationResolved system: apply the geolocation outcome and regenerate.

use bevy_ecs::prelude::{Res, ResMut};

use crate::board::SurgeBoard;
use crate::catalog::ServiceCatalog;
use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::location::{LocationPlan, LocationStatus, UserLocation};
use crate::scenario::{SurgeRng, WallClockEpoch};
use crate::surge::SurgeFactorTable;
use crate::systems::run_generation;

pub fn location_resolved_system(
    clock: Res<SimulationClock>,
    event: Res<CurrentEvent>,
    plan: Res<LocationPlan>,
    epoch: Res<WallClockEpoch>,
    catalog: Res<ServiceCatalog>,
    table: Res<SurgeFactorTable>,
    mut rng: ResMut<SurgeRng>,
    mut board: ResMut<SurgeBoard>,
    mut location: ResMut<UserLocation>,
) {
    if event.0.kind != EventKind::LocationResolved {
        return;
    }

    match plan.outcome {
        Ok(position) => {
            location.set_position(position);
            location.status = LocationStatus::Device;
        }
        Err(error) => {
            // Keep the fallback coordinate; the status line carries the case.
            location.status = LocationStatus::Fallback(error);
        }
    }

    // Both outcomes regenerate the board. Only refresh events record history.
    run_generation(clock.now(), &epoch, &catalog, &table, &mut rng, &mut board);
}
