//! Event-reacting systems: one module per event kind.

pub mod auto_refresh;
pub mod location_resolved;
pub mod manual_refresh;
pub mod refresh_completed;
pub mod tracker_started;
pub mod visibility;

use crate::board::SurgeBoard;
use crate::catalog::ServiceCatalog;
use crate::generator::{generate, LocalTime};
use crate::scenario::{SurgeRng, WallClockEpoch};
use crate::surge::SurgeFactorTable;

/// Regenerate the board at the given simulation time. History recording is
/// left to the caller; refresh events record, location events do not.
pub(crate) fn run_generation(
    now_ms: u64,
    epoch: &WallClockEpoch,
    catalog: &ServiceCatalog,
    table: &SurgeFactorTable,
    rng: &mut SurgeRng,
    board: &mut SurgeBoard,
) {
    let time = LocalTime::from_unix_ms(epoch.0.saturating_add(now_ms as i64));
    let results = generate(catalog, table, time, &mut rng.0);
    board.publish(results, now_ms);
}
