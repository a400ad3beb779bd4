//! Tracker setup: run parameters and world resources.

use bevy_ecs::prelude::{Resource, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{SurgeBoard, SurgeHistory};
use crate::catalog::ServiceCatalog;
use crate::clock::SimulationClock;
use crate::location::{LocationPlan, UserLocation};
use crate::surge::SurgeFactorTable;

/// Default auto-refresh interval: 30 s.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30_000;

/// Default simulated latency of a manual refresh.
pub const DEFAULT_MANUAL_LATENCY_MS: u64 = 1_500;

/// Default wall-clock epoch for hour/day derivation:
/// 2024-01-01 00:00:00 UTC, a Monday.
pub const DEFAULT_EPOCH_MS: i64 = 1_704_067_200_000;

/// Periodic refresh state. The epoch counter invalidates ticks scheduled
/// before a pause: a tick only fires if its epoch still matches.
#[derive(Debug, Clone, Copy, Resource)]
pub struct AutoRefresh {
    pub enabled: bool,
    pub interval_ms: u64,
    pub epoch: u64,
}

/// Busy flag: set while a manual refresh is pending completion.
#[derive(Debug, Default, Clone, Copy, Resource)]
pub struct RefreshInFlight(pub bool);

/// Manual refresh configuration.
#[derive(Debug, Clone, Copy, Resource)]
pub struct ManualRefreshConfig {
    pub latency_ms: u64,
}

impl Default for ManualRefreshConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_MANUAL_LATENCY_MS,
        }
    }
}

/// Seeded RNG behind all surge draws.
#[derive(Debug, Resource)]
pub struct SurgeRng(pub StdRng);

/// Wall-clock time (unix ms) corresponding to simulation time 0.
#[derive(Debug, Clone, Copy, Resource)]
pub struct WallClockEpoch(pub i64);

/// The runner stops once the next event is at or past this simulation time.
#[derive(Debug, Clone, Copy, Resource)]
pub struct TrackerEndTimeMs(pub u64);

/// Parameters for building a tracker world.
#[derive(Debug, Clone)]
pub struct TrackerParams {
    /// Random seed for reproducibility (optional; if None, uses entropy).
    pub seed: Option<u64>,
    pub refresh_interval_ms: u64,
    pub manual_latency_ms: u64,
    pub epoch_ms: i64,
    /// Simulation end time; the tick chain never drains on its own.
    pub end_time_ms: Option<u64>,
    pub location: LocationPlan,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            seed: None,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            manual_latency_ms: DEFAULT_MANUAL_LATENCY_MS,
            epoch_ms: DEFAULT_EPOCH_MS,
            end_time_ms: None,
            location: LocationPlan::default(),
        }
    }
}

impl TrackerParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_refresh_interval_secs(mut self, secs: u64) -> Self {
        self.refresh_interval_ms = secs * 1_000;
        self
    }

    pub fn with_duration_secs(mut self, secs: u64) -> Self {
        self.end_time_ms = Some(secs * 1_000);
        self
    }

    pub fn with_epoch_ms(mut self, epoch_ms: i64) -> Self {
        self.epoch_ms = epoch_ms;
        self
    }

    pub fn with_location_plan(mut self, plan: LocationPlan) -> Self {
        self.location = plan;
        self
    }
}

/// Populates `world` with the clock, catalog, factor table, board, history,
/// location, and refresh resources. Caller must have already created `world`.
pub fn build_tracker(world: &mut World, params: TrackerParams) {
    world.insert_resource(SimulationClock::default());
    world.insert_resource(ServiceCatalog::default());
    world.insert_resource(SurgeFactorTable::default());
    world.insert_resource(SurgeBoard::default());
    world.insert_resource(SurgeHistory::default());
    world.insert_resource(UserLocation::default());
    world.insert_resource(params.location);
    world.insert_resource(AutoRefresh {
        enabled: true,
        interval_ms: params.refresh_interval_ms,
        epoch: 0,
    });
    world.insert_resource(RefreshInFlight::default());
    world.insert_resource(ManualRefreshConfig {
        latency_ms: params.manual_latency_ms,
    });
    world.insert_resource(WallClockEpoch(params.epoch_ms));

    let rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    world.insert_resource(SurgeRng(rng));

    if let Some(end_time_ms) = params.end_time_ms {
        world.insert_resource(TrackerEndTimeMs(end_time_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_tracker_inserts_core_resources() {
        let mut world = World::new();
        build_tracker(&mut world, TrackerParams::default().with_seed(42));

        assert!(world.get_resource::<SimulationClock>().is_some());
        assert_eq!(world.resource::<ServiceCatalog>().len(), 5);
        assert!(world.resource::<SurgeBoard>().results.is_empty());
        assert!(world.resource::<SurgeHistory>().is_empty());

        let auto = world.resource::<AutoRefresh>();
        assert!(auto.enabled);
        assert_eq!(auto.interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
        assert_eq!(auto.epoch, 0);
        assert!(!world.resource::<RefreshInFlight>().0);
    }

    #[test]
    fn duration_installs_an_end_time() {
        let mut world = World::new();
        build_tracker(
            &mut world,
            TrackerParams::default().with_duration_secs(300),
        );
        assert_eq!(world.resource::<TrackerEndTimeMs>().0, 300_000);
    }
}
