pub mod board;
pub mod catalog;
pub mod clock;
pub mod generator;
#[cfg(feature = "geolocate")]
pub mod geolocate;
pub mod location;
pub mod runner;
pub mod scenario;
pub mod surge;
pub mod systems;
pub mod telemetry_export;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
