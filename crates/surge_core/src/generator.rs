//! Surge data generator: a time-of-day baseline plus per-service randomization.
//!
//! Pure function of its inputs and random draws; callers own the RNG so runs
//! are reproducible under a fixed seed.

use rand::Rng;

use crate::catalog::ServiceCatalog;
use crate::surge::{surge_price, ServiceSurgeResult, SurgeFactorTable, SurgeLevel};

/// Hour-of-day and day-of-week snapshot used to derive the baseline level.
///
/// Day-of-week uses Sunday = 0 .. Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    hour: u8,
    day_of_week: u8,
}

impl LocalTime {
    pub fn new(hour: u8, day_of_week: u8) -> Result<Self, String> {
        if hour > 23 {
            return Err(format!("hour must be 0-23, got {hour}"));
        }
        if day_of_week > 6 {
            return Err(format!("day of week must be 0-6, got {day_of_week}"));
        }
        Ok(Self { hour, day_of_week })
    }

    /// Derive hour/day from unix milliseconds (UTC).
    pub fn from_unix_ms(unix_ms: i64) -> Self {
        let total_secs = unix_ms.div_euclid(1000);
        // Unix epoch (1970-01-01) was a Thursday, which is day 4 when Sunday = 0.
        let days_since_epoch = total_secs.div_euclid(86_400);
        let day_of_week = (days_since_epoch + 4).rem_euclid(7) as u8;
        let secs_in_day = total_secs.rem_euclid(86_400);
        let hour = (secs_in_day / 3_600) as u8;
        Self { hour, day_of_week }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    pub fn is_weekend(&self) -> bool {
        self.day_of_week == 0 || self.day_of_week == 6
    }
}

/// Baseline surge level for the given time. Branches are checked in priority
/// order; only the first match applies.
pub fn baseline_level<R: Rng>(time: LocalTime, rng: &mut R) -> SurgeLevel {
    let hour = time.hour();
    if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
        // Rush windows apply on any day of the week.
        if rng.gen::<f64>() > 0.5 {
            SurgeLevel::Moderate
        } else {
            SurgeLevel::High
        }
    } else if time.is_weekend() && (hour >= 23 || hour <= 2) {
        if rng.gen::<f64>() > 0.3 {
            SurgeLevel::High
        } else {
            SurgeLevel::Extreme
        }
    } else if hour >= 22 || hour <= 6 {
        if rng.gen::<f64>() > 0.7 {
            SurgeLevel::Light
        } else {
            SurgeLevel::Normal
        }
    } else {
        SurgeLevel::Normal
    }
}

/// Generate one result per catalog entry, in catalog order.
///
/// Per entry, three draws in a fixed order: the service-bias draw, the
/// uniform level pick, and the override gate. The override gate (> 0.7)
/// replaces the level outright with the uniform pick, discarding the time
/// and service bias for that entry.
pub fn generate<R: Rng>(
    catalog: &ServiceCatalog,
    table: &SurgeFactorTable,
    time: LocalTime,
    rng: &mut R,
) -> Vec<ServiceSurgeResult> {
    let baseline = baseline_level(time, rng);

    catalog
        .services()
        .iter()
        .map(|service| {
            let bias_draw = rng.gen::<f64>();
            let mut level = baseline;

            if service.is_pooled() {
                // Shared rides stay cheap: light at most, baseline discarded.
                level = if bias_draw > 0.8 {
                    SurgeLevel::Light
                } else {
                    SurgeLevel::Normal
                };
            } else if service.is_premium() && bias_draw > 0.6 && level == SurgeLevel::Extreme {
                level = SurgeLevel::High;
            }

            let pick = SurgeLevel::ALL[(rng.gen::<f64>() * SurgeLevel::ALL.len() as f64) as usize];
            if rng.gen::<f64>() > 0.7 {
                level = pick;
            }

            let multiplier = table.multiplier(level);
            ServiceSurgeResult {
                service: service.clone(),
                level,
                multiplier,
                surge_price: surge_price(service.base_price, multiplier),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::ServiceDefinition;
    use crate::test_helpers::{FixedRng, ScriptedRng};

    fn time(hour: u8, day: u8) -> LocalTime {
        LocalTime::new(hour, day).expect("valid time")
    }

    #[test]
    fn local_time_from_unix_ms_matches_known_dates() {
        // 2024-01-01 00:00:00 UTC was a Monday.
        let monday = LocalTime::from_unix_ms(1_704_067_200_000);
        assert_eq!(monday.hour(), 0);
        assert_eq!(monday.day_of_week(), 1);
        assert!(!monday.is_weekend());

        // 2024-01-06 23:30:00 UTC was a Saturday evening.
        let saturday = LocalTime::from_unix_ms(1_704_583_800_000);
        assert_eq!(saturday.hour(), 23);
        assert_eq!(saturday.day_of_week(), 6);
        assert!(saturday.is_weekend());
    }

    #[test]
    fn local_time_rejects_out_of_range() {
        assert!(LocalTime::new(24, 0).is_err());
        assert!(LocalTime::new(0, 7).is_err());
    }

    #[test]
    fn one_result_per_entry_in_catalog_order() {
        let catalog = ServiceCatalog::default();
        let table = SurgeFactorTable::default();
        let mut rng = StdRng::seed_from_u64(7);

        for hour in [0, 8, 12, 18, 23] {
            for day in [0, 3, 6] {
                let results = generate(&catalog, &table, time(hour, day), &mut rng);
                assert_eq!(results.len(), catalog.len());
                for (result, service) in results.iter().zip(catalog.services()) {
                    assert_eq!(result.service.name, service.name);
                }
            }
        }
    }

    #[test]
    fn price_and_multiplier_are_consistent_with_table() {
        let catalog = ServiceCatalog::default();
        let table = SurgeFactorTable::default();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for result in generate(&catalog, &table, time(18, 5), &mut rng) {
                assert_eq!(result.multiplier, table.multiplier(result.level));
                assert!(table.contains(result.multiplier));
                assert_eq!(
                    result.surge_price,
                    surge_price(result.service.base_price, result.multiplier)
                );
            }
        }
    }

    #[test]
    fn same_seed_same_output() {
        let catalog = ServiceCatalog::default();
        let table = SurgeFactorTable::default();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(
            generate(&catalog, &table, time(9, 2), &mut a),
            generate(&catalog, &table, time(9, 2), &mut b)
        );
    }

    #[test]
    fn rush_hour_boundary_draw_resolves_to_high() {
        // The rush branch picks moderate only when the draw exceeds 0.5.
        let mut rng = ScriptedRng::from_f64s(&[0.5]);
        assert_eq!(baseline_level(time(8, 2), &mut rng), SurgeLevel::High);

        let mut rng = ScriptedRng::from_f64s(&[0.51]);
        assert_eq!(baseline_level(time(8, 2), &mut rng), SurgeLevel::Moderate);
    }

    #[test]
    fn baseline_branch_priority() {
        // Hour 18 on a Saturday hits the rush branch, not the weekend-night one.
        let mut rng = ScriptedRng::from_f64s(&[0.9]);
        assert_eq!(baseline_level(time(18, 6), &mut rng), SurgeLevel::Moderate);

        // Weekend 23:00 hits the nightlife branch.
        let mut rng = ScriptedRng::from_f64s(&[0.9]);
        assert_eq!(baseline_level(time(23, 6), &mut rng), SurgeLevel::High);
        let mut rng = ScriptedRng::from_f64s(&[0.2]);
        assert_eq!(baseline_level(time(23, 0), &mut rng), SurgeLevel::Extreme);

        // Weekday 23:00 only reaches the late-night branch.
        let mut rng = ScriptedRng::from_f64s(&[0.9]);
        assert_eq!(baseline_level(time(23, 3), &mut rng), SurgeLevel::Light);
        let mut rng = ScriptedRng::from_f64s(&[0.7]);
        assert_eq!(baseline_level(time(23, 3), &mut rng), SurgeLevel::Normal);

        // Mid-afternoon is always normal.
        let mut rng = ScriptedRng::from_f64s(&[0.0]);
        assert_eq!(baseline_level(time(14, 3), &mut rng), SurgeLevel::Normal);
    }

    #[test]
    fn minimum_draws_yield_normal_result() {
        let catalog = ServiceCatalog::new(vec![
            ServiceDefinition::new("A", "test service", 10.0, "🚗").expect("service"),
        ])
        .expect("catalog");
        let table = SurgeFactorTable::default();
        let mut rng = FixedRng::min();

        let results = generate(&catalog, &table, time(3, 3), &mut rng);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].level, SurgeLevel::Normal);
        assert_eq!(results[0].multiplier, 1.0);
        assert_eq!(results[0].surge_price, 10.00);
    }

    #[test]
    fn near_max_draws_always_fire_the_override() {
        // Every draw near 1.0: the uniform pick lands on the last level and
        // the override gate always fires, for every service including pooled.
        let catalog = ServiceCatalog::default();
        let table = SurgeFactorTable::default();
        let mut rng = FixedRng::max();

        for result in generate(&catalog, &table, time(12, 3), &mut rng) {
            assert_eq!(result.level, SurgeLevel::Extreme);
            assert_eq!(result.multiplier, 4.2);
        }
    }

    #[test]
    fn pooled_bias_never_exceeds_light_without_override() {
        let catalog = ServiceCatalog::new(vec![
            ServiceDefinition::new("UberPool", "shared", 8.75, "👥").expect("service"),
        ])
        .expect("catalog");
        let table = SurgeFactorTable::default();

        for bias_draw in [0.0, 0.5, 0.8, 0.81, 0.99] {
            // Draws: baseline, bias, level pick, override gate (held at 0).
            let mut rng = ScriptedRng::from_f64s(&[0.0, bias_draw, 0.9, 0.0]);
            let results = generate(&catalog, &table, time(18, 6), &mut rng);
            let expected = if bias_draw > 0.8 {
                SurgeLevel::Light
            } else {
                SurgeLevel::Normal
            };
            assert_eq!(results[0].level, expected, "bias draw {bias_draw}");
        }
    }

    #[test]
    fn premium_downgrade_caps_extreme_at_high() {
        let catalog = ServiceCatalog::new(vec![
            ServiceDefinition::new("UberBlack", "premium", 28.50, "🚐").expect("service"),
        ])
        .expect("catalog");
        let table = SurgeFactorTable::default();

        // Weekend 23:00 with a 0.2 baseline draw puts the baseline at extreme.
        let mut rng = ScriptedRng::from_f64s(&[0.2, 0.7, 0.0, 0.0]);
        let results = generate(&catalog, &table, time(23, 6), &mut rng);
        assert_eq!(results[0].level, SurgeLevel::High);

        // A bias draw at or below 0.6 leaves extreme untouched.
        let mut rng = ScriptedRng::from_f64s(&[0.2, 0.6, 0.0, 0.0]);
        let results = generate(&catalog, &table, time(23, 6), &mut rng);
        assert_eq!(results[0].level, SurgeLevel::Extreme);
    }

    #[test]
    fn override_replaces_level_with_uniform_pick() {
        let catalog = ServiceCatalog::new(vec![
            ServiceDefinition::new("UberX", "standard", 12.50, "🚗").expect("service"),
        ])
        .expect("catalog");
        let table = SurgeFactorTable::default();

        // Gate at 0.71 fires; the pick draw of 0.5 lands on the middle level.
        let mut rng = ScriptedRng::from_f64s(&[0.0, 0.0, 0.5, 0.71]);
        let results = generate(&catalog, &table, time(14, 3), &mut rng);
        assert_eq!(results[0].level, SurgeLevel::Moderate);

        // Gate exactly at 0.7 does not fire.
        let mut rng = ScriptedRng::from_f64s(&[0.0, 0.0, 0.5, 0.7]);
        let results = generate(&catalog, &table, time(14, 3), &mut rng);
        assert_eq!(results[0].level, SurgeLevel::Normal);
    }

    #[test]
    fn generator_does_not_mutate_catalog() {
        let catalog = ServiceCatalog::default();
        let before = catalog.services().to_vec();
        let table = SurgeFactorTable::default();
        let mut rng = StdRng::seed_from_u64(5);
        let _ = generate(&catalog, &table, time(8, 1), &mut rng);
        assert_eq!(catalog.services(), before.as_slice());
    }
}
