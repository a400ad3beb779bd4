//! Surge levels and the multiplier table applied to base prices.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::catalog::ServiceDefinition;

/// Demand severity bucket. Ordered from calmest to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurgeLevel {
    Normal,
    Light,
    Moderate,
    High,
    Extreme,
}

impl SurgeLevel {
    /// All levels in severity order.
    pub const ALL: [SurgeLevel; 5] = [
        SurgeLevel::Normal,
        SurgeLevel::Light,
        SurgeLevel::Moderate,
        SurgeLevel::High,
        SurgeLevel::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SurgeLevel::Normal => "normal",
            SurgeLevel::Light => "light",
            SurgeLevel::Moderate => "moderate",
            SurgeLevel::High => "high",
            SurgeLevel::Extreme => "extreme",
        }
    }
}

impl std::fmt::Display for SurgeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiplier per surge level. Multipliers must be >= 1.0 and strictly
/// increasing with severity; this is enforced at construction so a level
/// lookup can never miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Resource)]
pub struct SurgeFactorTable {
    normal: f64,
    light: f64,
    moderate: f64,
    high: f64,
    extreme: f64,
}

impl SurgeFactorTable {
    pub fn new(
        normal: f64,
        light: f64,
        moderate: f64,
        high: f64,
        extreme: f64,
    ) -> Result<Self, String> {
        let factors = [normal, light, moderate, high, extreme];
        if normal < 1.0 {
            return Err(format!(
                "normal multiplier must be at least 1.0, got {normal}"
            ));
        }
        for pair in factors.windows(2) {
            if pair[1] <= pair[0] {
                return Err(format!(
                    "multipliers must strictly increase with severity, got {:?}",
                    factors
                ));
            }
        }
        Ok(Self {
            normal,
            light,
            moderate,
            high,
            extreme,
        })
    }

    pub fn multiplier(&self, level: SurgeLevel) -> f64 {
        match level {
            SurgeLevel::Normal => self.normal,
            SurgeLevel::Light => self.light,
            SurgeLevel::Moderate => self.moderate,
            SurgeLevel::High => self.high,
            SurgeLevel::Extreme => self.extreme,
        }
    }

    /// True if `value` is one of the table's multipliers.
    pub fn contains(&self, value: f64) -> bool {
        SurgeLevel::ALL
            .iter()
            .any(|level| self.multiplier(*level) == value)
    }
}

impl Default for SurgeFactorTable {
    fn default() -> Self {
        Self {
            normal: 1.0,
            light: 1.2,
            moderate: 1.8,
            high: 2.5,
            extreme: 4.2,
        }
    }
}

/// One service's assigned level and resolved pricing for a single generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSurgeResult {
    pub service: ServiceDefinition,
    pub level: SurgeLevel,
    pub multiplier: f64,
    pub surge_price: f64,
}

/// Base price times multiplier, rounded half-away-from-zero to cents.
pub fn surge_price(base_price: f64, multiplier: f64) -> f64 {
    (base_price * multiplier * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_catalog_factors() {
        let table = SurgeFactorTable::default();
        assert_eq!(table.multiplier(SurgeLevel::Normal), 1.0);
        assert_eq!(table.multiplier(SurgeLevel::Light), 1.2);
        assert_eq!(table.multiplier(SurgeLevel::Moderate), 1.8);
        assert_eq!(table.multiplier(SurgeLevel::High), 2.5);
        assert_eq!(table.multiplier(SurgeLevel::Extreme), 4.2);
    }

    #[test]
    fn table_rejects_non_increasing_multipliers() {
        assert!(SurgeFactorTable::new(1.0, 1.2, 1.2, 2.5, 4.2).is_err());
        assert!(SurgeFactorTable::new(1.0, 0.9, 1.8, 2.5, 4.2).is_err());
    }

    #[test]
    fn table_rejects_sub_unit_normal() {
        assert!(SurgeFactorTable::new(0.5, 1.2, 1.8, 2.5, 4.2).is_err());
    }

    #[test]
    fn surge_price_rounds_to_cents() {
        assert_eq!(surge_price(12.50, 1.8), 22.50);
        assert_eq!(surge_price(8.75, 1.2), 10.50);
        assert_eq!(surge_price(22.75, 4.2), 95.55);
        // 28.50 * 1.2 = 34.199999... in binary; rounding must land on 34.20
        assert_eq!(surge_price(28.50, 1.2), 34.20);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        for pair in SurgeLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
