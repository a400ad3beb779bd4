//! Current surge board, trailing history, and derived surge zones.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use h3o::CellIndex;
use serde::{Deserialize, Serialize};

use crate::surge::{ServiceSurgeResult, SurgeLevel};

/// Trailing history keeps this many generations, most-recent-first.
pub const HISTORY_CAPACITY: usize = 5;

/// Latest full generation; replaced wholesale on every refresh so readers
/// never observe a partial result set.
#[derive(Debug, Default, Resource)]
pub struct SurgeBoard {
    pub results: Vec<ServiceSurgeResult>,
    pub last_updated_ms: Option<u64>,
}

impl SurgeBoard {
    pub fn publish(&mut self, results: Vec<ServiceSurgeResult>, timestamp_ms: u64) {
        self.results = results;
        self.last_updated_ms = Some(timestamp_ms);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryService {
    pub name: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp_ms: u64,
    pub services: Vec<HistoryService>,
}

/// Bounded trailing log of past generations, most-recent-first.
#[derive(Debug, Default, Resource)]
pub struct SurgeHistory {
    entries: VecDeque<HistoryEntry>,
}

impl SurgeHistory {
    pub fn record(&mut self, timestamp_ms: u64, results: &[ServiceSurgeResult]) {
        let entry = HistoryEntry {
            timestamp_ms,
            services: results
                .iter()
                .map(|result| HistoryService {
                    name: result.service.name.clone(),
                    multiplier: result.multiplier,
                })
                .collect(),
        };
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entries most-recent-first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One ring of cells around the user for a distinct active surge level.
#[derive(Debug, Clone)]
pub struct SurgeZone {
    pub level: SurgeLevel,
    pub ring: u32,
    pub cells: Vec<CellIndex>,
}

/// Derive one zone per distinct level on the board, in board order, with the
/// ring radius growing per zone.
pub fn surge_zones(board: &SurgeBoard, center: CellIndex) -> Vec<SurgeZone> {
    let mut levels: Vec<SurgeLevel> = Vec::new();
    for result in &board.results {
        if !levels.contains(&result.level) {
            levels.push(result.level);
        }
    }

    levels
        .into_iter()
        .enumerate()
        .map(|(index, level)| {
            let ring = index as u32 + 1;
            SurgeZone {
                level,
                ring,
                cells: center.grid_disk::<Vec<_>>(ring),
            }
        })
        .collect()
}
