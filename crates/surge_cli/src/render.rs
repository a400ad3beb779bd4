//! Text rendering of the board, location status, zones, and history.

use std::fmt::Write;

use surge_core::board::{SurgeBoard, SurgeHistory, SurgeZone};
use surge_core::location::UserLocation;
use surge_core::surge::ServiceSurgeResult;

/// One line per service: icon, name, level, multiplier, base and surge price.
pub fn render_results(results: &[ServiceSurgeResult]) -> String {
    let mut out = String::new();
    for result in results {
        writeln!(
            out,
            "{} {:<10} {:>8}  {}x  ${:.2} -> ${:.2}",
            result.service.icon,
            result.service.name,
            result.level.as_str(),
            result.multiplier,
            result.service.base_price,
            result.surge_price,
        )
        .expect("write to string");
    }
    out
}

pub fn render_board(board: &SurgeBoard, location: &UserLocation) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{} {}  ({:.4}, {:.4})",
        location.status.icon(),
        location.status.text(),
        location.position.lat(),
        location.position.lng(),
    )
    .expect("write to string");

    match board.last_updated_ms {
        Some(ms) => writeln!(out, "last updated: t+{}s", ms / 1_000),
        None => writeln!(out, "no data yet"),
    }
    .expect("write to string");

    out.push('\n');
    out.push_str(&render_results(&board.results));
    out
}

pub fn render_zones(zones: &[SurgeZone]) -> String {
    let mut out = String::from("surge zones:\n");
    for zone in zones {
        writeln!(
            out,
            "  ring {}: {} ({} cells)",
            zone.ring,
            zone.level.as_str(),
            zone.cells.len()
        )
        .expect("write to string");
    }
    out
}

pub fn render_history(history: &SurgeHistory) -> String {
    if history.is_empty() {
        return "No history available yet\n".to_string();
    }

    let mut out = String::from("history (most recent first):\n");
    for entry in history.entries() {
        let services = entry
            .services
            .iter()
            .map(|service| format!("{}: {}x", service.name, service.multiplier))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "  t+{}s  {}", entry.timestamp_ms / 1_000, services)
            .expect("write to string");
    }
    out
}
