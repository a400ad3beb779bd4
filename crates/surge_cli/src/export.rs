//! Export of run results: CSV history, JSON board, and Parquet for both.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use surge_core::board::{SurgeBoard, SurgeHistory};
use surge_core::telemetry_export::{write_board_parquet, write_history_parquet};

/// Write every export format into `dir`, creating it if needed.
pub fn export_run(dir: &Path, board: &SurgeBoard, history: &SurgeHistory) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    write_history_csv(dir.join("surge_history.csv"), history)?;
    write_board_json(dir.join("surge_board.json"), board)?;
    write_history_parquet(dir.join("surge_history.parquet"), history)?;
    write_board_parquet(dir.join("surge_board.parquet"), board)?;
    Ok(())
}

fn write_history_csv<P: AsRef<Path>>(path: P, history: &SurgeHistory) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(File::create(path)?);
    wtr.write_record(["timestamp_ms", "service", "multiplier"])?;
    for entry in history.entries() {
        for service in &entry.services {
            wtr.write_record([
                entry.timestamp_ms.to_string(),
                service.name.clone(),
                service.multiplier.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

fn write_board_json<P: AsRef<Path>>(path: P, board: &SurgeBoard) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(File::create(path)?, &board.results)?;
    Ok(())
}
