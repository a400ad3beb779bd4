use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::board::{SurgeBoard, SurgeHistory};

/// Write the trailing history as one row per (entry, service) pair,
/// most-recent-first.
pub fn write_history_parquet<P: AsRef<Path>>(
    path: P,
    history: &SurgeHistory,
) -> Result<(), Box<dyn Error>> {
    let mut timestamps = Vec::new();
    let mut services = Vec::new();
    let mut multipliers = Vec::new();

    for entry in history.entries() {
        for service in &entry.services {
            timestamps.push(entry.timestamp_ms);
            services.push(service.name.clone());
            multipliers.push(service.multiplier);
        }
    }

    let schema = Schema::new(vec![
        Field::new("timestamp_ms", DataType::UInt64, false),
        Field::new("service", DataType::Utf8, false),
        Field::new("multiplier", DataType::Float64, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(timestamps)),
        Arc::new(StringArray::from(services)),
        Arc::new(Float64Array::from(multipliers)),
    ];

    write_record_batch(path, schema, arrays)
}

/// Write the current board, one row per service in catalog order.
pub fn write_board_parquet<P: AsRef<Path>>(
    path: P,
    board: &SurgeBoard,
) -> Result<(), Box<dyn Error>> {
    let updated_at = board.last_updated_ms.unwrap_or(0);

    let mut services = Vec::with_capacity(board.results.len());
    let mut levels = Vec::with_capacity(board.results.len());
    let mut multipliers = Vec::with_capacity(board.results.len());
    let mut base_prices = Vec::with_capacity(board.results.len());
    let mut surge_prices = Vec::with_capacity(board.results.len());
    let mut updated = Vec::with_capacity(board.results.len());

    for result in &board.results {
        services.push(result.service.name.clone());
        levels.push(result.level.as_str().to_string());
        multipliers.push(result.multiplier);
        base_prices.push(result.service.base_price);
        surge_prices.push(result.surge_price);
        updated.push(updated_at);
    }

    let schema = Schema::new(vec![
        Field::new("service", DataType::Utf8, false),
        Field::new("level", DataType::Utf8, false),
        Field::new("multiplier", DataType::Float64, false),
        Field::new("base_price", DataType::Float64, false),
        Field::new("surge_price", DataType::Float64, false),
        Field::new("updated_at_ms", DataType::UInt64, false),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(services)),
        Arc::new(StringArray::from(levels)),
        Arc::new(Float64Array::from(multipliers)),
        Arc::new(Float64Array::from(base_prices)),
        Arc::new(Float64Array::from(surge_prices)),
        Arc::new(UInt64Array::from(updated)),
    ];

    write_record_batch(path, schema, arrays)
}

fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), Box<dyn Error>> {
    let batch = RecordBatch::try_new(Arc::new(schema), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
