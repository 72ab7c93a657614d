//! Loading MBP-10 snapshot files.
//!
//! Input layout is one directory per symbol containing `<SYMBOL>_*.csv`
//! files, one row per snapshot. Level columns follow the
//! `bid_px_NN`/`bid_sz_NN`/`ask_px_NN`/`ask_sz_NN` naming pattern and are
//! located by header name, so surrounding columns are ignored.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{fs, io};

use chrono::{DateTime, Utc};
use csv::StringRecord;
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::orderbook::{BookLevel, BookSnapshot};
use crate::BOOK_DEPTH;

/// Data loading errors
#[derive(Error, Debug)]
pub enum DataError {
    #[error("no snapshot data for {symbol} under {path}")]
    NoData { symbol: String, path: PathBuf },

    #[error("missing column {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Bounds on how much of a symbol's history is read.
///
/// Impact curves are averaged over a sample of snapshots, so only a bounded
/// prefix of each symbol's files needs to be parsed.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// CSV files read per symbol, in file-name order
    pub max_files: usize,
    /// Rows parsed per file
    pub max_rows: usize,
    /// Book levels read per side
    pub level_count: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_files: 3,
            max_rows: 10_000,
            level_count: BOOK_DEPTH,
        }
    }
}

/// Column indices resolved from a file header
struct ColumnMap {
    ts_event: usize,
    /// (price, size) column per bid level
    bids: Vec<(Option<usize>, Option<usize>)>,
    /// (price, size) column per ask level
    asks: Vec<(Option<usize>, Option<usize>)>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, level_count: usize) -> Result<Self, DataError> {
        let index_of = |name: &str| headers.iter().position(|h| h == name);

        let ts_event = index_of("ts_event")
            .ok_or_else(|| DataError::MissingColumn("ts_event".to_string()))?;

        let mut bids = Vec::with_capacity(level_count);
        let mut asks = Vec::with_capacity(level_count);
        for level in 0..level_count {
            bids.push((
                index_of(&format!("bid_px_{level:02}")),
                index_of(&format!("bid_sz_{level:02}")),
            ));
            asks.push((
                index_of(&format!("ask_px_{level:02}")),
                index_of(&format!("ask_sz_{level:02}")),
            ));
        }

        Ok(Self {
            ts_event,
            bids,
            asks,
        })
    }

    /// Parse one row into a snapshot.
    ///
    /// Missing price/size cells become zeroed (invalid) levels. Rows without
    /// a valid top of book on both sides are dropped silently; rows with an
    /// unparseable timestamp are logged and dropped.
    fn parse_row(&self, record: &StringRecord, symbol: &str) -> Option<BookSnapshot> {
        let raw_ts = record.get(self.ts_event)?;
        let timestamp: DateTime<Utc> = match raw_ts.trim().parse() {
            Ok(ts) => ts,
            Err(err) => {
                warn!("dropping {symbol} record with bad ts_event {raw_ts:?}: {err}");
                return None;
            }
        };

        let bids = self.bids.iter().map(|c| parse_level(record, *c)).collect();
        let asks = self.asks.iter().map(|c| parse_level(record, *c)).collect();

        let snapshot = BookSnapshot::new(symbol.to_string(), timestamp, bids, asks);
        snapshot.is_valid().then_some(snapshot)
    }
}

fn parse_level(record: &StringRecord, columns: (Option<usize>, Option<usize>)) -> BookLevel {
    let price = columns
        .0
        .and_then(|i| record.get(i))
        .and_then(parse_cell::<f64>)
        .unwrap_or(0.0);
    let size = columns
        .1
        .and_then(|i| record.get(i))
        .and_then(parse_cell::<u32>)
        .unwrap_or(0);
    BookLevel::new(price, size)
}

fn parse_cell<T: FromStr>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

/// Load the bounded snapshot history for one symbol.
///
/// Returns [`DataError::NoData`] when the symbol directory is missing or no
/// file yields a single loadable snapshot; callers treat that as "data
/// unavailable" and skip the symbol. A file that cannot be read is logged
/// and skipped, and processing continues with the remaining files.
pub fn load_symbol_snapshots(
    data_dir: impl AsRef<Path>,
    symbol: &str,
    config: &LoaderConfig,
) -> Result<Vec<BookSnapshot>, DataError> {
    let symbol_dir = data_dir.as_ref().join(symbol);
    let no_data = || DataError::NoData {
        symbol: symbol.to_string(),
        path: symbol_dir.clone(),
    };

    let entries = fs::read_dir(&symbol_dir).map_err(|_| no_data())?;
    let prefix = format!("{symbol}_");

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "csv")
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(no_data());
    }

    let mut snapshots = Vec::new();
    for path in files.iter().take(config.max_files) {
        match load_file(path, symbol, config) {
            Ok(mut rows) => {
                debug!("loaded {} snapshots from {}", rows.len(), path.display());
                snapshots.append(&mut rows);
            }
            Err(err) => warn!("skipping {}: {err}", path.display()),
        }
    }

    if snapshots.is_empty() {
        return Err(no_data());
    }
    Ok(snapshots)
}

fn load_file(
    path: &Path,
    symbol: &str,
    config: &LoaderConfig,
) -> Result<Vec<BookSnapshot>, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns = ColumnMap::from_headers(reader.headers()?, config.level_count)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        if rows.len() >= config.max_rows {
            break;
        }

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!("dropping unreadable record in {}: {err}", path.display());
                continue;
            }
        };

        if let Some(snapshot) = columns.parse_row(&record, symbol) {
            rows.push(snapshot);
        }
    }

    Ok(rows)
}
