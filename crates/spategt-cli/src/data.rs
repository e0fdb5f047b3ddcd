//! Delimited-text I/O for the batch pipeline.
//!
//! Three external surfaces, all plain CSV:
//!
//! - per-sample point files with header `type,x,y`
//! - the payoff table with header `source,sample,A,B,C,D` (extra metadata
//!   columns are ignored)
//! - the output feature table with header
//!   `source,sample,game,<sorted feature columns>`
//!
//! Readers take `BufRead` so parsing is testable without touching the
//! filesystem; thin path-based wrappers attach file context to errors.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use anyhow::{Context as _, bail};
use spategt_analysis::extract::FeatureRow;
use spategt_core::{CellPoint, DataType, GameLabel, PayoffMatrix, PointSample};

/// Column positions resolved from a header line.
fn resolve_columns<'a>(header: &'a str, required: &[&str]) -> anyhow::Result<Vec<usize>> {
    let columns: Vec<&'a str> = header.trim().split(',').collect();
    required
        .iter()
        .map(|name| {
            columns
                .iter()
                .position(|c| c == name)
                .with_context(|| format!("missing column {name:?} in header {header:?}"))
        })
        .collect()
}

fn field<'a>(fields: &[&'a str], index: usize, line_no: usize) -> anyhow::Result<&'a str> {
    fields
        .get(index)
        .copied()
        .with_context(|| format!("line {line_no}: too few fields"))
}

/// Reads one per-sample point file.
pub fn read_sample<R: BufRead>(
    reader: R,
    source_id: &str,
    sample_id: &str,
    data_type: DataType,
) -> anyhow::Result<PointSample> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .context("sample file is empty")?
        .context("failed to read sample header")?;
    let cols = resolve_columns(&header, &["type", "x", "y"])?;

    let mut points = Vec::new();
    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.trim().split(',').collect();
        let cell_type = field(&fields, cols[0], line_no)?
            .parse()
            .with_context(|| format!("line {line_no}: bad cell type"))?;
        let x = field(&fields, cols[1], line_no)?
            .parse()
            .with_context(|| format!("line {line_no}: bad x coordinate"))?;
        let y = field(&fields, cols[2], line_no)?
            .parse()
            .with_context(|| format!("line {line_no}: bad y coordinate"))?;
        points.push(CellPoint { x, y, cell_type });
    }
    let sample = PointSample::new(
        source_id.to_string(),
        sample_id.to_string(),
        data_type,
        points,
    )?;
    Ok(sample)
}

pub fn read_sample_file(
    path: &Path,
    source_id: &str,
    sample_id: &str,
    data_type: DataType,
) -> anyhow::Result<PointSample> {
    let file = File::open(path)
        .with_context(|| format!("failed to open sample file: {}", path.display()))?;
    read_sample(BufReader::new(file), source_id, sample_id, data_type)
        .with_context(|| format!("failed to parse sample file: {}", path.display()))
}

/// Reads the payoff table into a map keyed by `(source, sample)`.
pub fn read_payoffs<R: BufRead>(
    reader: R,
) -> anyhow::Result<BTreeMap<(String, String), PayoffMatrix>> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .context("payoff table is empty")?
        .context("failed to read payoff header")?;
    let cols = resolve_columns(&header, &["source", "sample", "A", "B", "C", "D"])?;

    let mut payoffs = BTreeMap::new();
    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.trim().split(',').collect();
        let source = field(&fields, cols[0], line_no)?.to_string();
        let sample = field(&fields, cols[1], line_no)?.to_string();
        let mut values = [0.0f32; 4];
        for (value, &col) in values.iter_mut().zip(&cols[2..]) {
            *value = field(&fields, col, line_no)?
                .parse()
                .with_context(|| format!("line {line_no}: bad payoff value"))?;
        }
        let [a, b, c, d] = values;
        if payoffs
            .insert((source, sample), PayoffMatrix { a, b, c, d })
            .is_some()
        {
            bail!("line {line_no}: duplicate (source, sample) key");
        }
    }
    Ok(payoffs)
}

pub fn read_payoff_file(path: &Path) -> anyhow::Result<BTreeMap<(String, String), PayoffMatrix>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open payoff table: {}", path.display()))?;
    read_payoffs(BufReader::new(file))
        .with_context(|| format!("failed to parse payoff table: {}", path.display()))
}

/// Writes the feature table.
///
/// Every row carries the same feature keys, so the column set of the first
/// row is the column set of the table.
pub fn write_feature_table<W: Write>(mut writer: W, rows: &[FeatureRow]) -> anyhow::Result<()> {
    let feature_columns: Vec<&String> = match rows.first() {
        Some(row) => row.features.keys().collect(),
        None => Vec::new(),
    };

    write!(writer, "source,sample,game")?;
    for column in &feature_columns {
        write!(writer, ",{column}")?;
    }
    writeln!(writer)?;

    for row in rows {
        write!(writer, "{},{},{}", row.source_id, row.sample_id, row.game)?;
        for column in &feature_columns {
            let value = row
                .features
                .get(*column)
                .with_context(|| format!("row {}/{} lacks column {column:?}", row.source_id, row.sample_id))?;
            write!(writer, ",{value}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// One feature-table row reduced to what `summarize` needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    pub game: GameLabel,
    pub proportion_sensitive: Option<f32>,
}

/// Reads a feature table back, keeping the game label and, when present,
/// the whole-sample sensitive fraction.
pub fn read_feature_table<R: BufRead>(reader: R) -> anyhow::Result<Vec<TableRecord>> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .context("feature table is empty")?
        .context("failed to read feature table header")?;
    let cols = resolve_columns(&header, &["game"])?;
    let game_col = cols[0];
    let fs_col = header
        .trim()
        .split(',')
        .position(|c| c == "Proportion_Sensitive");

    let mut records = Vec::new();
    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.trim().split(',').collect();
        let game = field(&fields, game_col, line_no)?
            .parse()
            .with_context(|| format!("line {line_no}: bad game label"))?;
        let proportion_sensitive = match fs_col {
            Some(col) => Some(
                field(&fields, col, line_no)?
                    .parse()
                    .with_context(|| format!("line {line_no}: bad sensitive fraction"))?,
            ),
            None => None,
        };
        records.push(TableRecord {
            game,
            proportion_sensitive,
        });
    }
    Ok(records)
}

pub fn read_feature_table_file(path: &Path) -> anyhow::Result<Vec<TableRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open feature table: {}", path.display()))?;
    read_feature_table(BufReader::new(file))
        .with_context(|| format!("failed to parse feature table: {}", path.display()))
}
