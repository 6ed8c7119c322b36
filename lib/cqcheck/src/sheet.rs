//! Reads competency questions from a spreadsheet exported as CSV.

use crate::error::SheetError;
use cqcheck_model::RawRow;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[allow(clippy::non_ascii_literal, reason = "Header of the existing spreadsheets")]
pub const DEFAULT_LABEL_COLUMN: &str = "Questao de Competência";
pub const DEFAULT_QUERY_COLUMN: &str = "Consulta SPARQL";
pub const DEFAULT_ANSWERS_COLUMN: &str = "Respostas";

/// The names of the columns that hold the parts of a competency question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetColumns {
    /// The question label (e.g., `QC1-Qual é o título do livro?`).
    pub label: String,
    /// The raw SPARQL query.
    pub query: String,
    /// The expected answers, separated by `;`.
    pub answers: String,
}

impl Default for SheetColumns {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL_COLUMN.to_owned(),
            query: DEFAULT_QUERY_COLUMN.to_owned(),
            answers: DEFAULT_ANSWERS_COLUMN.to_owned(),
        }
    }
}

/// Controls how a spreadsheet is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOptions {
    pub columns: SheetColumns,
    /// The field delimiter. Spreadsheets exported with a Portuguese locale often use `;`.
    pub delimiter: u8,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            columns: SheetColumns::default(),
            delimiter: b',',
        }
    }
}

/// Loads all competency questions from the CSV file at `path`.
pub fn load_rows(path: &Path, options: &SheetOptions) -> Result<Vec<RawRow>, SheetError> {
    let file = File::open(path).map_err(|error| SheetError::Open {
        path: path.to_owned(),
        error,
    })?;
    let rows = load_rows_from_reader(file, options)?;
    tracing::debug!("Loaded {} questions from {}", rows.len(), path.display());
    Ok(rows)
}

/// Loads all competency questions from CSV data.
///
/// Cells that are empty or only contain whitespace are absent. Rows without a label are
/// skipped.
pub fn load_rows_from_reader(
    reader: impl Read,
    options: &SheetOptions,
) -> Result<Vec<RawRow>, SheetError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let label_index = column_index(&headers, &options.columns.label)?;
    let query_index = column_index(&headers, &options.columns.query)?;
    let answers_index = column_index(&headers, &options.columns.answers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let cell = |index| {
            record
                .get(index)
                .filter(|value: &&str| !value.trim().is_empty())
                .map(str::to_owned)
        };

        let Some(label) = cell(label_index) else {
            if record.iter().any(|value| !value.trim().is_empty()) {
                tracing::warn!("Skipping line {line}: the question label is empty");
            }
            continue;
        };
        match RawRow::try_new(label.trim(), cell(query_index), cell(answers_index)) {
            Some(row) => rows.push(row),
            None => tracing::warn!("Skipping line {line}: no question identifier in '{label}'"),
        }
    }
    Ok(rows)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, SheetError> {
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
        .ok_or_else(|| SheetError::MissingColumn(name.to_owned()))
}
