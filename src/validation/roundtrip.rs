//! Round-trip validation of written tables

use crate::export::format::{unquote_string, QUOTE};
use crate::export::{ExportConfig, Table};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;

/// Row counts per table found during validation
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    rows: HashMap<Table, usize>,
}

impl ValidationReport {
    /// Rows found in a table (0 if its file was missing)
    pub fn row_count(&self, table: Table) -> usize {
        self.rows.get(&table).copied().unwrap_or(0)
    }
}

/// Quote tracking shared by the record and field splitters
#[derive(Default)]
struct QuoteState {
    in_quotes: bool,
    just_closed: bool,
}

impl QuoteState {
    /// Feed one character; true if it sits outside any quoted field
    fn step(&mut self, c: char, at_field_start: bool) -> bool {
        if c == QUOTE {
            if self.in_quotes {
                self.in_quotes = false;
                self.just_closed = true;
            } else {
                // Quotes only open at the start of a field or as the second half of ""
                self.in_quotes = at_field_start || self.just_closed;
                self.just_closed = false;
            }
            return false;
        }
        self.just_closed = false;
        !self.in_quotes
    }
}

/// Split table content into records, keeping newlines inside quoted fields
///
/// Each record comes with the line number it starts on; the terminating
/// newline is not included.
pub fn split_records(content: &str, delimiter: char) -> Vec<(usize, &str)> {
    let mut records = Vec::new();
    let mut state = QuoteState::default();
    let mut record_start = 0;
    let mut field_start = 0;
    let mut line = 1;
    let mut record_line = 1;

    for (i, c) in content.char_indices() {
        let outside = state.step(c, i == field_start);
        if c == '\n' {
            line += 1;
            if outside {
                records.push((record_line, &content[record_start..i]));
                record_start = i + 1;
                field_start = i + 1;
                record_line = line;
            }
        } else if outside && c == delimiter {
            field_start = i + c.len_utf8();
        }
    }
    if record_start < content.len() {
        records.push((record_line, &content[record_start..]));
    }
    records
}

/// Split a record into fields on `delimiter`, ignoring delimiters inside quotes
///
/// Fields are returned as written, quotes included.
pub fn split_fields(record: &str, delimiter: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut state = QuoteState::default();
    let mut start = 0;

    for (i, c) in record.char_indices() {
        if state.step(c, i == start) && c == delimiter {
            fields.push(&record[start..i]);
            start = i + c.len_utf8();
        }
    }
    fields.push(&record[start..]);
    fields
}

/// Text column written without quotes, if the table has one
fn unquoted_text_column(table: Table) -> Option<&'static str> {
    match table {
        Table::Categories => Some("Category"),
        _ => None,
    }
}

/// Validate the tables in an output directory
///
/// Every row must have its table's column count, and every field that starts
/// with a quote must unquote cleanly. A row whose unquoted text column holds
/// the delimiter cannot be split reliably; it is reported with a warning.
pub fn validate_export(config: &ExportConfig) -> Result<ValidationReport> {
    log::info!("Validating export at: {:?}", config.output_dir);
    let mut report = ValidationReport::default();

    for table in Table::ALL {
        let path = config.table_path(table);
        if !path.exists() {
            log::warn!("{} table not found at {:?}", table.name(), path);
            continue;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {} table: {:?}", table.name(), path))?;

        let expected = table.columns().len();
        let mut count = 0;
        for (line, record) in split_records(&content, config.delimiter) {
            let fields = split_fields(record, config.delimiter);

            if fields.len() > expected {
                if let Some(column) = unquoted_text_column(table) {
                    log::warn!(
                        "{:?} line {}: unquoted {} field contains the delimiter {:?}; row is ambiguous",
                        path,
                        line,
                        column,
                        config.delimiter
                    );
                    count += 1;
                    continue;
                }
            }

            if fields.len() != expected {
                anyhow::bail!(
                    "{:?} line {}: expected {} fields, found {}",
                    path,
                    line,
                    expected,
                    fields.len()
                );
            }

            for (column, field) in table.columns().iter().zip(&fields) {
                if field.starts_with(QUOTE) && unquote_string(field).is_none() {
                    anyhow::bail!(
                        "{:?} line {}: malformed quoting in column {}",
                        path,
                        line,
                        column
                    );
                }
            }
            count += 1;
        }

        log::info!("  {}: {} row(s)", table.name(), count);
        report.rows.insert(table, count);
    }

    Ok(report)
}
