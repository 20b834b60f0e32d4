//! Per-repetition results as CSV.
//!
//! Columns: `file,description,thread_count,repetition,time,speedup,efficiency`.
//! Times carry 6 decimals and ratios 4. A missing measurement leaves the
//! last three cells empty. Fields containing a comma, quote or line break
//! are quoted with embedded quotes doubled (RFC 4180).
use std::io::Write;

use crate::stats::{Measurement, MissingReason, RunRecord};

/// Column names, in order.
pub const COLUMNS: [&str; 7] = [
    "file",
    "description",
    "thread_count",
    "repetition",
    "time",
    "speedup",
    "efficiency",
];

/// Writes `records` as CSV, header first.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn write_results<W: Write>(writer: &mut W, records: &[RunRecord]) -> std::io::Result<()> {
    writeln!(writer, "{}", COLUMNS.join(","))?;
    for r in records {
        let time = r
            .measurement
            .seconds()
            .map(|t| format!("{t:.6}"))
            .unwrap_or_default();
        let ratio = |v: Option<f64>| v.map(|x| format!("{x:.4}")).unwrap_or_default();
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            quote(&r.file),
            quote(&r.description),
            r.thread_count,
            r.repetition,
            time,
            ratio(r.speedup),
            ratio(r.efficiency),
        )?;
    }
    Ok(())
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Errors raised while reading a results CSV.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultsParseError {
    /// The input has no header row.
    #[error("results file is empty")]
    Empty,
    /// The header row does not list the expected columns.
    #[error("unexpected header {found:?}; expected {expected:?}")]
    UnexpectedHeader {
        /// The header found.
        found: String,
        /// The header expected.
        expected: String,
    },
    /// A quoted field is not closed before end of input.
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote {
        /// Line on which the record starts.
        line: usize,
    },
    /// A row has the wrong number of cells.
    #[error("line {line}: expected {expected} fields, found {found}", expected = COLUMNS.len())]
    FieldCount {
        /// Line on which the record starts.
        line: usize,
        /// Cells found.
        found: usize,
    },
    /// A cell does not hold a value of the column's type.
    #[error("line {line}: invalid {column} {value:?}")]
    InvalidField {
        /// Line on which the record starts.
        line: usize,
        /// Column name.
        column: &'static str,
        /// The raw cell.
        value: String,
    },
}

/// Reads CSV produced by [`write_results`] back into rows.
///
/// # Errors
///
/// Returns [`ResultsParseError`] on a missing or wrong header, malformed
/// quoting, or a cell that does not parse.
pub fn read_results(input: &str) -> Result<Vec<RunRecord>, ResultsParseError> {
    let mut rows = split_records(input)?.into_iter();
    let (_, header) = rows.next().ok_or(ResultsParseError::Empty)?;
    if header != COLUMNS {
        return Err(ResultsParseError::UnexpectedHeader {
            found: header.join(","),
            expected: COLUMNS.join(","),
        });
    }
    rows.map(|(line, fields)| parse_row(line, fields)).collect()
}

fn parse_row(line: usize, fields: Vec<String>) -> Result<RunRecord, ResultsParseError> {
    let [file, description, threads, repetition, time, speedup, efficiency] =
        <[String; COLUMNS.len()]>::try_from(fields).map_err(|f| ResultsParseError::FieldCount {
            line,
            found: f.len(),
        })?;

    let invalid = |column: &'static str, value: &str| ResultsParseError::InvalidField {
        line,
        column,
        value: value.to_owned(),
    };
    let optional = |column: &'static str, value: &str| -> Result<Option<f64>, ResultsParseError> {
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(Some)
            .ok_or_else(|| invalid(column, value))
    };

    let thread_count: u32 = threads
        .parse()
        .ok()
        .filter(|&t| t >= 1)
        .ok_or_else(|| invalid("thread_count", &threads))?;
    let repetition: u32 = repetition
        .parse()
        .map_err(|_| invalid("repetition", &repetition))?;
    let measurement = match optional("time", &time)? {
        Some(t) => Measurement::Valid(t),
        None => Measurement::Missing(MissingReason::Unrecorded),
    };

    Ok(RunRecord {
        file,
        description,
        thread_count,
        repetition,
        measurement,
        speedup: optional("speedup", &speedup)?,
        efficiency: optional("efficiency", &efficiency)?,
    })
}

/// Splits CSV text into records of unquoted fields, each tagged with the
/// 1-based line it starts on. Blank lines are skipped.
fn split_records(input: &str) -> Result<Vec<(usize, Vec<String>)>, ResultsParseError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut line = 1;
    let mut record_line = 1;
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish_record(&mut records, &mut fields, &mut field, record_line);
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err(ResultsParseError::UnterminatedQuote { line: record_line });
    }
    finish_record(&mut records, &mut fields, &mut field, record_line);
    Ok(records)
}

fn finish_record(
    records: &mut Vec<(usize, Vec<String>)>,
    fields: &mut Vec<String>,
    field: &mut String,
    line: usize,
) {
    if fields.is_empty() && field.is_empty() {
        return;
    }
    fields.push(std::mem::take(field));
    records.push((line, std::mem::take(fields)));
}
