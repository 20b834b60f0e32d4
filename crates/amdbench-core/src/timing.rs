//! Extraction of the wall-clock duration an AMD executable reports.
//!
//! The executables print a line such as `Solucao: 42. Tempo: 0.123400`. The
//! grammar accepted here is strict: exactly one output line may contain the
//! label, and everything after the label on that line, once trimmed, must be
//! a single finite non-negative decimal number of seconds.

/// Label printed by the AMD executables in front of the elapsed seconds.
pub const DEFAULT_TIMING_LABEL: &str = "Tempo:";

/// Reasons a process output yields no duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    /// No line contains the label.
    #[error("no line contains the timing label {label:?}")]
    MissingLabel {
        /// The label that was searched for.
        label: String,
    },
    /// More than one line contains the label.
    #[error("timing label {label:?} appears on {count} lines; expected exactly one")]
    AmbiguousLabel {
        /// The label that was searched for.
        label: String,
        /// How many lines contained it.
        count: usize,
    },
    /// The text after the label is not a single number.
    #[error("timing value {raw:?} is not a number")]
    InvalidValue {
        /// The text found after the label.
        raw: String,
    },
    /// The value parsed but is negative, infinite or NaN.
    #[error("timing value {raw:?} is not a finite non-negative duration")]
    OutOfRange {
        /// The text found after the label.
        raw: String,
    },
}

/// Parses the duration in seconds from `output` using `label`.
///
/// # Errors
///
/// Returns [`TimingError`] when the label is absent or repeated, or when the
/// value after it is not a finite non-negative number.
pub fn parse_timing(output: &str, label: &str) -> Result<f64, TimingError> {
    let mut matches = output.lines().filter_map(|line| {
        line.find(label)
            .map(|idx| &line[idx + label.len()..])
    });

    let Some(rest) = matches.next() else {
        return Err(TimingError::MissingLabel {
            label: label.to_owned(),
        });
    };
    let extra = matches.count();
    if extra > 0 {
        return Err(TimingError::AmbiguousLabel {
            label: label.to_owned(),
            count: extra + 1,
        });
    }

    let raw = rest.trim();
    let value: f64 = raw.parse().map_err(|_| TimingError::InvalidValue {
        raw: raw.to_owned(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(TimingError::OutOfRange {
            raw: raw.to_owned(),
        });
    }
    Ok(value)
}
