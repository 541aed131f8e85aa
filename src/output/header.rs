//! Header row. Its column set depends only on the max mode.

use std::io::Write;
use crate::config::MaxMode;
use crate::Result;
use super::DELIMITER;

/// Columns for co-occurrence runs (carries the synthetic distance).
pub const ACCOMPANY_COLUMNS: [&str; 12] = [
    "Source",
    "Target",
    "p",
    "Avg synthetic distance",
    "successes",
    "observations",
    "rate",
    "expected",
    "total source",
    "total target",
    "fraction source",
    "fraction target",
];

/// Columns for avoidance runs.
pub const AVOID_COLUMNS: [&str; 11] = [
    "Source",
    "Target",
    "p",
    "successes",
    "observations",
    "rate",
    "expected",
    "total source",
    "total target",
    "fraction source",
    "fraction target",
];

pub fn header_columns(mode: MaxMode) -> &'static [&'static str] {
    match mode {
        MaxMode::Accompany => &ACCOMPANY_COLUMNS,
        MaxMode::Avoid => &AVOID_COLUMNS,
    }
}

pub fn write_header(writer: &mut dyn Write, mode: MaxMode) -> Result<()> {
    let mut line = header_columns(mode).join(DELIMITER);
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    Ok(())
}
