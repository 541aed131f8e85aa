//! # Output
//!
//! Tab-separated pair records and the verbose diagnostic trace.
//!
//! Both writers are shared by every worker of a run and serialize access
//! with a `parking_lot::Mutex`: one lock acquisition covers one full row
//! (or one full diagnostic block), so rows never interleave.

pub mod diagnostics;
pub mod header;
pub mod record;
pub mod sink;

pub use diagnostics::{Diagnostics, PairTrace, SharedBuffer};
pub use header::{ACCOMPANY_COLUMNS, AVOID_COLUMNS, header_columns, write_header};
pub use record::PairResult;
pub use sink::ResultSink;

/// Column delimiter. No quoting or escaping is applied.
pub const DELIMITER: &str = "\t";

/// Significant digits written for floats in rows.
pub const FLOAT_PRECISION: usize = 6;

/// Render a float the way rows expect it: six significant digits, trailing
/// zeros dropped, exponent form outside `[1e-4, 1e6)`, `nan` for an
/// undefined average.
pub(crate) fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:.*e}", FLOAT_PRECISION - 1, v);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= FLOAT_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exponent.abs())
    } else {
        let decimals = (FLOAT_PRECISION as i32 - 1 - exponent) as usize;
        trim_zeros(&format!("{v:.decimals$}")).to_string()
    }
}

fn trim_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
