//! Result sink: an append-only tab-separated stream.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;

use crate::config::MaxMode;
use crate::{Error, Result};
use super::{PairResult, header};

/// Mutex-guarded row writer.
///
/// The header is written by [`ResultSink::new`], so it always precedes
/// every data row.
pub struct ResultSink<W: Write + Send> {
    writer: Mutex<W>,
    max_mode: MaxMode,
    rows: AtomicUsize,
}

impl<W: Write + Send> ResultSink<W> {
    /// Wrap `writer` and write the header for `max_mode`.
    pub fn new(mut writer: W, max_mode: MaxMode) -> Result<Self> {
        header::write_header(&mut writer, max_mode)?;
        Ok(Self {
            writer: Mutex::new(writer),
            max_mode,
            rows: AtomicUsize::new(0),
        })
    }

    pub fn max_mode(&self) -> MaxMode {
        self.max_mode
    }

    /// Append one record as a single write under the lock.
    pub fn append(&self, record: &PairResult) -> Result<()> {
        let expected = header::header_columns(self.max_mode).len();
        if record.column_count() != expected {
            return Err(Error::ConfigError(format!(
                "Record for ({}, {}) has {} columns, header for {} has {expected}",
                record.source,
                record.target,
                record.column_count(),
                self.max_mode.as_str()
            )));
        }

        let row = record.to_row();
        self.writer.lock().write_all(row.as_bytes())?;
        self.rows.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Data rows written so far (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows.load(Ordering::Relaxed)
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        let mut writer = self.writer.into_inner();
        writer.flush()?;
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, distance: Option<f64>) -> PairResult {
        PairResult {
            source: source.into(),
            target: "Z".into(),
            p_value: 0.01,
            avg_synthetic_distance: distance,
            successes: 2,
            observations: 4,
            rate: 0.25,
            expected: 1,
            source_degree: 2,
            target_degree: 2,
            source_fraction: 0.5,
            target_fraction: 0.5,
            significant: true,
        }
    }

    #[test]
    fn test_header_then_rows() {
        let sink = ResultSink::new(Vec::new(), MaxMode::Accompany).unwrap();
        sink.append(&record("A", Some(0.0))).unwrap();
        sink.append(&record("B", Some(1.0))).unwrap();
        assert_eq!(sink.rows_written(), 2);

        let text = String::from_utf8(sink.finish().unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Source\tTarget"));
        assert!(lines[1].starts_with("A\tZ"));
        assert!(lines[2].starts_with("B\tZ"));
    }

    #[test]
    fn test_rejects_mismatched_record() {
        let sink = ResultSink::new(Vec::new(), MaxMode::Avoid).unwrap();
        assert!(sink.append(&record("A", Some(0.0))).is_err());
        assert_eq!(sink.rows_written(), 0);
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let sink = ResultSink::new(Vec::new(), MaxMode::Avoid).unwrap();
        std::thread::scope(|s| {
            for t in 0..4 {
                let sink = &sink;
                s.spawn(move || {
                    for _ in 0..50 {
                        sink.append(&record(&format!("T{t}"), None)).unwrap();
                    }
                });
            }
        });

        let text = String::from_utf8(sink.finish().unwrap()).unwrap();
        let rows: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(rows.len(), 200);
        assert!(rows.iter().all(|row| row.split('\t').count() == 11));
    }
}
