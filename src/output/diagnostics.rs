//! Verbose per-pair diagnostic trace.
//!
//! This is an output stream in its own right (one block per evaluated pair),
//! separate from `tracing` logs. Blocks and reject/accept lines are rendered
//! in full before the lock is taken.

use std::io::Write;
use std::sync::Arc;
use parking_lot::Mutex;

use crate::stats::binomial;
use crate::Result;

/// Intermediate state of one pair evaluation.
#[derive(Debug, Clone)]
pub struct PairTrace<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub source_degree: usize,
    pub target_degree: usize,
    /// Connectors held by both.
    pub both: usize,
    /// Connectors held by either.
    pub either: usize,
    /// Connectors known to the dataset.
    pub universe: usize,
    pub chance_source: f64,
    pub chance_target: f64,
    pub not_chance_source: f64,
    pub not_chance_target: f64,
    pub rate: f64,
    pub successes: u64,
    pub observations: u64,
}

impl PairTrace<'_> {
    /// Render the block, including all three binomial tails.
    pub fn render(&self) -> String {
        let (k, n, p) = (self.successes, self.observations, self.rate);
        let mut out = String::from(BORDER);
        field(&mut out, "source", self.source);
        field(&mut out, "target", self.target);
        out.push_str(RULE);
        field(&mut out, "degree source", self.source_degree);
        field(&mut out, "degree target", self.target_degree);
        field(&mut out, "both of", self.both);
        field(&mut out, "either of", self.either);
        field(&mut out, "universe", self.universe);
        out.push_str(RULE);
        field(&mut out, "chance source", self.chance_source);
        field(&mut out, "chance target", self.chance_target);
        field(&mut out, "not chance source", self.not_chance_source);
        field(&mut out, "not chance target", self.not_chance_target);
        out.push_str(RULE);
        field(&mut out, "rate", self.rate);
        field(&mut out, "successes", self.successes);
        field(&mut out, "observations", self.observations);
        out.push_str(RULE);
        field(&mut out, "p less", binomial::one_sided_less(k, n, p));
        field(&mut out, "p greater", binomial::one_sided_greater(k, n, p));
        field(&mut out, "p two-sided", binomial::two_sided(k, n, p));
        out.push_str(BORDER);
        out
    }
}

const BORDER: &str = "*******************************\n";
const RULE: &str = "*------------------------------\n";

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("* {label:<20}{value}\n"));
}

/// Mutex-guarded diagnostic writer.
pub struct Diagnostics {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Diagnostics {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Write one line.
    pub fn line(&self, message: &str) -> Result<()> {
        let mut text = String::with_capacity(message.len() + 1);
        text.push_str(message);
        text.push('\n');
        self.write(&text)
    }

    /// Write the full block for one pair followed by its verdict line.
    pub fn trace(&self, trace: &PairTrace<'_>, verdict: &str) -> Result<()> {
        let mut text = trace.render();
        text.push_str(verdict);
        text.push('\n');
        self.write(&text)
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

/// In-memory diagnostic target that can be read back after a run.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace() -> PairTrace<'static> {
        PairTrace {
            source: "X",
            target: "Y",
            source_degree: 2,
            target_degree: 2,
            both: 1,
            either: 3,
            universe: 4,
            chance_source: 2.0 / 3.0,
            chance_target: 2.0 / 3.0,
            not_chance_source: 1.0 / 3.0,
            not_chance_target: 1.0 / 3.0,
            rate: 4.0 / 9.0,
            successes: 1,
            observations: 3,
        }
    }

    #[test]
    fn test_render_contains_all_tails() {
        let text = trace().render();
        assert!(text.contains("* source              X"));
        assert!(text.contains("* p less"));
        assert!(text.contains("* p greater"));
        assert!(text.contains("* p two-sided"));
        assert!(text.contains("* both of             1\n"));
    }

    #[test]
    fn test_shared_buffer_collects_lines() {
        let buf = SharedBuffer::new();
        let diag = Diagnostics::new(buf.clone());
        diag.line("Rejected (X, Y)").unwrap();
        diag.trace(&trace(), "Accepted (X, Y)").unwrap();

        let text = buf.contents();
        assert!(text.starts_with("Rejected (X, Y)\n"));
        assert_eq!(text.matches("*******************************").count(), 2);
        assert!(text.ends_with("*******************************\nAccepted (X, Y)\n"));
    }
}
