//! JSONL structured log for harness gates.
//!
//! One JSON object per line. Every record carries `timestamp`, `trace_id`,
//! `level` and `event`; the remaining fields are present only when set.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Verdict attached to a gate or case record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errno: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// New record stamped with the current UTC time.
    ///
    /// An empty `trace_id` is filled in by [`LogEmitter::emit_entry`].
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: utc_timestamp(Utc::now()),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            gate: None,
            symbol: None,
            api_family: None,
            outcome: None,
            errno: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_gate(mut self, gate: impl Into<String>) -> Self {
        self.gate = Some(gate.into());
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_api_family(mut self, family: impl Into<String>) -> Self {
        self.api_family = Some(family.into());
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_errno(mut self, errno: i32) -> Self {
        self.errno = Some(errno);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Writes [`LogEntry`] records as JSON lines.
pub struct LogEmitter {
    out: BufWriter<Box<dyn Write + Send>>,
    run_id: String,
    seq: u64,
}

impl LogEmitter {
    /// Log to `path`, creating parent directories and truncating any
    /// previous log.
    pub fn to_file(path: &Path, run_id: impl Into<String>) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self::to_writer(Box::new(file), run_id))
    }

    pub fn to_writer(out: Box<dyn Write + Send>, run_id: impl Into<String>) -> Self {
        Self {
            out: BufWriter::new(out),
            run_id: run_id.into(),
            seq: 0,
        }
    }

    /// Append one record. Records without a trace id get
    /// `<run_id>::<seq>`.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> io::Result<()> {
        if entry.trace_id.is_empty() {
            entry.trace_id = format!("{}::{:03}", self.run_id, self.seq);
        }
        self.seq += 1;
        let line = entry.to_jsonl().map_err(io::Error::other)?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")
    }

    pub fn emitted(&self) -> u64 {
        self.seq
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub fn utc_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn timestamp_formatting() {
        let epoch = DateTime::from_timestamp(0, 0).expect("epoch");
        assert_eq!(utc_timestamp(epoch), "1970-01-01T00:00:00.000Z");
        let leap_day = DateTime::from_timestamp_millis(951_782_400_123).expect("instant");
        assert_eq!(utc_timestamp(leap_day), "2000-02-29T00:00:00.123Z");
        let later = DateTime::from_timestamp(1_767_225_599, 0).expect("instant");
        assert_eq!(utc_timestamp(later), "2025-12-31T23:59:59.000Z");
    }

    #[test]
    fn optional_fields_are_omitted() {
        let line = LogEntry::new("t-1", LogLevel::Info, "gate.start")
            .to_jsonl()
            .expect("json");
        let value: serde_json::Value = serde_json::from_str(&line).expect("parse");
        let obj = value.as_object().expect("object");
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["level"], "info");
        assert_eq!(obj["trace_id"], "t-1");
        assert!(!obj.contains_key("symbol"));
    }

    #[test]
    fn emitter_assigns_trace_ids() {
        let sink = Shared::default();
        let mut emitter = LogEmitter::to_writer(Box::new(sink.clone()), "run");
        emitter
            .emit_entry(
                LogEntry::new("", LogLevel::Info, "case")
                    .with_symbol("read")
                    .with_api_family("filesystem")
                    .with_outcome(Outcome::Pass)
                    .with_errno(5),
            )
            .expect("emit");
        emitter
            .emit_entry(LogEntry::new("explicit", LogLevel::Warn, "case"))
            .expect("emit");
        emitter.flush().expect("flush");
        assert_eq!(emitter.emitted(), 2);

        let bytes = sink.0.lock().expect("lock").clone();
        let text = String::from_utf8(bytes).expect("utf8");
        let entries: Vec<LogEntry> = text
            .lines()
            .map(|l| serde_json::from_str(l).expect("entry"))
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].trace_id, "run::000");
        assert_eq!(entries[0].errno, Some(5));
        assert_eq!(entries[0].outcome, Some(Outcome::Pass));
        assert_eq!(entries[1].trace_id, "explicit");
    }
}
