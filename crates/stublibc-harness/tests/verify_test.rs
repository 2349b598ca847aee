//! End-to-end run of the conformance gate.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use stublibc_core::{STUB_TABLE, Symbol};
use stublibc_harness::probes::ArgProfile;
use stublibc_harness::report::{self, ConformanceReport};
use stublibc_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use stublibc_harness::verify;

#[derive(Clone, Default)]
struct Sink(Arc<Mutex<Vec<u8>>>);

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn gate_passes_and_logs_every_case() {
    let sink = Sink::default();
    let mut emitter = LogEmitter::to_writer(Box::new(sink.clone()), "it");
    let summary = verify::run_gate(&mut emitter).expect("gate");

    let failures: Vec<_> = summary.results.iter().filter(|r| !r.passed()).collect();
    assert!(summary.all_passed(), "{failures:#?}");
    assert_eq!(summary.total, STUB_TABLE.len() * ArgProfile::ALL.len());
    assert_eq!(summary.skipped, ArgProfile::ALL.len());

    let bytes = sink.0.lock().expect("lock").clone();
    let text = String::from_utf8(bytes).expect("utf8");
    let entries: Vec<LogEntry> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("jsonl record"))
        .collect();
    assert_eq!(entries.len(), summary.total + 2);
    assert_eq!(entries[0].event, "stub_table.conformance.start");
    let last = entries.last().expect("end record");
    assert_eq!(last.event, "stub_table.conformance.end");
    assert_eq!(last.outcome, Some(Outcome::Pass));

    let cases: Vec<_> = entries
        .iter()
        .filter(|e| e.event == "stub_table.conformance.case")
        .collect();
    assert_eq!(cases.len(), summary.total);
    for e in &cases {
        assert!(e.symbol.is_some() && e.api_family.is_some());
        assert_eq!(e.level, LogLevel::Info);
    }

    let read_errnos: Vec<_> = cases
        .iter()
        .filter(|e| e.symbol.as_deref() == Some("read"))
        .map(|e| e.errno)
        .collect();
    assert_eq!(read_errnos, vec![Some(libc::EIO); ArgProfile::ALL.len()]);

    let exit_cases: Vec<_> = cases
        .iter()
        .filter(|e| e.symbol.as_deref() == Some("exit"))
        .collect();
    assert!(exit_cases.iter().all(|e| e.outcome == Some(Outcome::Skip)));

    let mut ids: Vec<_> = entries.iter().map(|e| e.trace_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), entries.len(), "trace ids are unique");
}

#[test]
fn report_reflects_verification() {
    let summary = verify::verify_table();
    let report = ConformanceReport {
        title: String::from("stublibc Conformance Report"),
        timestamp: String::from("2026-01-01T00:00:00.000Z"),
        table_digest: report::table_digest(),
        summary,
    };

    let json: serde_json::Value = serde_json::from_str(&report.to_json()).expect("json");
    assert_eq!(json["summary"]["failed"], 0);
    assert_eq!(json["table_digest"], report::table_digest());

    let md = report.to_markdown();
    assert!(md.contains("| `write/hostile` | filesystem | claimed-success |"));
    assert!(!md.contains("| FAIL |"));
}

#[test]
fn digest_tracks_table_contents() {
    let digest = report::table_digest();
    assert_eq!(digest, report::table_digest());
    let rows = report::table_rows();
    assert_eq!(rows.len(), STUB_TABLE.len());
    assert_eq!(rows[Symbol::Uname as usize].policy, "synthetic");
}
