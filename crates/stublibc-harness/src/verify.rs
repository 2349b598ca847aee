//! Verification of live stub behavior against the stub table.

use serde::{Deserialize, Serialize};
use stublibc_core::utsname::ENCLAVE_IDENTITY;
use stublibc_core::{Policy, ReturnValue, STUB_TABLE, SymbolEntry, errno};

use crate::probes::{self, ArgProfile, ERRNO_CANARY, Observation, Observed, Probe};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

pub const GATE: &str = "stub_table_conformance";

/// Result of verifying a single (symbol, profile) case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// `<symbol>/<profile>`.
    pub case_name: String,
    pub symbol: String,
    pub family: String,
    pub policy: String,
    pub profile: ArgProfile,
    pub outcome: Outcome,
    pub expected: String,
    pub actual: String,
    /// Human-readable mismatch description, if any.
    pub diff: Option<String>,
    /// errno observed after the call, when one was set.
    pub errno: Option<i32>,
}

impl VerificationResult {
    pub fn passed(&self) -> bool {
        self.outcome != Outcome::Fail
    }
}

/// Aggregated verification results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for r in &results {
            match r.outcome {
                Outcome::Pass => summary.passed += 1,
                Outcome::Fail => summary.failed += 1,
                Outcome::Skip => summary.skipped += 1,
            }
        }
        summary.results = results;
        summary
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Fraction of executed (non-skipped) cases that passed.
    pub fn pass_rate(&self) -> f64 {
        let executed = self.passed + self.failed;
        if executed == 0 {
            1.0
        } else {
            self.passed as f64 / executed as f64
        }
    }
}

/// Table value a caller is expected to observe.
pub fn expected_return(ret: ReturnValue) -> Observed {
    match ret {
        ReturnValue::Int(v) => Observed::Int(v),
        ReturnValue::Null => Observed::Ptr(0),
        ReturnValue::MapFailed => Observed::Ptr(libc::MAP_FAILED.addr()),
        ReturnValue::Text(s) => Observed::Text(s.to_string_lossy().into_owned()),
    }
}

fn render(obs: &Observation) -> String {
    let errno = if obs.errno == ERRNO_CANARY {
        String::from("unchanged")
    } else {
        errno::errno_name(obs.errno)
            .map(str::to_string)
            .unwrap_or_else(|| obs.errno.to_string())
    };
    format!("ret={} errno={errno}", obs.ret)
}

fn skipped(entry: &SymbolEntry, profile: ArgProfile) -> VerificationResult {
    VerificationResult {
        case_name: format!("{}/{}", entry.name, profile.as_str()),
        symbol: entry.name.to_string(),
        family: entry.category.as_str().to_string(),
        policy: entry.policy.kind().as_str().to_string(),
        profile,
        outcome: Outcome::Skip,
        expected: String::from("never returns"),
        actual: String::from("not probed"),
        diff: None,
        errno: None,
    }
}

/// Compare one probe with what the table promises.
pub fn check(entry: &SymbolEntry, probe: &Probe) -> VerificationResult {
    let mut problems = Vec::new();

    let expected = match (entry.policy, &probe.reference) {
        (Policy::Forward { .. }, Some(reference)) => reference.clone(),
        (Policy::Forward { target }, None) => {
            problems.push(format!("no reference call recorded for target {target}"));
            probe.observed.clone()
        }
        (policy, _) => match policy.outcome(probe.requested) {
            Some(outcome) => Observation {
                ret: expected_return(outcome.ret),
                errno: outcome.errno.unwrap_or(ERRNO_CANARY),
            },
            None => {
                problems.push(String::from("policy has no constant outcome"));
                probe.observed.clone()
            }
        },
    };

    let ret_matches = probe.observed.ret == Observed::Void || probe.observed.ret == expected.ret;
    if !ret_matches {
        problems.push(format!("return {} != {}", probe.observed.ret, expected.ret));
    }
    if probe.observed.errno != expected.errno {
        problems.push(format!("errno {} != {}", probe.observed.errno, expected.errno));
    }

    if let Some(identity) = &probe.host_identity {
        let fields = identity.iter().map(String::as_str);
        if fields.ne(ENCLAVE_IDENTITY.fields()) {
            problems.push(format!("host identity {identity:?}"));
        }
    } else if !probe.scratch_intact {
        problems.push(String::from("caller memory was written"));
    }

    VerificationResult {
        case_name: format!("{}/{}", entry.name, probe.profile.as_str()),
        symbol: entry.name.to_string(),
        family: entry.category.as_str().to_string(),
        policy: entry.policy.kind().as_str().to_string(),
        profile: probe.profile,
        outcome: if problems.is_empty() {
            Outcome::Pass
        } else {
            Outcome::Fail
        },
        expected: render(&expected),
        actual: render(&probe.observed),
        diff: (!problems.is_empty()).then(|| problems.join("; ")),
        errno: (probe.observed.errno != ERRNO_CANARY).then_some(probe.observed.errno),
    }
}

/// Probe and check every table entry under every argument profile.
pub fn verify_table() -> VerificationSummary {
    let mut results = Vec::with_capacity(STUB_TABLE.len() * ArgProfile::ALL.len());
    for entry in STUB_TABLE.iter() {
        for profile in ArgProfile::ALL {
            let result = match probes::probe(entry.symbol, profile) {
                Some(probe) => check(entry, &probe),
                None => skipped(entry, profile),
            };
            results.push(result);
        }
    }
    VerificationSummary::from_results(results)
}

/// [`verify_table`], logging a start record, one record per case and a
/// summary record.
pub fn run_gate(emitter: &mut LogEmitter) -> std::io::Result<VerificationSummary> {
    emitter.emit_entry(
        LogEntry::new("", LogLevel::Info, "stub_table.conformance.start")
            .with_gate(GATE)
            .with_details(serde_json::json!({
                "symbols": STUB_TABLE.len(),
                "profiles": ArgProfile::ALL.map(ArgProfile::as_str),
            })),
    )?;

    let summary = verify_table();
    for r in &summary.results {
        let level = if r.passed() {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        let mut entry = LogEntry::new("", level, "stub_table.conformance.case")
            .with_gate(GATE)
            .with_symbol(&r.symbol)
            .with_api_family(&r.family)
            .with_outcome(r.outcome)
            .with_details(serde_json::json!({
                "case": r.case_name,
                "policy": r.policy,
                "profile": r.profile,
                "expected": r.expected,
                "actual": r.actual,
                "diff": r.diff,
            }));
        if let Some(errno) = r.errno {
            entry = entry.with_errno(errno);
        }
        emitter.emit_entry(entry)?;
    }

    let outcome = if summary.all_passed() {
        Outcome::Pass
    } else {
        Outcome::Fail
    };
    emitter.emit_entry(
        LogEntry::new("", LogLevel::Info, "stub_table.conformance.end")
            .with_gate(GATE)
            .with_outcome(outcome)
            .with_details(serde_json::json!({
                "total": summary.total,
                "passed": summary.passed,
                "failed": summary.failed,
                "skipped": summary.skipped,
            })),
    )?;
    emitter.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stublibc_core::Symbol;

    #[test]
    fn whole_table_passes() {
        let summary = verify_table();
        let failures: Vec<_> = summary
            .results
            .iter()
            .filter(|r| !r.passed())
            .map(|r| format!("{}: {}", r.case_name, r.diff.as_deref().unwrap_or("")))
            .collect();
        assert!(failures.is_empty(), "{failures:#?}");
        assert_eq!(summary.skipped, ArgProfile::ALL.len());
        assert_eq!(summary.pass_rate(), 1.0);
    }

    #[test]
    fn tampered_probe_is_flagged() {
        let entry = Symbol::Read.entry();
        let mut probe = probes::probe(Symbol::Read, ArgProfile::Scratch).expect("probe");
        probe.observed.errno = errno::EBADF;
        probe.scratch_intact = false;
        let r = check(entry, &probe);
        assert_eq!(r.outcome, Outcome::Fail);
        let diff = r.diff.expect("diff");
        assert!(diff.contains("errno"));
        assert!(diff.contains("caller memory"));
    }

    #[test]
    fn quiet_failures_render_unchanged_errno() {
        let entry = Symbol::Getaddrinfo.entry();
        let probe = probes::probe(Symbol::Getaddrinfo, ArgProfile::Nulls).expect("probe");
        let r = check(entry, &probe);
        assert!(r.passed());
        assert_eq!(r.errno, None);
        assert!(r.expected.ends_with("errno=unchanged"));
    }

    #[test]
    fn summary_counts() {
        let entry = Symbol::Exit.entry();
        let s = VerificationSummary::from_results(vec![skipped(entry, ArgProfile::Nulls)]);
        assert_eq!((s.total, s.passed, s.failed, s.skipped), (1, 0, 0, 1));
        assert!(s.all_passed());
    }
}
