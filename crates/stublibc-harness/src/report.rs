//! Report generation: the stub table and conformance results.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use stublibc_core::{Policy, ReturnValue, STUB_TABLE, SymbolEntry, errno};

use crate::structured_log::Outcome;
use crate::verify::VerificationSummary;

/// One stub table row, flattened for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub symbol: String,
    pub category: String,
    pub policy: String,
    /// Return value the caller sees.
    pub returns: String,
    /// errno behavior: a symbolic name, `unchanged`, or `as target`.
    pub errno: String,
    pub signature: String,
}

impl TableRow {
    #[must_use]
    pub fn from_entry(entry: &SymbolEntry) -> Self {
        let (returns, errno) = describe(entry.policy);
        Self {
            symbol: entry.name.to_string(),
            category: entry.category.as_str().to_string(),
            policy: entry.policy.kind().as_str().to_string(),
            returns,
            errno,
            signature: entry.signature.to_string(),
        }
    }

    fn canonical_line(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}\n",
            self.symbol, self.category, self.policy, self.returns, self.errno, self.signature
        )
    }
}

fn render_return(ret: ReturnValue) -> String {
    match ret {
        ReturnValue::Int(v) => v.to_string(),
        ReturnValue::Null => String::from("NULL"),
        ReturnValue::MapFailed => String::from("MAP_FAILED"),
        ReturnValue::Text(s) => format!("{:?}", s.to_string_lossy()),
    }
}

fn describe(policy: Policy) -> (String, String) {
    let unchanged = || String::from("unchanged");
    match policy {
        Policy::NoOpSuccess(ret) | Policy::Synthetic(ret) => (render_return(ret), unchanged()),
        Policy::FailClosed {
            ret,
            errno: Some(code),
        } => (
            render_return(ret),
            errno::errno_name(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string()),
        ),
        Policy::FailClosed { ret, errno: None } => (render_return(ret), unchanged()),
        Policy::ClaimedSuccess => (String::from("requested count"), unchanged()),
        Policy::Forward { target } => (format!("-> {target}"), String::from("as target")),
        Policy::Freeze => (String::from("never returns"), unchanged()),
    }
}

/// Every table row, in table order.
#[must_use]
pub fn table_rows() -> Vec<TableRow> {
    STUB_TABLE.iter().map(TableRow::from_entry).collect()
}

/// SHA-256 over the canonical rendering of every row, hex encoded.
///
/// Any policy, errno, name or signature change moves the digest.
#[must_use]
pub fn table_digest() -> String {
    let mut hasher = Sha256::new();
    for row in table_rows() {
        hasher.update(row.canonical_line().as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[must_use]
pub fn table_markdown() -> String {
    let mut out = String::from("# Stub table\n\n");
    out.push_str(&format!("- Symbols: {}\n", STUB_TABLE.len()));
    out.push_str(&format!("- Digest: `{}`\n\n", table_digest()));
    out.push_str("| Symbol | Category | Policy | Returns | errno | Signature |\n");
    out.push_str("|--------|----------|--------|---------|-------|-----------|\n");
    for r in table_rows() {
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | `{}` |\n",
            r.symbol, r.category, r.policy, r.returns, r.errno, r.signature
        ));
    }
    out
}

pub fn table_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "digest": table_digest(),
        "symbols": table_rows(),
    }))
}

/// A conformance report combining verification results and the table
/// digest they were checked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    pub table_digest: String,
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Table digest: `{}`\n", self.table_digest));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n", self.summary.failed));
        out.push_str(&format!("- Skipped: {}\n\n", self.summary.skipped));

        out.push_str("| Case | Family | Policy | Expected | Actual | Status |\n");
        out.push_str("|------|--------|--------|----------|--------|--------|\n");
        for r in &self.summary.results {
            let status = match r.outcome {
                Outcome::Pass => "PASS",
                Outcome::Fail => "FAIL",
                Outcome::Skip => "SKIP",
            };
            out.push_str(&format!(
                "| `{}` | {} | {} | {} | {} | {} |\n",
                r.case_name, r.family, r.policy, r.expected, r.actual, status
            ));
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stublibc_core::Symbol;

    #[test]
    fn digest_is_stable_hex() {
        let a = table_digest();
        assert_eq!(a.len(), 64);
        assert!(a.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(a, table_digest());
    }

    #[test]
    fn rows_describe_policies() {
        let read = TableRow::from_entry(Symbol::Read.entry());
        assert_eq!(read.policy, "fail-closed");
        assert_eq!((read.returns.as_str(), read.errno.as_str()), ("-1", "EIO"));

        let write = TableRow::from_entry(Symbol::Write.entry());
        assert_eq!(write.returns, "requested count");

        let mmap = TableRow::from_entry(Symbol::Mmap.entry());
        assert_eq!(mmap.returns, "-> mmap");

        let gai = TableRow::from_entry(Symbol::GaiStrerror.entry());
        assert_eq!(gai.returns, "\"Unknown error\"");

        let time = TableRow::from_entry(Symbol::Time.entry());
        assert_eq!(time.errno, "unchanged");
    }

    #[test]
    fn markdown_lists_every_symbol() {
        let md = table_markdown();
        for entry in STUB_TABLE.iter() {
            let cell = format!("| `{}` |", entry.name);
            assert!(md.contains(&cell), "{}", entry.name);
        }
    }

    #[test]
    fn table_json_round_trips_rows() {
        let json = table_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        let symbols = value["symbols"].clone();
        let rows: Vec<TableRow> = serde_json::from_value(symbols).expect("rows");
        assert_eq!(rows, table_rows());
        assert_eq!(value["digest"], table_digest());
    }

    #[test]
    fn report_renders_summary() {
        let report = ConformanceReport {
            title: String::from("t"),
            timestamp: String::from("1970-01-01T00:00:00.000Z"),
            table_digest: table_digest(),
            summary: VerificationSummary::default(),
        };
        let md = report.to_markdown();
        assert!(md.starts_with("# t\n"));
        assert!(md.contains("- Failed: 0"));
        let parsed: serde_json::Value = serde_json::from_str(&report.to_json()).expect("json");
        assert_eq!(parsed["summary"]["total"], 0);
    }
}
