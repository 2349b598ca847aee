//! Every entry point is exported through the same build-script cfg, and the
//! exported names are exactly the stub table's.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use stublibc_core::STUB_TABLE;

const GATE: &str = "#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]";

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn read(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("{}: {err}", path.display()))
}

fn abi_sources() -> Vec<(String, String)> {
    let mut sources: Vec<_> = fs::read_dir(crate_root().join("src"))
        .expect("src dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with("_abi.rs"))
        })
        .map(|path| (path.display().to_string(), read(&path)))
        .collect();
    sources.sort();
    sources
}

/// Name of the exported item declared on `line`, if any.
fn exported_name(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix("pub unsafe extern \"C\" fn ")
        .or_else(|| line.strip_prefix("pub extern \"C\" fn "))
        .or_else(|| line.strip_prefix("pub static "))?;
    let end = rest.find(['(', ':']).unwrap_or(rest.len());
    Some(&rest[..end])
}

#[test]
fn build_script_maps_feature_to_cfg() {
    let manifest = read(&crate_root().join("Cargo.toml"));
    assert!(manifest.contains("export-symbols = []"));

    let build = read(&crate_root().join("build.rs"));
    assert!(build.contains("CARGO_FEATURE_EXPORT_SYMBOLS"));
    assert!(build.contains("cargo:rustc-cfg=export_symbols"));
    assert!(build.contains("cargo:rustc-check-cfg=cfg(export_symbols)"));
}

#[test]
fn every_export_carries_the_gate() {
    let mut exported = BTreeSet::new();
    for (path, text) in abi_sources() {
        let lines: Vec<&str> = text.lines().collect();
        for (idx, line) in lines.iter().enumerate() {
            let Some(name) = exported_name(line) else {
                continue;
            };
            let attrs: Vec<&str> = lines[..idx]
                .iter()
                .rev()
                .take_while(|l| l.starts_with("#["))
                .copied()
                .collect();
            assert!(
                attrs.contains(&GATE),
                "{path}:{} `{name}` is not gated",
                idx + 1
            );
            assert!(exported.insert(name.to_string()), "`{name}` exported twice");
        }
        for (idx, line) in lines.iter().enumerate() {
            if line.contains("no_mangle") {
                assert_eq!(*line, GATE, "{path}:{} uses a different gate", idx + 1);
            }
        }
    }

    let mut expected: BTreeSet<String> = STUB_TABLE.iter().map(|e| e.name.to_string()).collect();
    expected.insert(String::from("stderr"));
    assert_eq!(exported, expected);
}

#[test]
fn gate_fits_on_one_line() {
    assert!(GATE.len() <= 100);
    for (path, text) in abi_sources() {
        for (idx, line) in text.lines().enumerate() {
            let width = line.len();
            assert!(width <= 100, "{path}:{} is {width} columns", idx + 1);
        }
    }
}
