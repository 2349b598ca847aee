//! Turns the `export-symbols` feature into the `export_symbols` cfg the
//! stub attributes test.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(export_symbols)");
    if env::var_os("CARGO_FEATURE_EXPORT_SYMBOLS").is_some() {
        println!("cargo:rustc-cfg=export_symbols");
    }
}
