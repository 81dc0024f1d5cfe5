//! Build script for cfx.
//!
//! Records the compiler version so the environment context can report the
//! runtime it was built with.

use std::env;
use std::process::Command;

fn main() {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|v| v.trim().to_string());

    if let Some(version) = version {
        println!("cargo:rustc-env=CFX_RUSTC_VERSION={version}");
    }

    println!("cargo:rerun-if-env-changed=RUSTC");
    println!("cargo:rerun-if-changed=build.rs");
}
