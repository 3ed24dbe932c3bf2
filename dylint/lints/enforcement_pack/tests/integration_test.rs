//! Integration tests for enforcement_pack lints.
//!
//! These tests run `cargo dylint` on the main crate and verify the output.

use std::process::Command;

fn cargo_dylint(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .arg("dylint")
        .args(args)
        .current_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/../../.."))
        .output()
        .expect("Failed to run cargo dylint")
}

#[test]
fn test_main_crate_passes_enforcement_pack() {
    let output = cargo_dylint(&["--lib", "enforcement_pack", "--", "--manifest-path", "Cargo.toml"]);

    let stderr = String::from_utf8_lossy(&output.stderr);

    // The main crate must not print or stub out operations with panics
    assert!(
        output.status.success(),
        "dylint should pass on main codebase, got: {}",
        stderr
    );
}

#[test]
fn test_lints_are_registered_at_deny() {
    let output = cargo_dylint(&["list", "--lib", "enforcement_pack"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    for lint in ["enforcement_pack::no_println", "enforcement_pack::no_panic_stubs"] {
        assert!(stdout.contains(lint), "{} lint should be registered", lint);
    }
    assert!(stdout.contains("deny"), "lints should be at deny level");
}
