use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "wetland-rescue"])
        .status()
        .expect("failed to invoke cargo check for the wetland-rescue CLI binary");

    assert!(
        status.success(),
        "cargo check --bin wetland-rescue should succeed"
    );
}
