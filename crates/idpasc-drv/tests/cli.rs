//! End-to-end tests driving the `idpasc` binary as a subprocess.
//!
//! Each test writes a small source file into a temp directory and asserts on
//! the driver's stdout/exit code, matching the CLI contract and exit-code
//! policy documented in `idpasc_drv::main`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn idpasc() -> Command {
    Command::cargo_bin("idpasc").unwrap()
}

fn write_source(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_argument_exits_nonzero_with_usage() {
    idpasc()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("usage: idpasc"));
}

#[test]
fn extra_argument_is_rejected() {
    let dir = TempDir::new().unwrap();
    let a = write_source(&dir, "a.idp", "program p. mulai selesai.");
    let b = write_source(&dir, "b.idp", "program q. mulai selesai.");

    idpasc()
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid arguments"));
}

#[test]
fn unreadable_file_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does_not_exist.idp");

    idpasc()
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn hello_world_compiles_and_reports_every_stage() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "hello.idp",
        "program hello; mulai writeln('halo dunia') selesai.",
    );

    idpasc()
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Token"))
        .stdout(predicate::str::contains("Program"));
}

#[test]
fn syntax_error_is_fatal_and_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "broken.idp", "program p mulai selesai.");

    idpasc().arg(&source).assert().failure().code(1);
}

#[test]
fn semantic_error_still_exits_zero() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "sema_error.idp",
        "program p; variabel x: integer; mulai x := benar selesai.",
    );

    idpasc()
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Semantic Error"));
}

#[test]
fn arithmetic_and_control_flow_program_compiles_cleanly() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "control_flow.idp",
        r#"
        program hitung;
        variabel i, total: integer;
        mulai
            total := 0;
            untuk i := 1 ke 10 lakukan
                jika i mod 2 = 0 maka
                    total := total + i
                selainitu
                    total := total - 1;
            writeln(total)
        selesai.
        "#,
    );

    idpasc()
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Semantic Error").not());
}
