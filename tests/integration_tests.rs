use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

fn nsb8() -> Command {
    Command::cargo_bin("nsb8").unwrap()
}

#[test]
fn runs_without_arguments() {
    nsb8().assert().success();
}

#[test]
fn runs_add_program() {
    nsb8()
        .arg("run")
        .arg("tests/files/add.asm")
        .arg("--minimal")
        .assert()
        .success()
        .stdout(contains("Assembled successfully. Program size: 6 bytes."))
        .stdout(contains("Execution halted normally."))
        .stdout(contains("Screen (0xEEE-FFF):"))
        .stdout(contains("Final A:4 B:10 C:0 | Flags(CZSP):1000"));
}

#[test]
fn path_shortcut_runs_file() {
    nsb8()
        .arg("tests/files/add.asm")
        .assert()
        .success()
        .stdout(contains("Final A:4 B:10 C:0"));
}

#[test]
fn loop_hits_cycle_limit() {
    nsb8()
        .args(["run", "tests/files/loop.asm", "--minimal", "--cycles", "64"])
        .assert()
        .success()
        .stdout(contains("Warning: Execution hit max cycle limit."))
        .stdout(contains("Final A:3 B:0 C:0 | Flags(CZSP):0101"));
}

#[test]
fn cycle_limit_from_environment() {
    nsb8()
        .args(["run", "tests/files/loop.asm", "--minimal"])
        .env("NSB8_MAX_CYCLES", "10")
        .assert()
        .success()
        .stdout(contains("Warning: Execution hit max cycle limit."));
}

#[test]
fn reports_unknown_mnemonic() {
    nsb8()
        .args(["run", "tests/files/bad.asm", "--minimal"])
        .assert()
        .failure()
        .stderr(contains("line 3: unknown mnemonic 'MOV'"));
}

#[test]
fn rejects_unknown_extension() {
    nsb8()
        .args(["run", "tests/files/notes.txt"])
        .assert()
        .failure()
        .stderr(contains("unknown extension"));
}

#[test]
fn checks_file() {
    nsb8()
        .args(["check", "tests/files/add.asm", "--listing"])
        .assert()
        .success()
        .stdout(contains("0000  06 FA     LAI 250"))
        .stdout(contains("0005  01        HLT"))
        .stderr(contains("no errors found!"));
}

#[test]
fn compiles_and_runs_binary() {
    let dest = std::env::temp_dir().join(format!("nsb8-add-{}.bin", std::process::id()));
    nsb8()
        .arg("compile")
        .arg("tests/files/add.asm")
        .arg(&dest)
        .assert()
        .success();
    assert_eq!(
        std::fs::read(&dest).unwrap(),
        [0x06, 250, 0x0E, 10, 0x80, 0x01]
    );

    nsb8()
        .arg("run")
        .arg(&dest)
        .arg("--minimal")
        .assert()
        .success()
        .stdout(contains("Loaded image. Program size: 6 bytes."))
        .stdout(contains("Final A:4 B:10 C:0 | Flags(CZSP):1000"));
    std::fs::remove_file(&dest).unwrap();
}

#[test]
fn eval_runs_text() {
    nsb8()
        .args(["eval", "run LAI 200\nLBI 55\nADB\nHLT"])
        .assert()
        .success()
        .stdout(contains("Final A:255 B:55 C:0 | Flags(CZSP):0011"));
}

#[test]
fn eval_without_text() {
    nsb8()
        .arg("eval")
        .assert()
        .success()
        .stdout(contains("Error: No assembly code provided."));
}

#[test]
fn eval_manager_mode() {
    nsb8()
        .args(["eval", "new hello LAI 72\nHLT"])
        .assert()
        .success()
        .stdout(contains(".t add hello {text:\nLAI 72\nHLT\n}"));
}

#[test]
fn loop_warns_on_stderr() {
    nsb8()
        .args(["run", "tests/files/loop.asm", "--cycles", "64"])
        .assert()
        .success()
        .stderr(contains("Stopped"))
        .stderr(contains("cycle limit of 64 reached"));
}
