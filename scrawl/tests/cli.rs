// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

use assert_cmd::Command;
use predicates::prelude::*;

fn scrawl() -> Command {
    Command::cargo_bin("scrawl").unwrap()
}

#[test]
fn renders_full_line() {
    scrawl()
        .args(["--monochrome", "--child", "3", "--seq", "7", "close", "4"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[child3:\d+\] \[7\] close\(fd=4\) = 0\n$").unwrap());
}

#[test]
fn pathname_arguments_are_quoted() {
    scrawl()
        .args([
            "--monochrome",
            "--retval",
            "-2",
            "--errno",
            "2",
            "open",
            "/tmp/x",
            "0",
            "0o644",
        ])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "open(filename=\"/tmp/x\", flags=0x0 (O_RDONLY), mode=644) = -2 (No such file or directory)\n",
        ));
}

#[test]
fn colours_by_default() {
    scrawl()
        .args(["--retval", "20000", "getpid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[1;32m= 0x4e20\x1b[0m\n"));
}

#[test]
fn quiet_with_log_file() {
    let dir = tempfile::tempdir().unwrap();

    scrawl()
        .arg("-q")
        .arg("--logging")
        .arg(dir.path())
        .args(["--child", "5", "--seq", "1", "--32bit", "read", "0", "0x1000", "20000"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let log = std::fs::read_to_string(dir.path().join("scrawl-child5.log")).unwrap();
    assert!(!log.contains('\x1b'));
    assert!(log.ends_with("] [1] [32BIT] read(fd=0, buf=0x1000, count=0x4e20) = 0\n"));
}

#[test]
fn postmortem_dump_on_stderr() {
    scrawl()
        .args(["--postmortem", "--monochrome", "--seq", "2", "dup", "1"])
        .assert()
        .success()
        .stderr(predicate::str::ends_with("] [2] dup(fildes=1) = 0\n"));
}

#[test]
fn unknown_syscall_fails() {
    scrawl()
        .arg("not_a_syscall")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown syscall name: not_a_syscall"));
}

#[test]
fn too_many_arguments_fails() {
    scrawl()
        .args(["close", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("close takes 1 argument(s), 2 given"));
}
