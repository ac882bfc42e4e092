//! End-to-end runs of the `dualsub` binary

use std::process::Command;

use pretty_assertions::assert_eq;

fn dualsub() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dualsub"))
}

#[test]
fn parse_subcommand_prints_cues() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("en.vtt");
    std::fs::write(&file, "WEBVTT\r\n\r\n00:01.500 --> 00:03.200\r\nHello\r\nthere\r\n").unwrap();

    let output = dualsub().arg("parse").arg(&file).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "00:01.500 --> 00:03.200 Hello there\n"
    );
}

#[test]
fn replay_subcommand_runs_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let en = dir.path().join("en.vtt");
    let tr = dir.path().join("tr.vtt");
    std::fs::write(&en, "00:00.000 --> 00:00.999\nHello\n").unwrap();
    std::fs::write(&tr, "00:00.000 --> 00:00.999\nMerhaba\n").unwrap();

    let output = dualsub()
        .args(["replay", "--step", "1000"])
        .arg(&en)
        .arg(&tr)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "[00:00.000] primary show \"Hello\"\n\
         [00:00.000] secondary show \"Merhaba\"\n\
         [00:01.000] primary hide\n\
         [00:01.000] secondary hide\n"
    );
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dualsub()
        .arg("issues")
        .arg(dir.path().join("missing.vtt"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
