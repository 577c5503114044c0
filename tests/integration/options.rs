//! Command line options.

use kubectl_save::test_utils::relative_files;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::{LIST_AB, POD_FOO, save_cmd};

#[test]
fn test_default_output_path_is_current_directory() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .current_dir(temp.path())
        .write_stdin(POD_FOO)
        .assert()
        .success()
        .stdout("./v1--Pod/default--foo.yaml\n");

    assert!(temp.path().join("v1--Pod/default--foo.yaml").is_file());
}

#[test]
fn test_template_flag() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .current_dir(temp.path())
        .args(["-t", "{{kind}}/{{name}}.yml", "out"])
        .write_stdin(LIST_AB)
        .assert()
        .success()
        .stdout("out/Pod/a.yml\nout/Pod/b.yml\n");
}

#[test]
fn test_go_style_template() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .args(["--template", "{{.namespace}}/{{.kind}}-{{.name}}.yaml"])
        .arg(temp.path())
        .write_stdin(POD_FOO)
        .assert()
        .success();

    assert_eq!(relative_files(temp.path()).unwrap(), [PathBuf::from("default/Pod-foo.yaml")]);
}

#[test]
fn test_template_from_environment() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .env("KUBECTL_SAVE_TEMPLATE", "{{name}}.yaml")
        .arg(temp.path())
        .write_stdin(POD_FOO)
        .assert()
        .success();

    assert_eq!(relative_files(temp.path()).unwrap(), [PathBuf::from("foo.yaml")]);
}

#[test]
fn test_template_flag_beats_environment() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .env("KUBECTL_SAVE_TEMPLATE", "{{name}}.yaml")
        .args(["-t", "{{kind}}.yaml"])
        .arg(temp.path())
        .write_stdin(POD_FOO)
        .assert()
        .success();

    assert_eq!(relative_files(temp.path()).unwrap(), [PathBuf::from("Pod.yaml")]);
}

#[test]
fn test_file_arguments_and_input_flag() {
    let temp = TempDir::new().unwrap();
    let inputs = TempDir::new().unwrap();
    let pods = inputs.path().join("pods.yaml");
    let more = inputs.path().join("more.yaml");
    fs::write(&pods, LIST_AB).unwrap();
    fs::write(&more, POD_FOO).unwrap();

    save_cmd()
        .current_dir(temp.path())
        .arg("out")
        .arg(&pods)
        .arg("-f")
        .arg(&more)
        .assert()
        .success()
        .stdout("out/v1--Pod/default--a.yaml\nout/v1--Pod/default--b.yaml\nout/v1--Pod/default--foo.yaml\n");
}

#[test]
fn test_dash_reads_stdin_between_files() {
    let temp = TempDir::new().unwrap();
    let inputs = TempDir::new().unwrap();
    let file = inputs.path().join("pod.yaml");
    fs::write(&file, POD_FOO).unwrap();

    save_cmd()
        .current_dir(temp.path())
        .arg("out")
        .arg("-")
        .arg(&file)
        .write_stdin(LIST_AB)
        .assert()
        .success()
        .stdout("out/v1--Pod/default--a.yaml\nout/v1--Pod/default--b.yaml\nout/v1--Pod/default--foo.yaml\n");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .arg("-v")
        .arg(temp.path())
        .write_stdin(POD_FOO)
        .assert()
        .success()
        .stderr(predicate::str::contains("saved resource"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    save_cmd()
        .args(["-q", "-v"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unknown_flag_is_reported_with_usage() {
    save_cmd()
        .arg("--bogus")
        .write_stdin("")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: unexpected argument '--bogus' found"))
        .stderr(predicate::str::contains("details:"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_help_goes_to_stdout_and_succeeds() {
    save_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: kubectl-save"))
        .stderr(predicate::str::is_empty());
}
