//! Failing runs: exit status 1, message on stderr, no partial surprises.

use kubectl_save::test_utils::relative_files;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::{POD_FOO, save_cmd};

#[test]
fn test_list_without_items_fails_without_files() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .current_dir(temp.path())
        .arg("out")
        .write_stdin("apiVersion: v1\nkind: List\n")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("<stdin>: object is not a list resource"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_unknown_placeholder_fails_before_reading_input() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .current_dir(temp.path())
        .args(["-t", "{{kind}}/{{nmae}}.yaml", "out", "does-not-exist.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid filename template"))
        .stderr(predicate::str::contains("did you mean `name`?"))
        .stderr(predicate::str::contains("does-not-exist.yaml").not());

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_escaping_template_is_rejected() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .args(["-t", "../{{name}}.yaml"])
        .arg(temp.path())
        .write_stdin(POD_FOO)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsafe output path"));
}

#[test]
fn test_dot_dot_name_is_rejected() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .args(["-t", "{{namespace}}/{{name}}"])
        .arg(temp.path().join("out"))
        .write_stdin("apiVersion: v1\nkind: Pod\nmetadata: {name: '..'}\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("contains a `..` segment"));

    assert!(!temp.path().join("default").exists());
}

#[test]
fn test_plain_text_input_suggests_yaml_output() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .arg(temp.path())
        .write_stdin("NAME    READY   STATUS    RESTARTS   AGE\nnginx   1/1     Running   0          2d\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unexpected type: expected a mapping, found string"))
        .stderr(predicate::str::contains("-o yaml"));
}

#[test]
fn test_null_document_after_a_resource_fails() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .arg(temp.path())
        .write_stdin(format!("{POD_FOO}--- ~\n"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<stdin>: unexpected type: expected a mapping, found null"));

    assert_eq!(relative_files(temp.path()).unwrap().len(), 1);
}

#[test]
fn test_null_only_input_fails_but_blank_input_succeeds() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .arg(temp.path())
        .write_stdin("--- null\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("found null"));

    save_cmd().arg(temp.path()).write_stdin("---\n# nothing here\n").assert().success();
}

#[test]
fn test_broken_yaml_names_the_document() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .arg(temp.path())
        .write_stdin(format!("{POD_FOO}---\nkind: [unclosed\n"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<stdin>: failed to decode YAML document 2"));

    // The first document was already saved
    assert_eq!(relative_files(temp.path()).unwrap().len(), 1);
}

#[test]
fn test_missing_name_reports_invalid_resource() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .current_dir(temp.path())
        .arg("out")
        .write_stdin("apiVersion: v1\nkind: Pod\nmetadata: {namespace: shop}\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid resource: name is missing or not a string"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_missing_input_file_names_the_file() {
    let temp = TempDir::new().unwrap();

    save_cmd()
        .current_dir(temp.path())
        .args(["out", "missing.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.yaml: failed to open missing.yaml"));
}

#[test]
fn test_error_in_second_file_is_prefixed_with_its_name() {
    let temp = TempDir::new().unwrap();
    let inputs = TempDir::new().unwrap();
    let good = inputs.path().join("good.yaml");
    let bad = inputs.path().join("bad.yaml");
    fs::write(&good, POD_FOO).unwrap();
    fs::write(&bad, "- not\n- a\n- mapping\n").unwrap();

    save_cmd()
        .arg(temp.path())
        .arg(&good)
        .arg(&bad)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!(
            "{}: unexpected type: expected a mapping, found sequence",
            bad.display()
        )));
}

#[test]
fn test_file_blocking_a_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("v1--Pod"), "not a directory").unwrap();

    save_cmd()
        .arg(temp.path())
        .write_stdin(POD_FOO)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to create directory"));
}
