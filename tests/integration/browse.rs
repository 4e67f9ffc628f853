use crate::common::TestProject;
use dtr_cli::test_utils::DocumentFixture;

fn lines(stdout: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort_unstable();
    lines
}

#[test]
fn test_browse_raw_values() {
    let project = TestProject::with_document(&DocumentFixture::duplicates()).unwrap();

    let output = project.run_dtr(&["browse", "#F00"]).unwrap();
    output.assert_success();
    assert_eq!(lines(&output.stdout), ["danger", "error"]);
}

#[test]
fn test_browse_resolved_values_include_aliases() {
    let project = TestProject::with_document(&DocumentFixture::duplicates()).unwrap();

    let output = project.run_dtr(&["browse", "--resolved", "#F00"]).unwrap();
    output.assert_success();
    assert_eq!(lines(&output.stdout), ["alert", "danger", "error"]);
}

#[test]
fn test_browse_does_not_coerce_types() {
    let project = TestProject::with_document(&DocumentFixture::duplicates()).unwrap();

    let number = project.run_dtr(&["browse", "0"]).unwrap();
    number.assert_success();
    assert_eq!(lines(&number.stdout), ["zero"]);

    let string = project.run_dtr(&["browse", "\"0\""]).unwrap();
    string.assert_success();
    assert_eq!(lines(&string.stdout), ["zero-string"]);
}

#[test]
fn test_browse_json_output() {
    let project = TestProject::with_document(&DocumentFixture::duplicates()).unwrap();

    let output = project.run_dtr(&["browse", "#F00", "--format", "json"]).unwrap();
    output.assert_success();
    assert_eq!(output.json().as_array().map(Vec::len), Some(2));
}

#[test]
fn test_browse_without_matches_fails() {
    let project = TestProject::with_document(&DocumentFixture::duplicates()).unwrap();

    project
        .run_dtr(&["browse", "#0F0"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("No tokens with value #0F0");
}
