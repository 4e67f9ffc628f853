use crate::common::TestProject;
use dtr_cli::test_utils::DocumentFixture;

#[test]
fn test_lookup_by_index() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();

    let output = project.run_dtr(&["lookup", "0"]).unwrap();
    output.assert_success();
    assert_eq!(output.stdout.trim(), "colors.accent");

    let output = project.run_dtr(&["lookup", "7"]).unwrap();
    output.assert_success();
    assert_eq!(output.stdout.trim(), "spacing.sm");
}

#[test]
fn test_lookup_out_of_range() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();

    project
        .run_dtr(&["lookup", "8"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("No token at index 8");
}

#[test]
fn test_lookup_negative_index() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();

    project
        .run_dtr(&["lookup", "-1"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("No token at index -1");
}
