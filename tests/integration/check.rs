use crate::common::TestProject;
use dtr_cli::test_utils::DocumentFixture;

#[test]
fn test_check_passes_for_valid_document() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();

    project
        .run_dtr(&["check"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("All 8 tokens resolve")
        .assert_stdout_contains("legacy is deprecated");
}

#[test]
fn test_check_reports_broken_tokens() {
    let project = TestProject::with_document(&DocumentFixture::broken()).unwrap();

    let output = project.run_dtr(&["check"]).unwrap();
    output
        .assert_failure()
        .assert_stdout_contains("✗ a")
        .assert_stdout_contains("✗ b")
        .assert_stdout_contains("✗ dangling")
        .assert_stderr_contains("3 token(s) could not be resolved");
    assert!(!output.stdout.contains("✗ ok"));
}
