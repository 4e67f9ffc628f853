use crate::common::TestProject;
use dtr_cli::test_utils::DocumentFixture;

#[test]
fn test_config_names_document_and_prefix() {
    let project = TestProject::new().unwrap();
    project.write_file("tokens/theme.json", &DocumentFixture::theme().content).unwrap();
    project.write_config("document = \"tokens/theme.json\"\nprefix = \"theme\"").unwrap();

    project
        .run_dtr(&["resolve", "theme.spacing.sm"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("theme.spacing.sm = 4");
}

#[test]
fn test_cli_prefix_overrides_config() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();
    project.write_config("prefix = \"theme\"").unwrap();

    project
        .run_dtr(&["--prefix", "ui", "resolve", "ui.colors.base"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("ui.colors.base = #007BFF");
}

#[test]
fn test_explicit_config_path() {
    let project = TestProject::new().unwrap();
    project.write_file("design/tokens.toml", "[spacing]\nsm = 4\n").unwrap();
    project.write_file("design/custom.toml", "document = \"tokens.toml\"\n").unwrap();

    project
        .run_dtr(&["--config", "design/custom.toml", "resolve", "spacing.sm"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("spacing.sm = 4");
}

#[test]
fn test_missing_document() {
    let project = TestProject::new().unwrap();

    project
        .run_dtr(&["list"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Token document not found")
        .assert_stderr_contains("--document");
}

#[test]
fn test_unknown_config_key() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();
    project.write_config("documnet = \"tokens.json\"").unwrap();

    project.run_dtr(&["list"]).unwrap().assert_failure().assert_stderr_contains("Configuration error");
}

#[test]
fn test_invalid_prefix() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();

    project
        .run_dtr(&["--prefix", "{bad}", "list"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Invalid token option 'prefix'");
}

#[test]
fn test_malformed_document() {
    let project = TestProject::with_document(&DocumentFixture::json("{ \"a\": ")).unwrap();

    project
        .run_dtr(&["list"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Failed to parse JSON token document");
}
