use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn formz(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("formz").unwrap();
    cmd.env("FORMZ_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn create_survey(home: &Path) {
    formz(home)
        .args([
            "new",
            "--title",
            "Survey",
            "--description",
            "Tell us about you",
            "--field",
            "text*:Name",
            "--field",
            "single-choice:Colour:Red,Blue",
            "--field",
            "multi-choice:Extras:A,B,C",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form created: Survey (3 questions)"));
}

fn stored(home: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(home.join("form-storage.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn empty_store_lists_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    formz(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No forms yet"));
}

#[test]
fn create_then_list() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());

    formz(temp_dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Survey"))
        .stdout(predicate::str::contains("3 questions"))
        .stdout(predicate::str::contains("0 responses"))
        .stdout(predicate::str::contains("Tell us about you"));

    let state = stored(temp_dir.path());
    assert_eq!(state["forms"].as_array().unwrap().len(), 1);
    assert_eq!(state["forms"][0]["fields"][1]["type"], "single-choice");
    assert!(state["forms"][0]["createdAt"].is_i64());
}

#[test]
fn new_form_without_title_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    formz(temp_dir.path())
        .args(["new", "--field", "text:Name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));

    assert!(!temp_dir.path().join("form-storage.json").exists());
}

#[test]
fn edit_changes_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());

    formz(temp_dir.path())
        .args([
            "edit",
            "1",
            "--title",
            "Renamed",
            "--remove",
            "3",
            "--option",
            "2=Green",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form updated: Renamed"));

    let state = stored(temp_dir.path());
    let form = &state["forms"][0];
    assert_eq!(form["title"], "Renamed");
    assert_eq!(form["fields"].as_array().unwrap().len(), 2);
    assert_eq!(form["fields"][1]["options"][2], "Green");
}

#[test]
fn edit_without_changes_shows_form() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());

    formz(temp_dir.path())
        .args(["edit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Name *"))
        .stdout(predicate::str::contains("( ) 2) Blue"));
}

#[test]
fn edit_unknown_form_redirects_to_list() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());

    formz(temp_dir.path())
        .args(["edit", "no-such-form", "--title", "X"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Survey"));

    assert_eq!(stored(temp_dir.path())["forms"][0]["title"], "Survey");
}

#[test]
fn preview_with_answers_records_response() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());

    formz(temp_dir.path())
        .args([
            "preview", "1", "--answer", "1=Ada", "--answer", "2=blue", "--answer", "3=A,C",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Response recorded for Survey"))
        .stdout(predicate::str::contains("1 response"));

    let state = stored(temp_dir.path());
    let response = &state["responses"][0];
    assert_eq!(response["formId"], state["forms"][0]["id"]);
    let field_id = state["forms"][0]["fields"][1]["id"].as_str().unwrap();
    assert_eq!(response["answers"][field_id]["value"], "Blue");

    formz(temp_dir.path())
        .args(["responses", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Ada"))
        .stdout(predicate::str::contains("Extras: A, C"));
}

#[test]
fn preview_requires_required_answers() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());

    formz(temp_dir.path())
        .args(["preview", "1", "--answer", "2=Red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name"));

    assert!(stored(temp_dir.path())["responses"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn preview_prompts_on_stdin() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());

    formz(temp_dir.path())
        .args(["preview", "1"])
        .write_stdin("\nGrace\nPurple\n1\nB\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("This question is required."))
        .stdout(predicate::str::contains("'Purple' is not one of the options."))
        .stdout(predicate::str::contains("Response recorded for Survey"));

    formz(temp_dir.path())
        .args(["responses", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Grace"))
        .stdout(predicate::str::contains("Colour: Red"));
}

#[test]
fn preview_unknown_form() {
    let temp_dir = tempfile::tempdir().unwrap();
    formz(temp_dir.path())
        .args(["preview", "missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form not found"));
}

#[test]
fn delete_removes_responses() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());
    for name in ["Ada", "Grace"] {
        formz(temp_dir.path())
            .args(["preview", "1", "--answer", &format!("1={}", name)])
            .assert()
            .success();
    }

    formz(temp_dir.path())
        .args(["rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Form deleted: Survey (2 responses removed)",
        ));

    let state = stored(temp_dir.path());
    assert!(state["forms"].as_array().unwrap().is_empty());
    assert!(state["responses"].as_array().unwrap().is_empty());
}

#[test]
fn go_navigates_by_path() {
    let temp_dir = tempfile::tempdir().unwrap();

    formz(temp_dir.path())
        .args(["go", "/forms/new", "--title", "Poll", "--field", "radio*:Pick:Yes,No"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form created: Poll (1 questions)"));

    let id = stored(temp_dir.path())["forms"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    formz(temp_dir.path())
        .args(["go", &format!("/forms/{}/preview", id), "--answer", "1=No"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Response recorded for Poll"));

    formz(temp_dir.path())
        .args(["go", "/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Poll"));

    formz(temp_dir.path())
        .args(["go", "/settings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown route: /settings"));
}

#[test]
fn corrupt_storage_starts_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("form-storage.json"), "{ not json").unwrap();

    formz(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No forms yet"));
}

#[test]
fn config_hides_response_counts() {
    let temp_dir = tempfile::tempdir().unwrap();
    create_survey(temp_dir.path());

    formz(temp_dir.path())
        .args(["config", "show-responses", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show-responses set to false"));

    formz(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("date-format = %Y-%m-%d"))
        .stdout(predicate::str::contains("show-responses = false"));

    formz(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"))
        .stdout(predicate::str::contains("responses").not());
}

#[test]
fn help_groups_commands() {
    let temp_dir = tempfile::tempdir().unwrap();
    formz(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Form Commands:"))
        .stdout(predicate::str::contains("Response Commands:"));
}

#[test]
fn subcommand_help_needs_no_arguments() {
    let temp_dir = tempfile::tempdir().unwrap();
    formz(temp_dir.path())
        .args(["edit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<FORM>"))
        .stdout(predicate::str::contains("--title"));

    formz(temp_dir.path())
        .args(["rm", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete a form"));
}
