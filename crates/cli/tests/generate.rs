//! End-to-end tests for the `generate metadata` commands.
//!
//! These run the built binary against temporary Salesforce DX projects and
//! check exit codes, output and the files written.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a command for the sobject binary.
fn sobject() -> Command {
    let mut cmd = Command::cargo_bin("sobject").unwrap();
    cmd.env_remove("SOBJECT_PROJECT")
        .env_remove("SOBJECT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a project with Account and Contact objects in `force-app`.
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("sfdx-project.json"),
        r#"{
          "packageDirectories": [{ "path": "force-app", "default": true }],
          "sourceApiVersion": "61.0"
        }"#,
    )
    .unwrap();
    create_object(tmp.path(), "Account", "Accounts");
    create_object(tmp.path(), "Contact", "Contacts");
    tmp
}

fn create_object(root: &Path, name: &str, plural_label: &str) -> PathBuf {
    let folder = objects_dir(root).join(name);
    fs::create_dir_all(&folder).unwrap();
    fs::write(
        folder.join(format!("{}.object-meta.xml", name)),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>{}</label>
    <pluralLabel>{}</pluralLabel>
</CustomObject>
"#,
            name, plural_label
        ),
    )
    .unwrap();
    folder
}

fn create_object_without_plural_label(root: &Path, name: &str) -> PathBuf {
    let folder = objects_dir(root).join(name);
    fs::create_dir_all(&folder).unwrap();
    fs::write(
        folder.join(format!("{}.object-meta.xml", name)),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>{}</label>
</CustomObject>
"#,
            name
        ),
    )
    .unwrap();
    folder
}

fn objects_dir(root: &Path) -> PathBuf {
    root.join("force-app").join("main").join("default").join("objects")
}

// ─────────────────────────────────────────────────────────────────────────────
// Help
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    sobject()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_tab_help_should_not_throw() {
    sobject()
        .args(["generate", "metadata", "tab", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--object"))
        .stdout(predicate::str::contains("--icon"))
        .stdout(predicate::str::contains("--directory"));
}

#[test]
fn test_field_help_should_not_throw() {
    sobject()
        .args(["generate", "metadata", "field", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--label"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tab flag validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tab_invalid_folder() {
    let tmp = setup_test_project();
    let directory = Path::new("force-app").join("main").join("default").join("objects");

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "tab", "--object", "foo", "--icon", "1", "--directory"])
        .arg(&directory)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tabs"));
}

#[test]
fn test_tab_invalid_icon() {
    let tmp = setup_test_project();
    let directory = Path::new("force-app").join("main").join("default").join("tabs");

    for icon in ["0", "101", "blue"] {
        sobject()
            .current_dir(tmp.path())
            .args(["generate", "metadata", "tab", "--object", "Widget__c", "--icon", icon, "--directory"])
            .arg(&directory)
            .assert()
            .failure();
    }
    assert!(!tmp.path().join(&directory).exists());
}

#[test]
fn test_tab_requires_custom_object() {
    let tmp = setup_test_project();

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "tab", "--object", "Account", "--directory", "tabs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("__c"));
}

#[test]
fn test_tab_missing_required_flags() {
    sobject()
        .args(["generate", "metadata", "tab", "--icon", "3"])
        .assert()
        .failure();
}

#[test]
fn test_tab_written() {
    let tmp = setup_test_project();
    let directory = Path::new("force-app").join("main").join("default").join("tabs");

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "tab", "--object", "Widget__c", "--icon", "42", "--directory"])
        .arg(&directory)
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget__c.tab-meta.xml"));

    let xml = fs::read_to_string(tmp.path().join(&directory).join("Widget__c.tab-meta.xml")).unwrap();
    assert!(xml.contains("<customObject>true</customObject>"));
    assert!(xml.contains("<motif>Custom42</motif>"));

    // A second run must not replace the file
    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "tab", "--object", "Widget__c", "--directory"])
        .arg(&directory)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_tab_json_output() {
    let tmp = TempDir::new().unwrap();

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "tab", "--object", "Widget__c", "--directory", "tabs", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""icon": 1"#))
        .stdout(predicate::str::contains(r#""object": "Widget__c""#));
}

// ─────────────────────────────────────────────────────────────────────────────
// Field generation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lookup_field_from_stdin() {
    let tmp = setup_test_project();
    let contact = objects_dir(tmp.path()).join("Contact");

    // type, description, referenceTo, relationshipLabel, relationshipName, deleteConstraint
    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Account", "--object"])
        .arg(&contact)
        .write_stdin("Lookup\n\n1\n\n\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Account__c.field-meta.xml"));

    let xml = fs::read_to_string(contact.join("fields").join("Account__c.field-meta.xml")).unwrap();
    assert!(xml.contains("<fullName>Account__c</fullName>"));
    assert!(xml.contains("<type>Lookup</type>"));
    assert!(xml.contains("<referenceTo>Account</referenceTo>"));
    assert!(xml.contains("<relationshipLabel>Contacts</relationshipLabel>"));
    assert!(xml.contains("<relationshipName>Contacts</relationshipName>"));
    assert!(xml.contains("<deleteConstraint>Restrict</deleteConstraint>"));
    assert!(!xml.contains("reparentableMasterDetail"));
}

#[test]
fn test_master_detail_field_with_object_prompt() {
    let tmp = setup_test_project();
    let contact = objects_dir(tmp.path()).join("Contact");

    // object, type, description, referenceTo, relationshipLabel, relationshipName,
    // reparentableMasterDetail, writeRequiresMasterRead
    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Parent Account", "--json"])
        .write_stdin("2\nMasterDetail\nOwning account\n1\nKids\n\ny\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fullName": "Parent_Account__c""#));

    let xml = fs::read_to_string(contact.join("fields").join("Parent_Account__c.field-meta.xml"))
        .unwrap();
    assert!(xml.contains("<type>MasterDetail</type>"));
    assert!(xml.contains("<description>Owning account</description>"));
    assert!(xml.contains("<relationshipLabel>Kids</relationshipLabel>"));
    assert!(xml.contains("<relationshipName>Kids</relationshipName>"));
    assert!(xml.contains("<reparentableMasterDetail>true</reparentableMasterDetail>"));
    assert!(xml.contains("<writeRequiresMasterRead>false</writeRequiresMasterRead>"));
    assert!(!xml.contains("deleteConstraint"));
}

#[test]
fn test_field_aborted_input_writes_nothing() {
    let tmp = setup_test_project();
    let contact = objects_dir(tmp.path()).join("Contact");

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Account", "--object"])
        .arg(&contact)
        .write_stdin("Lookup\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input closed"));

    assert!(!contact.join("fields").exists());
}

#[test]
fn test_field_unknown_object_folder() {
    let tmp = setup_test_project();

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Account", "--object"])
        .arg(objects_dir(tmp.path()).join("Missing"))
        .write_stdin("Lookup\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Metadata error"));
}

#[test]
fn test_field_outside_project() {
    let tmp = TempDir::new().unwrap();

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Account"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sfdx-project.json"));
}

#[test]
fn test_text_field_on_missing_object_writes_nothing() {
    let tmp = setup_test_project();
    let ghost = objects_dir(tmp.path()).join("Ghost__c");

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Due", "--object"])
        .arg(&ghost)
        .write_stdin("Text\n\n\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Metadata error"));

    assert!(!ghost.exists());
}

#[test]
fn test_blank_relationship_label_is_reasked() {
    let tmp = setup_test_project();
    let widget = create_object_without_plural_label(tmp.path(), "Widget__c");

    // type, description, referenceTo, blank label, label, blank name, deleteConstraint
    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Parent", "--object"])
        .arg(&widget)
        .write_stdin("Lookup\n\n1\n\nKids\n\n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("A value is required"));

    let xml = fs::read_to_string(widget.join("fields").join("Parent__c.field-meta.xml")).unwrap();
    assert!(xml.contains("<relationshipLabel>Kids</relationshipLabel>"));
    assert!(xml.contains("<relationshipName>Kids</relationshipName>"));
}

#[test]
fn test_blank_relationship_label_and_name_write_nothing() {
    let tmp = setup_test_project();
    let widget = create_object_without_plural_label(tmp.path(), "Widget__c");

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Parent", "--object"])
        .arg(&widget)
        .write_stdin("Lookup\n\n1\n\n\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("A value is required"))
        .stderr(predicate::str::contains("Input closed"));

    assert!(!widget.join("fields").exists());
}

#[test]
fn test_out_of_range_length_is_reasked() {
    let tmp = setup_test_project();
    let contact = objects_dir(tmp.path()).join("Contact");

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "field", "--label", "Nickname", "--object"])
        .arg(&contact)
        .write_stdin("Text\n\n300\n40\n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("between 1 and 255, got '300'"));

    let xml =
        fs::read_to_string(contact.join("fields").join("Nickname__c.field-meta.xml")).unwrap();
    assert!(xml.contains("<length>40</length>"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_config_flag_fails() {
    let tmp = setup_test_project();
    let config = tmp.path().join("cfg.yaml");
    fs::write(&config, "logging: [unclosed").unwrap();

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "tab", "--object", "Widget__c", "--directory", "tabs"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));

    assert!(!tmp.path().join("tabs").exists());
}

#[test]
fn test_missing_config_flag_fails() {
    let tmp = setup_test_project();

    sobject()
        .current_dir(tmp.path())
        .args(["generate", "metadata", "tab", "--object", "Widget__c", "--directory", "tabs"])
        .args(["--config", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_project_flag_reads_project_config() {
    let tmp = setup_test_project();
    let elsewhere = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".sobject")).unwrap();
    fs::write(
        tmp.path().join(".sobject").join("config.yaml"),
        "logging: [unclosed",
    )
    .unwrap();

    sobject()
        .current_dir(elsewhere.path())
        .args(["generate", "metadata", "field", "--label", "Account"])
        .arg("--project")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
