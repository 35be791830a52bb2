//! Document parsing tests for `wharf-config` — full documents through the
//! serde model, the shape checks, and the on-disk loader.

use std::path::Path;

use wharf_config::{
    ensure_workspace_document, load_document_from_path, resolved_api, FileSpec,
    LocationEntry, TargetConfig, WorkspaceDocument,
};
use wharf_core::Api;

use assert_fs::prelude::*;
use assert_fs::TempDir;

fn parse(yaml: &str) -> WorkspaceDocument {
    serde_yaml::from_str(yaml).expect("document")
}

// ---------------------------------------------------------------------------
// Full document shapes
// ---------------------------------------------------------------------------

#[test]
fn parses_every_entry_kind() {
    let document = parse(
        r#"
load_from:
  - python_file: repo.py
  - python_file:
      relative_path: other.py
      attribute: make_repo
      location_name: other
      working_directory: subdir
  - python_module: pkg.repo
  - python_package:
      package_name: my_pkg
      attribute: repo
  - grpc_server:
      host: remote-host
      port: 4000
      location_name: grpc_loc
  - python_environment:
      executable_path: /venvs/x/bin/python
      target:
        python_module:
          module_name: pkg.repo
          location_name: env_loc
"#,
    );

    ensure_workspace_document(&document, Path::new("/ws/dev.yaml")).expect("valid");
    let entries = document.load_from.expect("load_from");
    assert_eq!(entries.len(), 6);

    match &entries[0] {
        LocationEntry::PythonFile(FileSpec::Shorthand(path)) => {
            assert_eq!(path.to_str(), Some("repo.py"));
        }
        other => panic!("unexpected first entry: {other:?}"),
    }
    match &entries[5] {
        LocationEntry::PythonEnvironment(env) => {
            assert!(matches!(env.target, TargetConfig::PythonModule(_)));
        }
        other => panic!("unexpected last entry: {other:?}"),
    }
}

#[test]
fn legacy_document_parses_and_validates() {
    let document = parse("repository:\n  module: pkg.repo\n  fn: define_repo\n");
    ensure_workspace_document(&document, Path::new("/ws/repository.yaml")).expect("valid");
    let legacy = document.repository.expect("legacy ref");
    assert_eq!(legacy.module.as_deref(), Some("pkg.repo"));
    assert_eq!(legacy.function, "define_repo");
}

#[test]
fn opt_in_defaults_to_cli() {
    let document = parse("load_from: []\n");
    assert_eq!(resolved_api(&document), Api::Cli);

    let document = parse("opt_in:\n  - grpc\nload_from: []\n");
    assert_eq!(resolved_api(&document), Api::Grpc);
}

#[test]
fn unknown_top_level_key_fails_to_parse() {
    let parsed: Result<WorkspaceDocument, _> =
        serde_yaml::from_str("load_after:\n  - python_module: pkg.repo\n");
    assert!(parsed.is_err(), "unknown top-level keys must not parse");
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[test]
fn loads_and_validates_document_from_disk() {
    let dir = TempDir::new().expect("tempdir");
    let doc = dir.child("workspace.yaml");
    doc.write_str(
        "opt_in:\n  - grpc\nload_from:\n  - python_module: pkg.repo\n  - grpc_server:\n      port: 4000\n",
    )
    .expect("write");

    let document = load_document_from_path(doc.path()).expect("load");
    ensure_workspace_document(&document, doc.path()).expect("valid");
    assert_eq!(resolved_api(&document), Api::Grpc);
}
