//! Runs the `beanlink` binary against documents written to disk.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const DECLARATIONS: &str = r"
beans:
  - kind: stateless
    ejb_name: OrderBean
    ejb_class: com.example.OrderBean
  - kind: entity
    ejb_name: CustomerBean
assembly:
  security_roles:
    - role_name: admin
    - role_name: admin
";

const BINDINGS: &str = r#"{
  "deployments": [
    { "ejb_name": "OrderBean", "deployment_id": "OrderBean-Deployment", "container_id": "StatelessContainer" },
    { "ejb_name": "CustomerBean", "deployment_id": "CustomerBean-Deployment", "container_id": "CmpEntityContainer" }
  ]
}"#;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write");
    path
}

fn beanlink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_beanlink"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("BEANLINK_CONFIG")
        .output()
        .expect("run beanlink")
}

fn module(dir: &tempfile::TempDir) -> (String, String) {
    let decl = write_file(dir.path(), "ejb-jar.yaml", DECLARATIONS);
    let bind = write_file(dir.path(), "openejb-jar.json", BINDINGS);
    (decl.display().to_string(), bind.display().to_string())
}

#[test]
fn plan_prints_text_summary_and_warnings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (decl, bind) = module(&dir);

    let out = beanlink(&["plan", &decl, &bind, "--module", "apps/shop.jar"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.contains("Deployment Plan for: shop (apps/shop.jar)"));
    assert!(stdout.contains("  + OrderBean [stateless]"));
    assert!(stdout.contains("CmpEntityContainer (CMP_ENTITY)"));
    assert!(stderr.contains("warning[conf.0102]"));
}

#[test]
fn plan_json_is_the_serialized_plan() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (decl, bind) = module(&dir);

    let out = beanlink(&["plan", &decl, &bind, "--format", "json"]);
    assert!(out.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json plan");
    assert_eq!(plan["module_id"], "ejb-jar.yaml");
    assert_eq!(plan["components"][1]["deployment_id"], "CustomerBean-Deployment");
    assert_eq!(plan["security_roles"].as_array().map(Vec::len), Some(2));
}

#[test]
fn check_fails_on_count_mismatch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let decl = write_file(dir.path(), "ejb-jar.yaml", DECLARATIONS);
    let bind = write_file(dir.path(), "openejb-jar.yaml", "deployments: []\n");

    let out = beanlink(&["check", &decl.display().to_string(), &bind.display().to_string()]);
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stdout.matches("warning[conf.0018]").count(), 2);
    assert!(stderr.contains("declares 2 beans but its binding document deploys 0"));
}

#[test]
fn config_changes_container_labels() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (decl, bind) = module(&dir);
    let config = write_file(
        dir.path(),
        "beanlink.yaml",
        "containers:\n  - id: StatelessContainer\n    type: STATEFUL\n    class_name: com.example.Custom\n    constructor: id\n",
    );

    let out = beanlink(&[
        "--config",
        &config.display().to_string(),
        "plan",
        &decl,
        &bind,
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("StatelessContainer (STATEFUL)"));
    assert!(stdout.contains("CmpEntityContainer (unconfigured)"));
}
