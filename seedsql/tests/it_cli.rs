use std::fs;
use std::process::Command;

fn seedsql() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_seedsql"));
    cmd.env_remove("SEEDSQL_INPUT_DIR")
        .env_remove("SEEDSQL_OUTPUT_DIR")
        .env_remove("SEEDSQL_EXTENSION")
        .env_remove("SEEDSQL_ENABLE_TRACING");
    cmd
}

#[test]
fn it_runs_with_defaults_relative_to_working_directory() {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("frontend/src/data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("templates.ts"),
        "export const templates = [{ id: 'tpl1', name: 'Weekly check', steps: 3 }];",
    )
    .unwrap();

    let output = seedsql().current_dir(root.path()).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let out_dir = root.path().join("backend/migration/output");
    let schema = fs::read_to_string(out_dir.join("schema.sql")).unwrap();
    let inserts = fs::read_to_string(out_dir.join("inserts.sql")).unwrap();
    assert!(schema.contains("CREATE TABLE `templates`"));
    assert!(inserts.contains("VALUES ('tpl1','Weekly check',3);"));
}

#[test]
fn it_exits_non_zero_on_malformed_source() {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("broken.ts"), "export const broken = [{ id: 1 ];").unwrap();
    let out_dir = root.path().join("out");

    let output = seedsql()
        .arg("gen")
        .arg("--input-dir")
        .arg(&data)
        .arg("--output-dir")
        .arg(&out_dir)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("broken.ts"));
    assert!(!out_dir.exists());
}

#[test]
fn it_skip_invalid_still_fails_the_run() {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("good.ts"), "export const good = [{ id: 'g' }];").unwrap();
    fs::write(data.join("broken.ts"), "nothing exported here").unwrap();
    let out_dir = root.path().join("out");

    let output = seedsql()
        .args(["gen", "--skip-invalid", "--input-dir"])
        .arg(&data)
        .arg("--output-dir")
        .arg(&out_dir)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let schema = fs::read_to_string(out_dir.join("schema.sql")).unwrap();
    assert!(schema.contains("CREATE TABLE `good`"));
}

#[test]
fn it_inspect_prints_json() {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("tasks.ts"), "export const tasks = [{ id: 't', done: true }];").unwrap();

    let output = seedsql()
        .args(["inspect", "--input-dir"])
        .arg(&data)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["tables"][0]["table"], "tasks");
    assert_eq!(parsed["tables"][0]["columns"][1]["name"], "done");
    assert_eq!(parsed["tables"][0]["columns"][1]["sql_type"], "boolean");
}
