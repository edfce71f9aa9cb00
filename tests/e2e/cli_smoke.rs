//! CLI E2E smoke tests.

use serde_json::Value;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const SCRUBBED_VARS: [&str; 8] = [
    "FANLOG_ENV",
    "NODE_ENV",
    "TELEGRAM_BOT",
    "BETTERSTACK_TOKEN",
    "TELEGRAM_API_URL",
    "BETTERSTACK_INGEST_URL",
    "FANLOG_LOG_DIR",
    "FANLOG_HTTP_TIMEOUT_MS",
];

fn log_dir(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("fanlog-cli-{label}-{unique}"))
}

fn fanlog(args: &[&str], log_dir: &PathBuf) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fanlog"));
    for var in SCRUBBED_VARS {
        command.env_remove(var);
    }
    command.env("FANLOG_LOG_DIR", log_dir).args(args).output()
}

fn stdout_json(output: &Output) -> io::Result<Value> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(io::Error::other(format!("command failed: {stderr}")));
    }
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn levels_json_lists_the_ordered_table() -> io::Result<()> {
    let dir = log_dir("levels");
    let levels = stdout_json(&fanlog(&["levels", "--output", "json"], &dir)?)?;

    let names: Vec<&str> = levels
        .as_array()
        .map(|levels| levels.iter().filter_map(|level| level["level"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, ["error", "warn", "done", "info", "debug", "custom"]);
    assert_eq!(levels[0]["code"], Value::from(31));
    Ok(())
}

#[test]
fn services_text_lists_the_registry() -> io::Result<()> {
    let dir = log_dir("services");
    let output = fanlog(&["services"], &dir)?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line.starts_with("WberReport") && line.ends_with(" wber 4")));
    assert!(stdout.lines().any(|line| line.starts_with("LamdReport") && line.ends_with(" -")));
    Ok(())
}

#[test]
fn dry_run_emit_reports_one_alert_in_production() -> io::Result<()> {
    let dir = log_dir("emit");
    let output = fanlog(
        &[
            "emit",
            "--service",
            "WberReport",
            "--fn",
            "runJob",
            "--level",
            "error",
            "--message",
            "Job failed",
            "--data",
            r#"{"code":42}"#,
            "--config",
            r#"{"console":{"disable":true}}"#,
            "--environment",
            "production",
            "--dry-run",
            "--output",
            "json",
        ],
        &dir,
    )?;
    let summary = stdout_json(&output)?;

    assert_eq!(summary["aggregated"], Value::from(1));
    assert_eq!(summary["alerts"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        summary["transports"],
        serde_json::json!(["file", "telegram", "betterstack"])
    );

    let contents = std::fs::read_to_string(dir.join("WberReport.log"))?;
    let record: Value = serde_json::from_str(contents.trim_end()).map_err(io::Error::other)?;
    assert_eq!(record["level"], Value::from("error"));
    assert_eq!(record["fn"], Value::from("runJob"));
    assert_eq!(record["message"], Value::from("Job failed"));
    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn missing_tokens_exit_with_config_error() -> io::Result<()> {
    let dir = log_dir("tokens");
    let output = fanlog(&["emit", "--service", "Mpstats", "--message", "hello"], &dir)?;

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
    Ok(())
}

#[test]
fn unregistered_topic_is_rejected() -> io::Result<()> {
    let dir = log_dir("topic");
    let output = fanlog(
        &["emit", "--service", "LamdReport", "--message", "x", "--dry-run"],
        &dir,
    )?;
    assert_eq!(output.status.code(), Some(4));
    Ok(())
}
