//! Integration tests for the `th` CLI.
//!
//! Each test points the binary at a temp data directory with `--data-dir`,
//! runs it as a subprocess, and verifies stdout and/or the persisted state.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `th` binary.
fn th_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("th");
    path
}

fn th(data_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(th_bin())
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("TRAILHEAD_DATA_DIR")
        .env_remove("TRAILHEAD_USER_ID")
        .env_remove("TRAILHEAD_USER_NAME")
        .output()
        .expect("could not run th")
}

fn th_stdout(data_dir: &Path, args: &[&str]) -> String {
    let output = th(data_dir, args);
    assert!(
        output.status.success(),
        "th {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn th_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut with_json = args.to_vec();
    with_json.push("--json");
    serde_json::from_str(&th_stdout(data_dir, &with_json)).expect("stdout was not valid JSON")
}

#[test]
fn first_run_seeds_a_demo_project() {
    let tmp = TempDir::new().unwrap();
    let status = th_json(tmp.path(), &["status"]);
    assert_eq!(status["projects"], 1);
    assert_eq!(status["project"], "Carpathians: training trek");
    assert_eq!(status["participants"], 3);

    // The state was persisted
    assert!(tmp.path().join("state.json").exists());
}

#[test]
fn created_projects_become_current_and_listed_first() {
    let tmp = TempDir::new().unwrap();
    let created = th_stdout(
        tmp.path(),
        &["project", "create", "Sarek loop", "2027-07-01", "2027-07-05"],
    );
    assert!(created.starts_with("created "));

    let projects = th_json(tmp.path(), &["project", "list"]);
    let list = projects.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["title"], "Sarek loop");
    assert_eq!(list[0]["current"], true);
}

#[test]
fn deleting_the_only_project_reseeds_a_demo() {
    let tmp = TempDir::new().unwrap();
    let projects = th_json(tmp.path(), &["project", "list"]);
    let only_id = projects[0]["id"].as_str().unwrap().to_string();

    th_stdout(tmp.path(), &["project", "delete", &only_id]);

    let projects = th_json(tmp.path(), &["project", "list"]);
    let list = projects.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_ne!(list[0]["id"].as_str().unwrap(), only_id);
    assert_eq!(list[0]["current"], true);
}

#[test]
fn gear_add_pack_and_list() {
    let tmp = TempDir::new().unwrap();
    let added = th_stdout(
        tmp.path(),
        &[
            "gear", "add", "Water filter", "--category", "Kitchen", "--weight", "0.3",
        ],
    );
    let gear_id = added.trim().strip_prefix("added ").unwrap().to_string();

    th_stdout(tmp.path(), &["gear", "pack", &gear_id]);

    let items = th_json(tmp.path(), &["gear", "list"]);
    let filter = items
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["name"] == "Water filter")
        .expect("added gear is listed");
    assert_eq!(filter["packed"], true);
    assert_eq!(filter["weight_kg"], 0.3);
}

#[test]
fn duplicate_gear_is_rejected_with_nonzero_exit() {
    let tmp = TempDir::new().unwrap();
    // The demo project already has a "Gas stove"
    let output = th(tmp.path(), &["gear", "add", "gas STOVE"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already on the list"), "stderr: {}", stderr);
}

#[test]
fn meal_add_rejects_unknown_dishes() {
    let tmp = TempDir::new().unwrap();
    let output = th(tmp.path(), &["meal", "add", "dish-moon-cheese"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown dish"));
}

#[test]
fn template_apply_replaces_the_meal_plan() {
    let tmp = TempDir::new().unwrap();
    th_stdout(tmp.path(), &["meal", "clear"]);
    th_stdout(
        tmp.path(),
        &["template", "apply", "tpl-community-summer-3d"],
    );

    let meals = th_json(tmp.path(), &["meal", "list"]);
    let list = meals.as_array().unwrap();
    // Demo trip spans 4 days, so all 7 template entries fit
    assert_eq!(list.len(), 7);
    assert!(list.iter().all(|m| m["packed"] == false));
}

#[test]
fn weight_report_flags_overweight_packs() {
    let tmp = TempDir::new().unwrap();
    th_stdout(
        tmp.path(),
        &["gear", "add", "Cast iron pan", "--weight", "25.0"],
    );

    let report = th_json(tmp.path(), &["weight"]);
    assert_eq!(report["overweight"], true);
    // Demo trip: one bucket per trip day
    assert_eq!(report["daily_carry"].as_array().unwrap().len(), 4);
}

#[test]
fn participant_removal_reassigns_gear() {
    let tmp = TempDir::new().unwrap();

    let participants = th_json(tmp.path(), &["participant", "list"]);
    let ivan = participants
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "Ivan")
        .unwrap();
    let ivan_id = ivan["id"].as_str().unwrap().to_string();

    th_stdout(tmp.path(), &["participant", "remove", &ivan_id]);

    // Ivan's tent fell to the first remaining participant
    let items = th_json(tmp.path(), &["gear", "list"]);
    let tent = items
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["name"] == "2-person tent")
        .unwrap();
    assert_eq!(tent["responsible"], "You");
}

#[test]
fn status_works_without_a_config_or_identity() {
    // Absence of the identity bridge must not fail startup
    let tmp = TempDir::new().unwrap();
    let output = th(tmp.path(), &["remote", "status"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not configured"));
    assert!(stdout.contains("local single-user mode"));
}

#[test]
fn water_tool_reports_and_persists_its_result() {
    let tmp = TempDir::new().unwrap();
    let result = th_json(
        tmp.path(),
        &[
            "water", "--weather", "hot", "--activity", "high", "--hours", "8", "--people", "3",
        ],
    );
    assert_eq!(result["per_person_liters"], 4.5);
    assert_eq!(result["total_liters"], 13.5);

    // The scratch result landed in the persisted state
    let raw = std::fs::read_to_string(tmp.path().join("state.json")).unwrap();
    let state: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(state["tools"]["water_calc"]["total_liters"], 13.5);
}

#[test]
fn sync_poll_adopts_a_foreign_save() {
    let tmp = TempDir::new().unwrap();
    // Seed, then mutate from a "second instance" (separate process run)
    th_stdout(tmp.path(), &["status"]);
    th_stdout(tmp.path(), &["chat", "post", "Summit at dawn", "--author", "Ivan"]);

    // A third run reconciles and sees the message
    let poll = th_stdout(tmp.path(), &["sync", "poll"]);
    assert!(poll.contains("reconciled"), "got: {}", poll);

    let chat = th_stdout(tmp.path(), &["chat", "list"]);
    assert!(chat.contains("Summit at dawn"));
}
