//! End-to-end tests for the offline commands of the `upscale` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn upscale(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("upscale").unwrap();
    cmd.env("UPSCALE_DATA_DIR", dir.path())
        .env_remove("UPSCALE_API_URL")
        .env_remove("UPSCALE_IDENTITY_API_KEY");
    cmd
}

#[test]
fn test_no_command_prints_usage_hint() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("upscale tui"));
}

#[test]
fn test_budget_calc_student_style() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args([
            "budget",
            "calc",
            "--income",
            "1500",
            "--style",
            "student",
            "housing=700",
            "dining-out=80",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Housing (rent)"))
        .stdout(predicate::str::contains("$700.00"))
        .stdout(predicate::str::contains("Monthly income:"))
        .stdout(predicate::str::contains("$1500.00"))
        .stdout(predicate::str::contains("$720.00"));
}

#[test]
fn test_budget_calc_guideline_split() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["budget", "calc", "-i", "2000", "-s", "50-30-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50/30/20 guideline"))
        .stdout(predicate::str::contains("$1000.00"))
        .stdout(predicate::str::contains("$400.00"));
}

#[test]
fn test_budget_calc_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["budget", "calc", "--income", "1000", "yachts=50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_budget_export_is_logged() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out").join("budget.json");

    upscale(&dir)
        .args(["budget", "calc", "--income", "1200", "groceries=250", "--export"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget exported to"));

    let contents = std::fs::read_to_string(&output).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(json.is_object());

    upscale(&dir)
        .arg("activity")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXPORT"))
        .stdout(predicate::str::contains("json"));
}

#[test]
fn test_fresh_data_dir_keeps_activity() {
    let root = TempDir::new().unwrap();
    let data_dir = root.path().join("fresh");
    let output = root.path().join("budget.json");

    let run = |args: &[&str]| {
        let mut cmd = Command::cargo_bin("upscale").unwrap();
        cmd.env("UPSCALE_DATA_DIR", &data_dir)
            .env_remove("UPSCALE_API_URL")
            .env_remove("UPSCALE_IDENTITY_API_KEY")
            .args(args);
        cmd
    };

    run(&["budget", "calc", "--income", "1200", "groceries=250", "--export"])
        .arg(&output)
        .assert()
        .success();

    assert!(data_dir.join("activity.log").exists());
    run(&["activity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXPORT"));
}

#[test]
fn test_budget_ranges_and_categories() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["budget", "ranges"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Typical monthly"))
        .stdout(predicate::str::contains("housing"));

    upscale(&dir)
        .args(["budget", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("savingsGoal"));
}

#[test]
fn test_learn_units_shows_locks() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["learn", "units"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit 1: Stock Market Fundamentals"))
        .stdout(predicate::str::contains("(locked)"));
}

#[test]
fn test_learn_show_locked_lesson_fails() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["learn", "show", "market-cap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Locked"));

    upscale(&dir)
        .args(["learn", "show", "intro-stock-market"])
        .assert()
        .success()
        .stdout(predicate::str::contains("What is the Stock Market?"));
}

#[test]
fn test_learn_quiz_needs_every_lesson() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["learn", "quiz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unlock the final quiz"));
}

#[test]
fn test_learn_quiz_reads_answers_from_stdin() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["learn", "quiz", "--all"])
        .write_stdin("1\n".repeat(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("Score:"));
}

#[test]
fn test_config_show_and_init() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UpScale Configuration"))
        .stdout(predicate::str::contains("built-in"))
        .stdout(predicate::str::contains("not set"));

    upscale(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(dir.path().join("config.json").exists());
}

#[test]
fn test_global_api_url_override() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["--api-url", "http://localhost:9999", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:9999"));
}

#[test]
fn test_auth_requires_identity_key() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .args(["auth", "login", "--email", "ada@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UPSCALE_IDENTITY_API_KEY"));
}

#[test]
fn test_activity_empty() {
    let dir = TempDir::new().unwrap();
    upscale(&dir)
        .arg("activity")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity recorded yet."));
}
