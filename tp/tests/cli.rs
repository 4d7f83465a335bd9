//! Binary-level tests for the `tp` command

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `tp` with HOME and data dirs inside a temp dir so logs stay out of the real profile
fn tp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tp").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("XDG_CONFIG_HOME", home.path().join("config"));
    cmd
}

#[test]
fn test_help_lists_subcommands_and_log_path() {
    let home = TempDir::new().unwrap();
    tp(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("forecast"))
        .stdout(predicate::str::contains("Logs are written to"));
}

#[test]
fn test_config_prints_effective_yaml() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("tp.yml");
    std::fs::write(
        &path,
        "llm:\n  model: test-model\nplan:\n  artifacts: [packing-list]\n",
    )
    .unwrap();

    tp(&home)
        .args(["-c", path.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model: test-model"))
        .stdout(predicate::str::contains("- packing-list"))
        .stdout(predicate::str::contains("daily-routine").not());
}

#[test]
fn test_project_local_config_is_picked_up() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".trippack.yml"), "weather:\n  max-forecast-days: 7\n").unwrap();

    tp(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max-forecast-days: 7"));
}

#[test]
fn test_plan_without_api_key_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("tp.yml");
    std::fs::write(&path, "llm:\n  api-key-env: TP_CLI_UNSET_LLM_KEY\n").unwrap();

    tp(&home)
        .env_remove("TP_CLI_UNSET_LLM_KEY")
        .args([
            "-c",
            path.to_str().unwrap(),
            "plan",
            "-d",
            "Paris, France",
            "-s",
            "2024-06-01",
            "-e",
            "2024-06-03",
            "-a",
            "museums",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TP_CLI_UNSET_LLM_KEY"));
}

#[test]
fn test_forecast_without_weather_key_reports_missing_key() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("tp.yml");
    std::fs::write(&path, "weather:\n  api-key-env: TP_CLI_UNSET_WEATHER_KEY\n").unwrap();

    tp(&home)
        .env_remove("TP_CLI_UNSET_WEATHER_KEY")
        .args(["-c", path.to_str().unwrap(), "forecast", "Paris"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Weather API key not found"))
        .stderr(predicate::str::contains("TP_CLI_UNSET_WEATHER_KEY"))
        .stderr(predicate::str::contains("Invalid weather response").not());
}

#[test]
fn test_plan_requires_activity() {
    let home = TempDir::new().unwrap();
    tp(&home)
        .args(["plan", "-d", "Paris", "-s", "2024-06-01", "-e", "2024-06-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--activity"));
}
