use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Nothing listens here, so connections are refused immediately
const UNREACHABLE: &str = "http://127.0.0.1:1";

fn catchy(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("catchy").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("CATCHY_ENV")
        .env_remove("CATCHY_BASE_URL")
        .env_remove("CATCHY_COOKIE_FILE")
        .env_remove("JWT_TOKEN");
    cmd
}

#[test]
fn help_lists_actions() {
    let dir = TempDir::new().unwrap();
    catchy(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("checkout"))
        .stdout(predicate::str::contains("product"));
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    catchy(&dir)
        .args(["--config", "nope.toml", "cart"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn invalid_base_url_in_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("catchy.toml"), "[server]\nbase_url = \"localhost\"\n").unwrap();

    catchy(&dir)
        .arg("cart")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn unattended_removal_is_declined() {
    let dir = TempDir::new().unwrap();
    catchy(&dir)
        .args(["--base-url", UNREACHABLE, "remove", "5"])
        .assert()
        .code(2);
}

#[test]
fn unreachable_server_shows_action_error() {
    let dir = TempDir::new().unwrap();
    catchy(&dir)
        .args(["--base-url", UNREACHABLE, "add", "42", "--quantity", "2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error adding to cart"));
}

#[test]
fn confirmed_checkout_against_unreachable_server() {
    let dir = TempDir::new().unwrap();
    catchy(&dir)
        .args(["--base-url", UNREACHABLE, "--yes", "checkout"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error placing order"));
}

#[test]
fn product_update_needs_a_field() {
    let dir = TempDir::new().unwrap();
    catchy(&dir)
        .args(["--base-url", UNREACHABLE, "product", "update", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nothing to update"));
}
