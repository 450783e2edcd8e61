//! Error scenario integration tests

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn notes_bin(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notes-to-notion"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("OPENAI_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("NOTION_TOKEN");
    cmd
}

#[test]
fn missing_api_key_error() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["process", "IMG_1.jpg"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("OPENAI_API_KEY"),
        "Expected error about missing API key, got: {}",
        stderr
    );
}

#[test]
fn missing_api_key_names_gemini_variable() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["process", "IMG_1.jpg", "--provider", "gemini"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("GEMINI_API_KEY"),
        "Expected error about missing Gemini key, got: {}",
        stderr
    );
}

#[test]
fn missing_notion_token_error() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .env("OPENAI_API_KEY", "sk-test")
        .args(["process", "IMG_1.jpg"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("NOTION_TOKEN"),
        "Expected error about missing Notion token, got: {}",
        stderr
    );
}

#[test]
fn missing_notion_page_error() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .env("OPENAI_API_KEY", "sk-test")
        .env("NOTION_TOKEN", "ntn_test")
        .args(["process", "IMG_1.jpg"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("notion_page"),
        "Expected error about missing page, got: {}",
        stderr
    );
}

#[test]
fn watch_without_folder_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .arg("watch")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("watch folder") || stderr.contains("--folder"),
        "Expected error about the watch folder, got: {}",
        stderr
    );
}

#[test]
fn invalid_provider_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["process", "a.jpg", "--provider", "claude"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_page() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["config", "set", "notion_page", "https://www.notion.so/Journal"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("notion_page"),
        "Expected error about the page id, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_provider() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["config", "set", "provider", "claude"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("provider"),
        "Expected error about the provider, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_boolean() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["config", "set", "notify", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false"),
        "Expected error about invalid boolean, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    let home = TempDir::new().unwrap();
    let output = notes_bin(home.path())
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("not set") && stdout.contains("notion_token"),
        "Expected config list output, got: {}",
        stdout
    );
}
