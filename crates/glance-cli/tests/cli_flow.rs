use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const PASSPHRASE: &str = "test-passphrase-secure-123";
const API_KEY: &str = "sk-or-v1-0123456789abcdef0123456789abcdef";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_glance"))
}

/// Isolated XDG directories for one test.
struct TestEnv {
    root: TempDir,
    config_home: PathBuf,
    data_home: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let config_home = root.path().join("c");
        let data_home = root.path().join("d");
        std::fs::create_dir_all(&config_home).expect("create config dir");
        std::fs::create_dir_all(&data_home).expect("create data dir");
        Self {
            root,
            config_home,
            data_home,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", &self.config_home)
            .env("XDG_DATA_HOME", &self.data_home)
            .env("HOME", self.root.path())
            .env("NO_COLOR", "1")
            .env_remove("GLANCE_CONFIG")
            .env_remove("GLANCE_STORE")
            .env_remove("GLANCE_PASSPHRASE")
            .env_remove("GLANCE_NEW_PASSPHRASE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn store_path(&self) -> PathBuf {
        self.data_home.join("glance").join("secrets.json")
    }

    fn config_path(&self) -> PathBuf {
        self.config_home.join("glance").join("config.toml")
    }

    fn set_key(&self, passphrase: &str) -> Output {
        self.command()
            .args(["key", "set", "--value", API_KEY])
            .env("GLANCE_PASSPHRASE", passphrase)
            .output()
            .expect("run key set")
    }
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn glance");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for glance")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{} failed: stdout={}, stderr={}",
        what,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("parse stdout json")
}

#[test]
fn test_cli_init_writes_default_config() {
    let env = TestEnv::new();

    let init = env.command().args(["init", "--no-input"]).output().expect("run init");
    assert_success(&init, "init");

    let contents = std::fs::read_to_string(env.config_path()).expect("read config");
    let value: toml::Value = contents.parse().expect("parse config");
    let table = value.as_table().expect("config table");
    for section in ["store", "security", "keyfile", "api"] {
        assert!(table.contains_key(section), "missing [{}]", section);
    }
    assert_eq!(
        value
            .get("store")
            .and_then(|section| section.get("path"))
            .and_then(|path| path.as_str()),
        Some(env.store_path().to_string_lossy().as_ref())
    );
    assert_eq!(
        value
            .get("security")
            .and_then(|section| section.get("tier"))
            .and_then(|tier| tier.as_str()),
        Some("passphrase")
    );
    assert_eq!(
        value
            .get("api")
            .and_then(|section| section.get("model"))
            .and_then(|model| model.as_str()),
        Some("openai/gpt-4o-mini")
    );
}

#[test]
fn test_cli_init_refuses_to_overwrite_without_force() {
    let env = TestEnv::new();
    assert_success(
        &env.command().args(["init", "--no-input"]).output().expect("run init"),
        "init",
    );

    let again = env.command().args(["init", "--no-input"]).output().expect("run init");
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("--force"));

    let forced = env
        .command()
        .args(["init", "--no-input", "--force", "--model", "anthropic/claude-3-haiku"])
        .output()
        .expect("run init --force");
    assert_success(&forced, "init --force");
    let contents = std::fs::read_to_string(env.config_path()).expect("read config");
    assert!(contents.contains("anthropic/claude-3-haiku"));
}

#[test]
fn test_cli_key_set_show_round_trip() {
    let env = TestEnv::new();
    assert_success(&env.set_key(PASSPHRASE), "key set");

    let stored = std::fs::read_to_string(env.store_path()).expect("read store");
    assert!(!stored.contains(API_KEY), "store must not hold the plaintext key");
    assert!(stored.contains("encrypted_api_key"));

    let masked = env
        .command()
        .args(["key", "show"])
        .env("GLANCE_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run key show");
    assert_success(&masked, "key show");
    assert_eq!(stdout(&masked).trim(), "sk-or-...cdef");

    let revealed = env
        .command()
        .args(["key", "show", "--reveal"])
        .env("GLANCE_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run key show --reveal");
    assert_success(&revealed, "key show --reveal");
    assert_eq!(stdout(&revealed).trim(), API_KEY);
}

#[cfg(unix)]
#[test]
fn test_cli_store_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let env = TestEnv::new();
    assert_success(&env.set_key(PASSPHRASE), "key set");

    let mode = std::fs::metadata(env.store_path())
        .expect("store metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_cli_wrong_passphrase_exits_auth_failed() {
    let env = TestEnv::new();
    assert_success(&env.set_key(PASSPHRASE), "key set");

    let check = env
        .command()
        .args(["key", "check"])
        .env("GLANCE_PASSPHRASE", "not-the-right-passphrase")
        .output()
        .expect("run key check");
    assert_eq!(check.status.code(), Some(5));
    assert!(stderr(&check).contains("Incorrect passphrase or corrupted data"));
    assert!(!stderr(&check).contains(API_KEY));
}

#[test]
fn test_cli_show_without_key_exits_not_found() {
    let env = TestEnv::new();

    let show = env
        .command()
        .args(["key", "show"])
        .env("GLANCE_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run key show");
    assert_eq!(show.status.code(), Some(3));
    assert!(stderr(&show).contains("No API key stored"));
}

#[test]
fn test_cli_corrupted_blob_exits_corrupted() {
    let env = TestEnv::new();
    let store = env.store_path();
    std::fs::create_dir_all(store.parent().expect("store parent")).expect("create store dir");
    std::fs::write(&store, r#"{"encrypted_api_key":"not base64 at all!"}"#).expect("write store");

    let show = env
        .command()
        .args(["key", "show"])
        .env("GLANCE_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run key show");
    assert_eq!(show.status.code(), Some(6));
    assert!(stderr(&show).contains("glance key set"));
}

#[test]
fn test_cli_short_passphrase_rejected() {
    let env = TestEnv::new();

    let set = env.set_key("short");
    assert_eq!(set.status.code(), Some(4));
    assert!(stderr(&set).contains("at least 8 characters"));
    assert!(!env.store_path().exists());
}

#[test]
fn test_cli_key_set_reads_piped_stdin() {
    let env = TestEnv::new();
    let mut cmd = env.command();
    cmd.args(["key", "set"]).env("GLANCE_PASSPHRASE", PASSPHRASE);
    let set = run_with_stdin(cmd, &format!("{}\n", API_KEY));
    assert_success(&set, "key set from stdin");

    let revealed = env
        .command()
        .args(["key", "show", "--reveal"])
        .env("GLANCE_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run key show");
    assert_eq!(stdout(&revealed).trim(), API_KEY);
}

#[test]
fn test_cli_rotate_switches_passphrase() {
    let env = TestEnv::new();
    assert_success(&env.set_key(PASSPHRASE), "key set");
    let new_passphrase = "another-passphrase-456";

    let rotate = env
        .command()
        .args(["key", "rotate"])
        .env("GLANCE_PASSPHRASE", PASSPHRASE)
        .env("GLANCE_NEW_PASSPHRASE", new_passphrase)
        .output()
        .expect("run key rotate");
    assert_success(&rotate, "key rotate");

    let old = env
        .command()
        .args(["key", "check"])
        .env("GLANCE_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run key check");
    assert_eq!(old.status.code(), Some(5));

    let new = env
        .command()
        .args(["key", "show", "--reveal"])
        .env("GLANCE_PASSPHRASE", new_passphrase)
        .output()
        .expect("run key show");
    assert_success(&new, "key show after rotate");
    assert_eq!(stdout(&new).trim(), API_KEY);

    let info = env
        .command()
        .args(["key", "info", "--json"])
        .output()
        .expect("run key info");
    assert_success(&info, "key info");
    let value = json_stdout(&info);
    assert_eq!(value["stored"], true);
    assert!(value["rotated_at"].is_string());
}

#[test]
fn test_cli_clear_removes_key() {
    let env = TestEnv::new();
    assert_success(&env.set_key(PASSPHRASE), "key set");

    let refused = env.command().args(["key", "clear"]).output().expect("run key clear");
    assert_eq!(refused.status.code(), Some(4));

    let clear = env
        .command()
        .args(["key", "clear", "--yes"])
        .output()
        .expect("run key clear --yes");
    assert_success(&clear, "key clear");

    let info = env
        .command()
        .args(["key", "info", "--json"])
        .output()
        .expect("run key info");
    let value = json_stdout(&info);
    assert_eq!(value["stored"], false);
    assert!(value["saved_at"].is_null());
}

#[test]
fn test_cli_store_flag_overrides_default() {
    let env = TestEnv::new();
    let custom = env.data_home.join("elsewhere").join("keys.json");

    let set = env
        .command()
        .args(["--store", custom.to_str().expect("utf-8 path")])
        .args(["key", "set", "--value", API_KEY])
        .env("GLANCE_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run key set");
    assert_success(&set, "key set --store");
    assert!(custom.exists());
    assert!(!env.store_path().exists());
}

#[test]
fn test_cli_device_keyfile_flow() {
    let env = TestEnv::new();

    let init = env
        .command()
        .args(["init", "--no-input", "--tier", "device_keyfile"])
        .output()
        .expect("run init");
    assert_success(&init, "init device_keyfile");

    let keyfile = env.config_home.join("glance").join("device.key");
    let key_bytes = std::fs::read(&keyfile).expect("read keyfile");
    assert_eq!(key_bytes.len(), 32);
    assert_keyfile_mode(&keyfile);

    let set = env
        .command()
        .args(["key", "set", "--value", API_KEY])
        .output()
        .expect("run key set");
    assert_success(&set, "key set with device keyfile");

    let show = env
        .command()
        .args(["key", "show", "--reveal"])
        .output()
        .expect("run key show");
    assert_success(&show, "key show with device keyfile");
    assert_eq!(stdout(&show).trim(), API_KEY);

    let rotate = env.command().args(["key", "rotate"]).output().expect("run key rotate");
    assert_eq!(rotate.status.code(), Some(4));
}

#[cfg(unix)]
fn assert_keyfile_mode(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mode = std::fs::metadata(path)
        .expect("keyfile metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(not(unix))]
fn assert_keyfile_mode(_path: &Path) {}

#[test]
fn test_cli_parse_fenced_json_from_stdin() {
    let env = TestEnv::new();
    let mut cmd = env.command();
    cmd.args(["parse", "--json"]);
    let raw = "```json\n{\u{201C}summary\u{201D}: \u{201C}Water boils at 100C\u{201D}}\n```";
    let output = run_with_stdin(cmd, raw);
    assert_success(&output, "parse");

    let value = json_stdout(&output);
    assert_eq!(value["ok"], true);
    assert_eq!(value["value"]["summary"], "Water boils at 100C");
}

#[test]
fn test_cli_parse_prose_falls_back() {
    let env = TestEnv::new();
    let mut cmd = env.command();
    cmd.args(["parse", "--json"]);
    let output = run_with_stdin(cmd, "  I could not find a JSON answer.  \n");
    assert_success(&output, "parse fallback");

    let value = json_stdout(&output);
    assert_eq!(value["ok"], false);
    assert_eq!(value["value"]["summary"], "I could not find a JSON answer.");
    assert_eq!(value["value"]["error"], "Failed to parse LLM response as JSON");
}

#[test]
fn test_cli_parse_fact_check_from_file() {
    let env = TestEnv::new();
    let file = env.data_home.join("response.txt");
    std::fs::write(
        &file,
        r#"{"summary":"Mostly right","verdict":"Partially True","details":"The date is off."}"#,
    )
    .expect("write response");

    let output = env
        .command()
        .args(["parse", file.to_str().expect("utf-8 path"), "--mode", "fact-check", "--json"])
        .output()
        .expect("run parse");
    assert_success(&output, "parse --mode fact-check");

    let value = json_stdout(&output);
    assert_eq!(value["kind"], "fact_check");
    assert_eq!(value["verdict"], "partially_true");

    let text = env
        .command()
        .args(["parse", file.to_str().expect("utf-8 path"), "--mode", "fact-check"])
        .output()
        .expect("run parse text");
    assert_success(&text, "parse text output");
    assert!(stdout(&text).contains("Verdict: Partially true"));
}

#[test]
fn test_cli_parse_completion_body() {
    let env = TestEnv::new();
    let body = serde_json::json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "```\n{\"summary\":\"s\",\"explanation\":\"e\"}\n```"
            }
        }]
    })
    .to_string();

    let mut cmd = env.command();
    cmd.args(["parse", "--completion", "--mode", "explain", "--json"]);
    let output = run_with_stdin(cmd, &body);
    assert_success(&output, "parse --completion");

    let value = json_stdout(&output);
    assert_eq!(value["kind"], "explanation");
    assert_eq!(value["explanation"], "e");
}

#[test]
fn test_cli_parse_completion_error_status() {
    let env = TestEnv::new();
    let body = r#"{"error":{"message":"Rate limit exceeded"}}"#;

    let mut cmd = env.command();
    cmd.args(["parse", "--completion", "--status", "429"]);
    let output = run_with_stdin(cmd, body);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Too many requests"));
    assert!(stderr(&output).contains("Rate limit exceeded"));
}

#[test]
fn test_cli_prompt_builds_request() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args(["prompt", "fact-check", "The Great Wall is visible from space."])
        .output()
        .expect("run prompt");
    assert_success(&output, "prompt");

    let value = json_stdout(&output);
    assert_eq!(value["model"], "openai/gpt-4o-mini");
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][1]["role"], "user");
    assert_eq!(
        value["messages"][1]["content"],
        "The Great Wall is visible from space."
    );
}

#[test]
fn test_cli_prompt_rejects_blank_selection() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args(["prompt", "explain", "   "])
        .output()
        .expect("run prompt");
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_cli_missing_config_override_is_not_found() {
    let env = TestEnv::new();
    let missing = env.config_home.join("nope.toml");

    let output = env
        .command()
        .args(["key", "info"])
        .env("GLANCE_CONFIG", &missing)
        .output()
        .expect("run key info");
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("No config found"));
}

#[test]
fn test_cli_completions() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args(["completions", "bash"])
        .output()
        .expect("run completions");
    assert_success(&output, "completions");
    assert!(stdout(&output).contains("glance"));
}
