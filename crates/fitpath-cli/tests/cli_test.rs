//! Integration tests for the `fitpath` binary.
//!
//! Each test runs the real binary against its own temp directory for
//! config and data, with no Gemini key, so every AI feature takes its
//! offline path.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn fitpath(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fitpath"))
        .args(args)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("RUST_LOG", "warn")
        .env_remove("FITPATH_DATABASE_URL")
        .env_remove("FITPATH_MODEL")
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("failed to run fitpath binary")
}

fn database_path(home: &Path) -> std::path::PathBuf {
    home.join("data").join("fitpath").join("fitpath.db")
}

/// Re-stamp the stored plan with another day, as if it were left over
/// from a previous session.
fn stamp_plan_date(home: &Path, day: &str) {
    let url = format!("sqlite://{}", database_path(home).display());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let pool = sqlx::SqlitePool::connect(&url).await.unwrap();
        let result = sqlx::query("UPDATE kv_store SET value = ? WHERE key = 'fitpath_date'")
            .bind(day)
            .execute(&pool)
            .await
            .unwrap();
        assert_eq!(result.rows_affected(), 1);
        pool.close().await;
    });
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

const ONBOARD: &[&str] = &[
    "onboard",
    "--name",
    "Alex",
    "--age",
    "30",
    "--gender",
    "male",
    "--height",
    "175",
    "--weight",
    "80",
    "--target-weight",
    "72",
    "--wake",
    "6:45",
];

#[test]
fn init_writes_private_config_and_creates_database() {
    let home = TempDir::new().unwrap();
    let output = fitpath(home.path(), &["init"]);
    assert_ok(&output);
    assert!(stdout(&output).contains("Database ready"));

    let config = home.path().join("config").join("fitpath").join("config.toml");
    let contents = std::fs::read_to_string(&config).unwrap();
    assert!(contents.contains("[database]"), "config was: {contents}");
    assert!(database_path(home.path()).exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&config).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    let again = fitpath(home.path(), &["init"]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("--force"));
}

#[test]
fn dashboard_commands_require_a_profile() {
    let home = TempDir::new().unwrap();
    let output = fitpath(home.path(), &["today"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("fitpath onboard"));
}

#[test]
fn offline_onboarding_uses_the_fallback_plan() {
    let home = TempDir::new().unwrap();

    let onboard = fitpath(home.path(), ONBOARD);
    assert_ok(&onboard);
    let text = stdout(&onboard);
    assert!(text.contains("Current Goal: 1599 kcal"), "stdout was: {text}");
    assert!(text.contains("Good morning! Let's make today count."));
    assert!(text.contains("06:45"));
    assert!(text.contains("Morning Water"));

    let again = fitpath(home.path(), ONBOARD);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("profile edit"));

    let today = fitpath(home.path(), &["today"]);
    assert_ok(&today);
    assert!(stdout(&today).contains("[ ] 06:45"));

    let toggle = fitpath(home.path(), &["toggle", "1"]);
    assert_ok(&toggle);
    assert!(stdout(&toggle).contains("[x] 06:45 Morning Water"));

    let toggle_by_id = fitpath(home.path(), &["toggle", "fallback-1"]);
    assert_ok(&toggle_by_id);
    assert!(stdout(&toggle_by_id).contains("[ ] 06:45 Morning Water"));
}

#[test]
fn offline_food_logging_fails_without_saving() {
    let home = TempDir::new().unwrap();
    assert_ok(&fitpath(home.path(), ONBOARD));

    let add = fitpath(home.path(), &["food", "add", "two", "boiled", "eggs"]);
    assert!(!add.status.success());
    assert!(stderr(&add).contains("could not analyse that meal"));

    let list = fitpath(home.path(), &["food", "list", "--all"]);
    assert_ok(&list);
    assert!(stdout(&list).contains("No food logged."));
}

#[test]
fn offline_review_stores_the_fallback_adjustment() {
    let home = TempDir::new().unwrap();
    assert_ok(&fitpath(home.path(), ONBOARD));
    assert_ok(&fitpath(home.path(), &["toggle", "1"]));

    let review = fitpath(home.path(), &["review", "long", "day", "--tag", "4"]);
    assert_ok(&review);
    let text = stdout(&review);
    assert!(text.contains("You completed 1 out of 1 tasks today (100%)."), "stdout was: {text}");
    assert!(text.contains("Great effort today!"));
    assert!(text.contains("Maintain current intensity."));

    let status = fitpath(home.path(), &["status"]);
    assert_ok(&status);
    let text = stdout(&status);
    assert!(text.contains("AI:        offline"));
    assert!(text.contains("KEY                     BYTES"), "stdout was: {text}");
    assert!(text.contains("fitpath_adjustment"));
    assert!(text.contains("Pending adjustment: Maintain current intensity."));

    let retry = fitpath(home.path(), &["retry", "--no-adjustment"]);
    assert_ok(&retry);
    let status = fitpath(home.path(), &["status"]);
    assert!(!stdout(&status).contains("Pending adjustment"));
}

#[test]
fn next_day_replaces_todays_plan() {
    let home = TempDir::new().unwrap();
    assert_ok(&fitpath(home.path(), ONBOARD));
    assert_ok(&fitpath(home.path(), &["toggle", "1"]));

    let next = fitpath(home.path(), &["next-day"]);
    assert_ok(&next);
    let text = stdout(&next);
    assert!(text.contains("Good morning! Let's make today count."), "stdout was: {text}");
    assert!(text.contains("[ ] 06:45"), "stdout was: {text}");
    assert!(text.contains("Morning Water"));

    let today = fitpath(home.path(), &["today"]);
    assert_ok(&today);
    assert!(stdout(&today).contains("[ ] 06:45"));
}

#[test]
fn next_day_without_a_current_plan_generates_one() {
    let home = TempDir::new().unwrap();
    assert_ok(&fitpath(home.path(), ONBOARD));
    stamp_plan_date(home.path(), "2000-01-01");

    let next = fitpath(home.path(), &["next-day"]);
    assert_ok(&next);
    let text = stdout(&next);
    assert!(text.contains("[ ] 06:45"), "stdout was: {text}");
    assert!(text.contains("Morning Water"));

    let review = fitpath(home.path(), &["review", "--tag", "1", "--next-day"]);
    assert_ok(&review);
    let text = stdout(&review);
    assert!(text.contains("You completed 0 out of 1 tasks today (0%)."), "stdout was: {text}");
    assert!(text.contains("[ ] 06:45"));
}

#[test]
fn food_list_for_a_given_date() {
    let home = TempDir::new().unwrap();
    assert_ok(&fitpath(home.path(), ONBOARD));

    let list = fitpath(home.path(), &["food", "list", "--date", "2025-01-01"]);
    assert_ok(&list);
    let text = stdout(&list);
    assert!(text.contains("2025-01-01"), "stdout was: {text}");
    assert!(text.contains("No food logged."));

    let bad = fitpath(home.path(), &["food", "list", "--date", "01/01/2025"]);
    assert!(!bad.status.success());
    assert!(stderr(&bad).contains("expected YYYY-MM-DD"));
}

#[test]
fn language_switch_localises_fallbacks() {
    let home = TempDir::new().unwrap();

    let lang = fitpath(home.path(), &["lang", "zh"]);
    assert_ok(&lang);
    assert_eq!(stdout(&lang).trim(), "zh");

    let onboard = fitpath(home.path(), ONBOARD);
    assert_ok(&onboard);
    let text = stdout(&onboard);
    assert!(text.contains("欢迎，Alex。"), "stdout was: {text}");
    assert!(text.contains("晨间饮水"));
    assert!(text.contains("今日计划"));

    let show = fitpath(home.path(), &["lang"]);
    assert_eq!(stdout(&show).trim(), "zh");

    let list = fitpath(home.path(), &["food", "list"]);
    assert_ok(&list);
    assert!(stdout(&list).contains("暂无饮食记录。"));
}

#[test]
fn profile_edit_recomputes_the_goal() {
    let home = TempDir::new().unwrap();
    assert_ok(&fitpath(home.path(), ONBOARD));

    let edit = fitpath(home.path(), &["profile", "edit", "--activity", "moderate"]);
    assert_ok(&edit);
    let text = stdout(&edit);
    assert!(text.contains("Profile updated."), "stdout was: {text}");
    assert!(text.contains("Daily goal: 1599 -> 2211 kcal"));

    let show = fitpath(home.path(), &["profile", "show"]);
    assert_ok(&show);
    let text = stdout(&show);
    assert!(text.contains("Activity:    moderate"));
    assert!(text.contains("Current Goal: 2211 kcal"));
}

#[test]
fn completions_print_a_script() {
    let home = TempDir::new().unwrap();
    let output = fitpath(home.path(), &["completions", "bash"]);
    assert_ok(&output);
    assert!(stdout(&output).contains("fitpath"));
}
