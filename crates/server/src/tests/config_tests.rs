use super::{normalize_database_url, prepare_database_url, resolve_settings, Settings};

use std::{collections::HashMap, path::PathBuf};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = resolve_settings(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.skin, "grid");
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
bind_addr = "0.0.0.0:9000"
database_url = "sqlite://./var/impulse.db"
skin = "classic"
static_dir = "/srv/impulse/public"
"#;
    let settings = resolve_settings(Some(file), env_from(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.database_url, "sqlite://./var/impulse.db");
    assert_eq!(settings.skin, "classic");
    assert_eq!(settings.static_dir, PathBuf::from("/srv/impulse/public"));
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn env_overrides_file_and_prefixed_keys_win() {
    let file = "bind_addr = \"0.0.0.0:9000\"\nskin = \"classic\"\n";
    let settings = resolve_settings(
        Some(file),
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:1000"),
            ("APP__BIND_ADDR", "127.0.0.1:2000"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP__SKIN", "dark"),
            ("APP__LOG_FILTER", "debug,sqlx=warn"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2000");
    assert_eq!(settings.database_url, "sqlite::memory:");
    assert_eq!(settings.skin, "dark");
    assert_eq!(settings.log_filter, "debug,sqlx=warn");
}

#[test]
fn blank_skin_env_keeps_configured_skin() {
    let settings = resolve_settings(None, env_from(&[("APP__SKIN", "  ")]));
    assert_eq!(settings.skin, "grid");
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let settings = resolve_settings(Some("bind_addr = ["), env_from(&[]));
    assert_eq!(settings.server_bind, Settings::default().server_bind);
}

#[test]
fn partial_file_keeps_defaults_and_ignores_unknown_keys() {
    let file = "skin = \"classic\"\nlegacy_theme = \"blue\"\n";
    let settings = resolve_settings(Some(file), env_from(&[]));
    assert_eq!(settings.skin, "classic");
    assert_eq!(settings.server_bind, Settings::default().server_bind);
    assert_eq!(settings.static_dir, Settings::default().static_dir);
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(
        normalize_database_url("sqlite:data\\test.db"),
        "sqlite://data/test.db"
    );
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(normalize_database_url("   "), Settings::default().database_url);
}

#[test]
fn creates_parent_dir_for_sqlite_url() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("data").join("test.db");

    let prepared = prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare db url");
    assert!(prepared.starts_with("sqlite://"));
    assert!(temp_root.path().join("data").exists());
}

#[tokio::test]
async fn prepared_database_url_creates_openable_sqlite_file() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("inventory.db");

    let prepared = prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare");
    let storage = storage::Storage::new(&prepared).await.expect("open sqlite");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should be created: {}",
        db_path.display()
    );
}
