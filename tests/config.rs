//! Tests for config parsing and registry construction from config.

use catlog::{Category, Config, DirStorage, Error, Level, MAX_LIMIT_MB, Registry, Storage};
use std::fs;
use tempfile::TempDir;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();

    assert_eq!(config.parse_level().unwrap(), Level::Info);
    assert!(config.terminal.enabled);
    assert!(config.terminal.colors);
    assert!(config.file.base_dir.is_none());
    assert_eq!(config.parse_internal_level(), Level::Off);
    assert!(config.categories.is_empty());
}

#[test]
fn parses_all_sections() {
    let config = Config::parse(
        r#"
[general]
level = "fine"
app_name = "svc"

[terminal]
enabled = false
structure = "{name}: {msg}"

[file]
base_dir = "/var/log/svc"
content_structure = "{level} {msg}"
timestamp_format = "%s"

[internal]
level = "warning"

[categories."svc.db"]
limit_mb = 5
level = "severe"

[categories."svc.http"]
limit_mb = 2
"#,
    )
    .unwrap();

    assert_eq!(config.parse_level().unwrap(), Level::Fine);
    assert_eq!(config.general.app_name, "svc");
    assert!(!config.terminal.enabled);
    assert_eq!(config.terminal.structure, "{name}: {msg}");
    assert_eq!(config.file.base_dir.as_deref(), Some("/var/log/svc"));
    assert_eq!(config.file.content_structure, "{level} {msg}");
    assert_eq!(config.parse_internal_level(), Level::Warning);

    let files = config.category_files().unwrap();
    assert_eq!(files.get("svc.db"), Some(&(5, Level::Severe)));
    assert_eq!(files.get("svc.http"), Some(&(2, Level::All)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        Config::parse("[general\nlevel = 1"),
        Err(Error::ConfigParse(_))
    ));
}

#[test]
fn unknown_level_fails_registry_construction() {
    let mut config = Config::default();
    config.general.level = "loud".to_string();

    assert!(matches!(
        Registry::from_config(&config),
        Err(Error::InvalidLevel(_))
    ));
}

#[test]
fn out_of_range_category_limit_fails_registry_construction() {
    for limit in ["0", "17592186044416"] {
        let config = Config::parse(&format!(
            "[categories.net]\nlimit_mb = {limit}\nlevel = \"info\"\n"
        ))
        .unwrap();

        assert!(matches!(
            config.category_files(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Registry::from_config(&config),
            Err(Error::InvalidArgument(_))
        ));
    }
}

#[test]
fn largest_category_limit_is_accepted() {
    let mut config = Config::default();
    config.categories.insert(
        "net".to_string(),
        catlog::config::CategoryConfig {
            limit_mb: MAX_LIMIT_MB,
            level: None,
        },
    );

    let files = config.category_files().unwrap();
    assert_eq!(files.get("net"), Some(&(MAX_LIMIT_MB, Level::All)));
}

#[test]
fn unknown_internal_level_silences_diagnostics() {
    let mut config = Config::default();
    config.internal.level = "chatty".to_string();
    assert_eq!(config.parse_internal_level(), Level::Off);
}

#[test]
fn load_from_missing_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(&tmp.path().join("absent.toml")).unwrap();
    assert_eq!(config.general.level, "info");
}

#[test]
fn load_from_reads_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catlog.toml");
    fs::write(&path, "[general]\nlevel = \"severe\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level().unwrap(), Level::Severe);
}

struct AutoOpen;
impl Category for AutoOpen {
    fn name() -> String {
        "cfg.auto".to_string()
    }
}

struct Manual;
impl Category for Manual {
    fn name() -> String {
        "cfg.manual".to_string()
    }
}

fn config_in(tmp: &TempDir) -> Config {
    let mut config = Config::parse(
        r#"
[general]
level = "config"

[terminal]
enabled = false

[file]
content_structure = "{level}|{msg}"

[categories."cfg.auto"]
limit_mb = 1
level = "warning"
"#,
    )
    .unwrap();
    config.file.base_dir = Some(tmp.path().to_string_lossy().into_owned());
    config
}

#[test]
fn registry_applies_config() {
    let tmp = TempDir::new().unwrap();
    let registry = Registry::from_config(&config_in(&tmp)).unwrap();

    assert_eq!(registry.global_level(), Level::Config);

    let auto = registry.get::<AutoOpen>().unwrap();
    assert_eq!(auto.level(), Level::Config);
    assert_eq!(auto.log_file_settings(), Some((1, Level::Warning)));
    assert_eq!(auto.base().output_count(), 1);

    auto.info("below the file level");
    auto.severe("kept");
    let content = fs::read_to_string(tmp.path().join("cfg.auto.log")).unwrap();
    assert_eq!(content, "SEVERE|kept\n");

    let manual = registry.get::<Manual>().unwrap();
    assert!(!manual.has_log_file());
}

#[test]
fn default_log_file_uses_configured_storage() {
    let tmp = TempDir::new().unwrap();
    let registry = Registry::from_config(&config_in(&tmp)).unwrap();
    let manual = registry.get::<Manual>().unwrap();

    manual.open_default_log_file(1, Level::Info).unwrap();

    assert_eq!(
        manual.log_file_path().unwrap(),
        tmp.path().join("cfg.manual.log")
    );
}

#[test]
fn terminal_enabled_attaches_terminal_output() {
    let tmp = TempDir::new().unwrap();
    let mut config = config_in(&tmp);
    config.terminal.enabled = true;
    config.terminal.colors = false;
    config.categories.clear();

    let registry = Registry::from_config(&config).unwrap();
    let logger = registry.get::<Manual>().unwrap();

    assert_eq!(logger.base().output_count(), 1);
    assert_eq!(logger.base().outputs()[0].kind(), "terminal");
}

#[test]
fn dir_storage_expands_tilde() {
    let storage = DirStorage::new("~/logs");
    if let Some(dirs) = directories::UserDirs::new() {
        assert_eq!(storage.dir(), dirs.home_dir().join("logs"));
    }
    assert!(
        storage
            .resolve("a.log")
            .unwrap()
            .ends_with("logs/a.log")
    );
}
