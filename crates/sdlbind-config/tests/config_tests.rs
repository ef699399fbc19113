//! Configuration loading and precedence tests

use pretty_assertions::assert_eq;
use rstest::rstest;
use sdlbind_config::loader::{ENV_LOG, ENV_SEARCH_PATH};
use sdlbind_config::{BindingConfig, ConfigError, ConfigLoader};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join("sdlbind.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

fn create_user_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("user-config.toml");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
#[serial]
fn test_load_with_empty_config() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("missing.toml"));
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert!(config.is_project());
    assert_eq!(config.library, BindingConfig::default().library);
}

#[test]
#[serial]
fn test_load_from_specific_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(
        temp_dir.path(),
        r#"
[library]
image = "/usr/local/lib/libSDL3_image.so"
"#,
    );

    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("missing.toml"));
    let config = loader.load_from_file(&path).unwrap();

    assert_eq!(config.library.image, "/usr/local/lib/libSDL3_image.so");
    assert_eq!(config.library.sdl, "SDL3");
}

#[test]
fn test_load_missing_specific_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("missing.toml"));

    let result = loader.load_from_file(&temp_dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

// ============================================================================
// Precedence Tests
// ============================================================================

#[test]
#[serial]
fn test_project_overrides_user_config() {
    let temp_dir = TempDir::new().unwrap();
    let user = create_user_config(
        temp_dir.path(),
        r#"
[library]
sdl = "user-sdl"
ttf = "user-ttf"

[logging]
filter = "warn"
"#,
    );
    create_config_file(
        temp_dir.path(),
        r#"
[library]
sdl = "project-sdl"
"#,
    );

    let mut loader = ConfigLoader::with_global_config_path(user);
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert_eq!(config.library.sdl, "project-sdl");
    assert_eq!(config.library.ttf, "user-ttf");
    assert_eq!(config.logging.filter, "warn");
}

#[test]
#[serial]
fn test_search_paths_latest_source_first() {
    let temp_dir = TempDir::new().unwrap();
    let user = create_user_config(
        temp_dir.path(),
        r#"
[library]
search_paths = ["/user/lib"]
"#,
    );
    create_config_file(
        temp_dir.path(),
        r#"
[library]
search_paths = ["/project/lib"]
"#,
    );

    let env_paths = env::join_paths([PathBuf::from("/env/lib")]).unwrap();
    env::set_var(ENV_SEARCH_PATH, &env_paths);

    let mut loader = ConfigLoader::with_global_config_path(user);
    let config = loader.load_from_directory(temp_dir.path());
    env::remove_var(ENV_SEARCH_PATH);

    assert_eq!(
        config.unwrap().library.search_paths,
        vec![
            PathBuf::from("/env/lib"),
            PathBuf::from("/project/lib"),
            PathBuf::from("/user/lib"),
        ]
    );
}

#[test]
#[serial]
fn test_env_log_overrides_files() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[logging]
filter = "debug"
"#,
    );

    env::set_var(ENV_LOG, "sdlbind=trace");
    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("missing.toml"));
    let config = loader.load_from_directory(temp_dir.path());
    env::remove_var(ENV_LOG);

    assert_eq!(config.unwrap().logging.filter, "sdlbind=trace");
}

// ============================================================================
// Invalid Config Tests
// ============================================================================

#[rstest]
#[case::syntax("[library\nsdl = 1")]
#[case::unknown_section("[window]\nwidth = 3")]
#[case::wrong_type("[logging]\nforward_native_log = \"sometimes\"")]
#[serial]
fn test_invalid_config_is_parse_error(#[case] content: &str) {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), content);

    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("missing.toml"));
    let result = loader.load_from_directory(temp_dir.path());

    assert!(matches!(result, Err(ConfigError::TomlParseError { .. })));
}

#[test]
#[serial]
fn test_invalid_user_config_reported() {
    let temp_dir = TempDir::new().unwrap();
    let user = create_user_config(temp_dir.path(), "[library]\nsdl = \"\"");

    let mut loader = ConfigLoader::with_global_config_path(user);
    let result = loader.load_from_directory(temp_dir.path());

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
