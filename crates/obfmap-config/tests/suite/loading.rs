use std::path::PathBuf;

use obfmap_config::{ConfigError, LoggingConfig, ObfmapConfig, ResolverConfig};
use pretty_assertions::assert_eq;

#[test]
fn empty_config_uses_defaults() {
    let config = ObfmapConfig::load_from_str("").unwrap();
    assert_eq!(config, ObfmapConfig::default());
    assert!(config.resolver.obfuscated);
    assert_eq!(config.resolver.mappings, None);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.stderr);
}

#[test]
fn loads_resolver_and_logging_sections_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("obfmap.toml");
    std::fs::write(
        &path,
        r#"
[resolver]
obfuscated = false
mappings = "mappings/snapshot.json"

[logging]
level = "debug"
json = true
"#,
    )
    .unwrap();

    let config = ObfmapConfig::load_from_path(&path).unwrap();
    assert_eq!(
        config.resolver,
        ResolverConfig {
            obfuscated: false,
            mappings: Some(PathBuf::from("mappings/snapshot.json")),
        }
    );
    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "debug".to_string(),
            json: true,
            ..LoggingConfig::default()
        }
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ObfmapConfig::load_from_str("[resolver]\nobfuscate = true\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "unexpected error: {err:?}");
}

#[test]
fn missing_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = ObfmapConfig::load_from_path(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string());
        }
        other => panic!("expected io error, got {other:?}"),
    }
}
