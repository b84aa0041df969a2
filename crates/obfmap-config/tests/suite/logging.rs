use obfmap_config::{init_tracing, LoggingConfig};

#[test]
fn init_tracing_writes_to_the_configured_file_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("obfmap.log");
    let config = LoggingConfig {
        level: "obfmap_config_test=info".to_string(),
        stderr: false,
        file: Some(path.clone()),
        ..LoggingConfig::default()
    };

    init_tracing(&config);
    init_tracing(&LoggingConfig::default());
    tracing::info!(target: "obfmap_config_test", "hello from the test");

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("hello from the test"), "log file: {text}");
}
