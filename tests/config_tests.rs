// Config loading and validation tests

use agentstat_charts::config::AppConfig;
use agentstat_charts::downsampler::Reduction;

const VALID_CONFIG: &str = r#"
[window]
min_slot_ms = 1000
ideal_slot_count = 60

[sampling]
reduction = "avg"
decimals = 2
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.window.min_slot_ms, 1000);
    assert_eq!(config.window.ideal_slot_count, 60);
    assert_eq!(config.sampling.reduction, Reduction::Avg);
    assert_eq!(config.sampling.decimals, 2);
}

#[test]
fn test_config_defaults_when_omitted() {
    let config = AppConfig::load_from_str("").expect("empty config");
    assert_eq!(config.window.min_slot_ms, 5000);
    assert_eq!(config.window.ideal_slot_count, 200);
    assert_eq!(config.sampling.reduction, Reduction::Max);
    assert_eq!(config.sampling.decimals, 1);
}

#[test]
fn test_config_sampler_uses_window_section() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    let sampler = config.window.sampler();
    assert_eq!(sampler.min_slot_ms, 1000);
    assert_eq!(sampler.ideal_slot_count, 60);
}

#[test]
fn test_config_validation_rejects_min_slot_zero() {
    let bad = VALID_CONFIG.replace("min_slot_ms = 1000", "min_slot_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("window.min_slot_ms"));
}

#[test]
fn test_config_validation_rejects_min_slot_above_one_day() {
    let bad = VALID_CONFIG.replace("min_slot_ms = 1000", "min_slot_ms = 9223372036854775807");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("window.min_slot_ms must be <="));

    let one_day = VALID_CONFIG.replace("min_slot_ms = 1000", "min_slot_ms = 86400000");
    assert!(AppConfig::load_from_str(&one_day).is_ok());
}

#[test]
fn test_config_validation_rejects_ideal_slot_count_zero() {
    let bad = VALID_CONFIG.replace("ideal_slot_count = 60", "ideal_slot_count = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("window.ideal_slot_count"));
}

#[test]
fn test_config_validation_rejects_too_many_decimals() {
    let bad = VALID_CONFIG.replace("decimals = 2", "decimals = 9");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("sampling.decimals"));
}

#[test]
fn test_config_rejects_unknown_reduction() {
    let bad = VALID_CONFIG.replace("reduction = \"avg\"", "reduction = \"median\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.window.min_slot_ms, 1000);
    assert_eq!(config.sampling.reduction, Reduction::Avg);
}
