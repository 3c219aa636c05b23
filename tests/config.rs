use std::sync::Mutex;

use tempfile::NamedTempFile;

use tearscan::TearscanConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "TEARSCAN_CONFIG",
        "TEARSCAN_SEARCH_FRAC",
        "TEARSCAN_DIFF_THRESHOLD",
        "TEARSCAN_ROW_THRESHOLD",
        "TEARSCAN_ROW_RATIO_THRESHOLD",
        "TEARSCAN_ANNOTATED_DIR",
        "TEARSCAN_PROFILE_DIR",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_apply_without_file_or_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = TearscanConfig::load().expect("load config");

    assert_eq!(cfg.params.search_frac, 0.45);
    assert_eq!(cfg.params.diff_threshold, 25.0);
    assert_eq!(cfg.params.row_threshold, 12.0);
    assert_eq!(cfg.params.row_ratio_threshold, 0.5);
    assert_eq!(cfg.annotated_dir.to_str(), Some("annotated_images"));
    assert_eq!(cfg.profile_dir.to_str(), Some("profiles"));

    clear_env();
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "detector": {
            "search_frac": 0.4,
            "diff_threshold": 30.0
        },
        "output": {
            "annotated_dir": "marked"
        }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("TEARSCAN_CONFIG", file.path());
    std::env::set_var("TEARSCAN_ROW_THRESHOLD", "15");
    std::env::set_var("TEARSCAN_PROFILE_DIR", "prof");

    let cfg = TearscanConfig::load().expect("load config");

    assert_eq!(cfg.params.search_frac, 0.4);
    assert_eq!(cfg.params.diff_threshold, 30.0);
    assert_eq!(cfg.params.row_threshold, 15.0);
    assert_eq!(cfg.params.row_ratio_threshold, 0.5);
    assert_eq!(cfg.annotated_dir.to_str(), Some("marked"));
    assert_eq!(cfg.profile_dir.to_str(), Some("prof"));

    clear_env();
}

#[test]
fn rejects_unparseable_env_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("TEARSCAN_DIFF_THRESHOLD", "plenty");
    assert!(TearscanConfig::load().is_err());

    clear_env();
}

#[test]
fn rejects_out_of_range_parameters_from_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{ "detector": { "search_frac": 0.6 } }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");
    std::env::set_var("TEARSCAN_CONFIG", file.path());

    assert!(TearscanConfig::load().is_err());

    clear_env();
}
