mod support;

use exoscope::app_dirs::APP_DIR_NAME;
use exoscope::config::{self, AppSettings, CONFIG_FILE_NAME, DEFAULT_API_BASE_URL};
use support::exoscope_env::ExoscopeEnvGuard;

#[test]
fn settings_live_under_config_home_override() {
    let temp = tempfile::tempdir().expect("tempdir");
    let _env = ExoscopeEnvGuard::set_config_home(temp.path().to_path_buf());

    let path = config::config_path().expect("config path");
    assert_eq!(path, temp.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    let defaults = config::load_or_default().expect("defaults");
    assert_eq!(defaults.api_base_url, DEFAULT_API_BASE_URL);

    let settings = AppSettings {
        api_base_url: "http://10.0.0.7:8080".into(),
        read_timeout_secs: Some(30),
        ..AppSettings::default()
    };
    config::save(&settings).expect("save");
    assert!(path.is_file());
    assert_eq!(config::load_or_default().expect("reload"), settings);
}
