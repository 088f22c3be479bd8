use donor_reports::{
    config::{ConfigManager, ReportConfig},
    currency::CurrencyPalette,
    report::ContactStatus,
    ReportError,
};
use tempfile::TempDir;

#[test]
fn missing_file_loads_defaults() {
    let temp = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
    let config = manager.load().expect("load defaults");
    assert_eq!(config, ReportConfig::default());
    assert_eq!(config.min_in_hand_months, 4);
    assert_eq!(config.financial_partner_status, ContactStatus::PartnerFinancial);
}

#[test]
fn saved_config_round_trips() {
    let temp = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().join("nested")).expect("manager");
    let config = ReportConfig {
        palette: CurrencyPalette(vec!["#111111".into(), "#222222".into()]),
        financial_partner_status: ContactStatus::PartnerSpecial,
        min_in_hand_months: 6,
    };
    manager.save(&config).expect("save");
    assert!(manager.path().exists());

    let raw = std::fs::read_to_string(manager.path()).expect("read");
    assert!(raw.contains("PARTNER_SPECIAL"));
    assert_eq!(manager.load().expect("reload"), config);
}

#[test]
fn partial_file_fills_in_defaults() {
    let temp = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
    std::fs::write(manager.path(), r#"{"min_in_hand_months": 3}"#).expect("write");
    let config = manager.load().expect("load");
    assert_eq!(config.min_in_hand_months, 3);
    assert_eq!(config.palette, CurrencyPalette::default());
}

#[test]
fn invalid_config_is_rejected() {
    let temp = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");

    std::fs::write(manager.path(), "{ not json").expect("write");
    assert!(matches!(manager.load(), Err(ReportError::Serde(_))));

    let empty_palette = ReportConfig {
        palette: CurrencyPalette(Vec::new()),
        ..ReportConfig::default()
    };
    assert!(matches!(manager.save(&empty_palette), Err(ReportError::Config(_))));
}
