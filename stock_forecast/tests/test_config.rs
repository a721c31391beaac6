use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use stock_forecast::config::{parse_horizon_days, ForecastConfig, HorizonPreset, ModelKind};
use stock_forecast::models::additive::Seasonality;
use stock_forecast::ForecastError;
use tempfile::NamedTempFile;

#[rstest]
#[case("1 year", 365)]
#[case("2 years", 730)]
#[case("3Y", 1095)]
#[case("5yrs", 1825)]
#[case("90", 90)]
#[case(" 0 ", 0)]
fn test_parse_horizon(#[case] input: &str, #[case] days: usize) {
    assert_eq!(parse_horizon_days(input).unwrap(), days);
}

#[rstest]
#[case("4 years")]
#[case("1 month")]
#[case("soon")]
#[case("")]
fn test_parse_horizon_rejects(#[case] input: &str) {
    assert!(matches!(
        parse_horizon_days(input),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_preset_display_round_trip() {
    for preset in HorizonPreset::ALL {
        assert_eq!(preset.to_string().parse::<HorizonPreset>().unwrap(), preset);
    }
}

#[test]
fn test_default_config() {
    let config = ForecastConfig::default();

    assert_eq!(config.model, ModelKind::Additive);
    assert_eq!(config.default_horizon, HorizonPreset::OneYear);
    assert_eq!(config.additive.weekly_order, 3);
    assert_eq!(config.additive.yearly_order, 10);
    assert_eq!(config.additive.interval_width, 0.80);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_uses_defaults() {
    let json = r#"{
        "model": "holt",
        "holt": { "alpha": 0.3 },
        "additive": { "yearly": "disabled" },
        "default_horizon": "5 years"
    }"#;

    let config = ForecastConfig::from_json_str(json).unwrap();

    assert_eq!(config.model, ModelKind::Holt);
    assert_eq!(config.holt.alpha, 0.3);
    assert_eq!(config.holt.beta, 0.1);
    assert_eq!(config.additive.yearly, Seasonality::Disabled);
    assert_eq!(config.additive.weekly, Seasonality::Auto);
    assert_eq!(config.default_horizon.days(), 1825);
}

#[test]
fn test_json_round_trip() {
    let mut config = ForecastConfig::default();
    config.additive.interval_width = 0.95;
    config.model = ModelKind::Holt;

    let parsed = ForecastConfig::from_json_str(&config.to_json().unwrap()).unwrap();
    assert_eq!(parsed, config);
}

#[rstest]
#[case(r#"{ "additive": { "interval_width": 1.5 } }"#)]
#[case(r#"{ "additive": { "weekly_order": 0 } }"#)]
#[case(r#"{ "holt": { "beta": 0.0 } }"#)]
#[case(r#"{ "model": "arima" }"#)]
#[case("not json")]
fn test_invalid_config(#[case] json: &str) {
    assert!(matches!(
        ForecastConfig::from_json_str(json),
        Err(ForecastError::Config(_))
    ));
}

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "model": "additive", "additive": {{ "weekly": "enabled" }} }}"#).unwrap();

    let config = ForecastConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.additive.weekly, Seasonality::Enabled);

    let missing = ForecastConfig::from_json_file("/nonexistent/forecast.json");
    assert!(matches!(missing, Err(ForecastError::Io(_))));
}

#[test]
fn test_model_kind_from_str() {
    assert_eq!("Holt".parse::<ModelKind>().unwrap(), ModelKind::Holt);
    assert_eq!("additive".parse::<ModelKind>().unwrap(), ModelKind::Additive);
    assert!("arima".parse::<ModelKind>().is_err());
}
