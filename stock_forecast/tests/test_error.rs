use series_math::MathError;
use std::io;
use stock_forecast::ForecastError;

#[test]
fn test_error_conversion() {
    // Test IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::Io(_)));
    assert!(forecast_error.to_string().contains("IO error"));

    // Numerical failures surface as fit errors
    let math_error = MathError::CalculationError("singular".to_string());
    match ForecastError::from(math_error) {
        ForecastError::ModelFit(msg) => assert!(msg.contains("singular")),
        other => panic!("Expected ModelFit, got {:?}", other),
    }

    // Test JSON error conversion
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        ForecastError::from(json_error),
        ForecastError::Serialization(_)
    ));
}

#[test]
fn test_error_display() {
    let error = ForecastError::DataUnavailable {
        symbol: "RACE".to_string(),
        reason: "unknown symbol".to_string(),
    };
    let text = error.to_string();
    assert!(text.contains("RACE"));
    assert!(text.contains("unknown symbol"));

    let error = ForecastError::EmptySeries { observations: 1 };
    assert!(error.to_string().contains("1 usable observation"));

    let error = ForecastError::InsufficientOverlap {
        actual: 3,
        predicted: 4,
    };
    assert!(error.to_string().contains("No overlapping timestamps"));

    let error = ForecastError::InvalidParameter("alpha must be between 0 and 1".to_string());
    assert!(error.to_string().contains("alpha must be between 0 and 1"));
}
