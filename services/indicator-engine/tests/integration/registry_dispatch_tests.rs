//! Key-based dispatch through the indicator table

use indicator_engine::{
    INDICATORS, Indicator as _, IndicatorId, IndicatorOutput, compute, compute_key,
};
use rstest::*;
use services_common::PipelineError;
use test_utils::{candles_from_closes, random_closes};

#[rstest]
#[case("vwap", "VWAP")]
#[case("ema9", "EMA(9)")]
#[case("ema21", "EMA(21)")]
#[case("sma20", "SMA(20)")]
#[case("sma50", "SMA(50)")]
#[case("sma200", "SMA(200)")]
#[case("macd", "MACD(12,26,9)")]
#[case("rsi", "RSI(14)")]
fn test_table_names_match_built_indicator(#[case] key: &str, #[case] name: &str) {
    let id: IndicatorId = key.parse().unwrap();
    assert_eq!(id.spec().name, name);
    assert_eq!(id.spec().kind.build().name(), name);
}

#[test]
fn test_compute_key_matches_compute() {
    let candles = candles_from_closes(&random_closes(60, 4));
    for spec in &INDICATORS {
        assert_eq!(
            compute_key(&candles, spec.key).unwrap(),
            compute(&candles, spec.id)
        );
    }
}

#[rstest]
#[case("")]
#[case("ema")]
#[case("bollinger")]
fn test_unknown_key_is_configuration_error(#[case] key: &str) {
    let candles = candles_from_closes(&[1.0, 2.0]);
    assert!(matches!(
        compute_key(&candles, key),
        Err(PipelineError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_overlay_flags() {
    let overlays: Vec<&str> = INDICATORS
        .iter()
        .filter(|spec| spec.kind.build().is_overlay())
        .map(|spec| spec.key)
        .collect();
    assert_eq!(overlays, vec!["vwap", "ema9", "ema21", "sma20", "sma50", "sma200"]);

    let rsi = compute(&candles_from_closes(&random_closes(20, 1)), IndicatorId::Rsi);
    assert!(matches!(rsi, IndicatorOutput::Oscillator { .. }));
}
