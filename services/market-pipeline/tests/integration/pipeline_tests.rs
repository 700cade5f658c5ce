//! Pipeline frames: timeframe switching, indicator selection, view windows

use data_aggregator::{Timeframe, ViewWindow};
use indicator_engine::IndicatorId;
use market_pipeline::{Pipeline, PipelineConfig};
use pretty_assertions::assert_eq;
use rstest::*;
use services_common::{ManualClock, Trade};
use std::sync::Arc;

const HOUR_MS: i64 = 3_600_000;
const LAST_TRADE_MS: i64 = 119 * 60_000 + 30_000;

/// Two hours of one trade per minute, price climbing by 1 each minute
#[fixture]
fn pipeline() -> (Pipeline, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(2 * HOUR_MS));
    let pipeline = Pipeline::new(&PipelineConfig::default(), clock.clone()).unwrap();
    for minute in 0..120 {
        pipeline
            .on_trade(Trade::new(100.0 + minute as f64, 1.0, minute * 60_000 + 30_000))
            .unwrap();
    }
    (pipeline, clock)
}

#[rstest]
fn test_timeframe_switch_rederives_candles(pipeline: (Pipeline, Arc<ManualClock>)) {
    let (mut pipeline, _) = pipeline;
    assert_eq!(pipeline.frame(2 * HOUR_MS).series.candles.len(), 120);

    pipeline.set_timeframe(Timeframe::M15);
    let frame = pipeline.frame(2 * HOUR_MS);
    assert_eq!(frame.timeframe, Timeframe::M15);
    assert_eq!(frame.series.candles.len(), 8);
    assert_eq!(frame.series.candles[0].candle.volume, 15.0);

    pipeline.set_timeframe(Timeframe::M1);
    assert_eq!(pipeline.frame(2 * HOUR_MS).series.candles.len(), 120);
}

#[rstest]
fn test_selected_indicators_are_attached(pipeline: (Pipeline, Arc<ManualClock>)) {
    let (mut pipeline, _) = pipeline;
    pipeline.set_indicators(vec![IndicatorId::Sma20, IndicatorId::Macd]);

    let frame = pipeline.frame(2 * HOUR_MS);
    let last = frame.series.candles.last().unwrap();
    assert_eq!(last.get(IndicatorId::Sma20), Some(209.5));
    assert!(last.get(IndicatorId::Macd).is_some());
    assert!(last.get(IndicatorId::Vwap).is_none());
    assert_eq!(frame.series.macd.len(), 120 - 33);
}

#[rstest]
fn test_view_window_trims_after_indicators(pipeline: (Pipeline, Arc<ManualClock>)) {
    let (mut pipeline, _) = pipeline;
    pipeline.set_indicators(vec![IndicatorId::Sma50]);
    pipeline.set_view_window(Some(ViewWindow::M15));

    let frame = pipeline.frame(LAST_TRADE_MS);
    assert_eq!(frame.window, Some(ViewWindow::M15));
    assert_eq!(frame.series.candles.len(), 15);
    // SMA(50) needs more history than the window shows
    assert!(frame.series.candles.iter().all(|c| c.get(IndicatorId::Sma50).is_some()));
    assert_eq!(frame.change.delta, 14.0);
}

#[rstest]
fn test_macd_series_follows_view_window(pipeline: (Pipeline, Arc<ManualClock>)) {
    let (mut pipeline, _) = pipeline;
    pipeline.set_indicators(vec![IndicatorId::Macd]);
    pipeline.set_view_window(Some(ViewWindow::H1));

    let frame = pipeline.frame(LAST_TRADE_MS);
    let first = frame.series.candles[0].candle.timestamp;
    assert_eq!(frame.series.candles.len(), 60);
    assert_eq!(frame.series.macd.len(), 60);
    assert_eq!(frame.series.macd[0].timestamp, first);
}

#[rstest]
fn test_feed_messages(pipeline: (Pipeline, Arc<ManualClock>)) {
    let (pipeline, _) = pipeline;
    let before = pipeline.aggregator().len();

    let accepted = pipeline
        .on_message(
            r#"{"type":"trade","data":[{"p":300,"v":2,"t":7190000},{"p":0,"v":2,"t":7190001}]}"#,
        )
        .unwrap();
    assert_eq!(accepted, 1);
    assert_eq!(pipeline.aggregator().len(), before + 1);

    assert_eq!(pipeline.on_message(r#"{"type":"ping"}"#).unwrap(), 0);
    assert!(pipeline.on_message(r#"{"type":"error","msg":"bad key"}"#).is_err());
    assert!(pipeline.on_message("not json").is_err());
}

#[rstest]
fn test_retention_follows_clock(pipeline: (Pipeline, Arc<ManualClock>)) {
    let (pipeline, clock) = pipeline;
    // one hour past the default 24h horizon for the first trades
    clock.set(25 * HOUR_MS);
    assert_eq!(pipeline.frame(25 * HOUR_MS).series.candles.len(), 60);
}

#[test]
fn test_empty_pipeline_frame() {
    let clock = Arc::new(ManualClock::new(0));
    let config = PipelineConfig {
        indicators: IndicatorId::all().collect(),
        view_window: Some(ViewWindow::D1),
        ..PipelineConfig::default()
    };
    let frame = Pipeline::new(&config, clock).unwrap().frame(0);

    assert!(frame.series.candles.is_empty());
    assert!(frame.series.macd.is_empty());
    assert_eq!(frame.change.delta, 0.0);
}

#[test]
fn test_invalid_config_rejected() {
    let clock = Arc::new(ManualClock::new(0));
    let mut config = PipelineConfig::default();
    config.aggregator.retention_ms = -1;
    assert!(Pipeline::new(&config, clock).is_err());
}
