//! Async hosts: simulated streaming and file replay

use data_aggregator::Timeframe;
use data_aggregator::feed::SimulatorConfig;
use indicator_engine::IndicatorId;
use market_pipeline::PipelineConfig;
use market_pipeline::host::{SimulateOptions, replay, simulate};
use pretty_assertions::assert_eq;
use services_common::Candle;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use test_utils::init_test_logging;

fn feed_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_replay_builds_candles_from_capture() {
    init_test_logging();
    let file = feed_file(&[
        r#"{"type":"trade","data":[{"p":100,"v":10,"t":0},{"p":105,"v":5,"t":30000}]}"#,
        "",
        r#"{"type":"ping"}"#,
        "garbage",
        r#"{"type":"trade","data":[{"p":95,"v":20,"t":59000},{"p":96,"v":1,"t":60000}]}"#,
    ]);

    let frame = replay(&PipelineConfig::default(), file.path()).await.unwrap();

    let candles: Vec<Candle> = frame.series.candles.iter().map(|c| c.candle).collect();
    assert_eq!(
        candles,
        vec![
            Candle::new(0, 100.0, 105.0, 95.0, 95.0, 35.0),
            Candle::new(60_000, 96.0, 96.0, 96.0, 96.0, 1.0),
        ]
    );
    assert_eq!(frame.change.delta, -4.0);
}

#[tokio::test]
async fn test_replay_applies_retention_on_recorded_time() {
    let day_and_a_bit = 24 * 3_600_000 + 120_000;
    let late = format!(r#"{{"type":"trade","data":[{{"p":101,"v":1,"t":{day_and_a_bit}}}]}}"#);
    let file = feed_file(&[r#"{"type":"trade","data":[{"p":100,"v":1,"t":0}]}"#, &late]);

    let frame = replay(&PipelineConfig::default(), file.path()).await.unwrap();
    assert_eq!(frame.series.candles.len(), 1);
    assert_eq!(frame.series.candles[0].candle.close, 101.0);
}

#[tokio::test]
async fn test_replay_ignores_out_of_range_timestamps() {
    let file = feed_file(&[
        r#"{"type":"trade","data":[{"p":100,"v":1,"t":999000}]}"#,
        r#"{"type":"trade","data":[{"p":1,"v":1,"t":1e30},{"p":101,"v":1,"t":1000000}]}"#,
    ]);

    let frame = replay(&PipelineConfig::default(), file.path()).await.unwrap();

    let candles: Vec<Candle> = frame.series.candles.iter().map(|c| c.candle).collect();
    assert_eq!(
        candles,
        vec![Candle::new(960_000, 100.0, 101.0, 100.0, 101.0, 2.0)]
    );
}

#[tokio::test]
async fn test_replay_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = replay(&PipelineConfig::default(), &dir.path().join("none.ndjson")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_simulate_streams_ticks_into_frames() {
    init_test_logging();
    let config = PipelineConfig {
        timeframe: Some(Timeframe::M5),
        indicators: vec![IndicatorId::Vwap, IndicatorId::Ema9],
        simulation: SimulatorConfig {
            seed: Some(17),
            ..SimulatorConfig::default()
        },
        ..PipelineConfig::default()
    };
    let options = SimulateOptions {
        hours: 1,
        ticks: 3,
        tick_interval: Duration::from_millis(1),
    };

    let frame = simulate(&config, options).await.unwrap();

    assert_eq!(frame.timeframe, Timeframe::M5);
    assert!(frame.series.candles.len() >= 12);
    let last = frame.series.candles.last().unwrap();
    assert!(last.get(IndicatorId::Vwap).is_some());
    assert!(last.get(IndicatorId::Ema9).is_some());
    assert!(frame.series.candles.iter().all(|c| c.candle.is_consistent()));
}
