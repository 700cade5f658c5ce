//! End-to-end scenarios: feed messages in, windowed candles out

use data_aggregator::feed::parse_message;
use data_aggregator::{
    AggregatorConfig, CandleAggregator, PriceChange, SharedAggregator, Timeframe, ViewWindow,
    filter_window,
};
use pretty_assertions::assert_eq;
use services_common::{Candle, Clock as _, ManualClock};
use std::sync::Arc;

fn replay(messages: &[&str], clock: &ManualClock, aggregator: &SharedAggregator) -> usize {
    let mut accepted = 0;
    for message in messages {
        for raw in parse_message(message).unwrap() {
            let trade = raw.into_trade().unwrap();
            clock.advance_to(trade.timestamp);
            if aggregator.ingest(trade).is_ok() {
                accepted += 1;
            }
        }
    }
    accepted
}

#[test]
fn test_feed_to_candles_across_resolutions() {
    let clock = Arc::new(ManualClock::new(0));
    let aggregator = SharedAggregator::new(CandleAggregator::with_clock(
        AggregatorConfig::default(),
        clock.clone(),
    ));

    let messages = [
        r#"{"type":"trade","data":[{"p":100,"v":10,"t":0},{"p":105,"v":5,"t":30000}]}"#,
        r#"{"type":"ping"}"#,
        r#"{"type":"trade","data":[{"p":95,"v":20,"t":59000}]}"#,
        r#"{"type":"trade","data":[{"p":96,"v":1,"t":60000},{"p":-1,"v":1,"t":61000}]}"#,
        r#"{"type":"trade","data":[{"p":97,"v":4,"t":299999},{"p":98,"v":2,"t":300000}]}"#,
    ];

    assert_eq!(replay(&messages, &clock, &aggregator), 6);

    assert_eq!(
        aggregator.snapshot_timeframe(Timeframe::M1),
        vec![
            Candle::new(0, 100.0, 105.0, 95.0, 95.0, 35.0),
            Candle::new(60_000, 96.0, 96.0, 96.0, 96.0, 1.0),
            Candle::new(240_000, 97.0, 97.0, 97.0, 97.0, 4.0),
            Candle::new(300_000, 98.0, 98.0, 98.0, 98.0, 2.0),
        ]
    );

    assert_eq!(
        aggregator.snapshot_timeframe(Timeframe::M5),
        vec![
            Candle::new(0, 100.0, 105.0, 95.0, 97.0, 40.0),
            Candle::new(300_000, 98.0, 98.0, 98.0, 98.0, 2.0),
        ]
    );
}

#[test]
fn test_view_window_and_change_summary() {
    let clock = Arc::new(ManualClock::new(0));
    let aggregator = SharedAggregator::new(CandleAggregator::with_clock(
        AggregatorConfig::default(),
        clock.clone(),
    ));

    // One trade per minute for two hours, price climbing by 1
    let messages: Vec<String> = (0..120)
        .map(|m| {
            format!(
                r#"{{"type":"trade","data":[{{"p":{},"v":1,"t":{}}}]}}"#,
                100 + m,
                m * 60_000
            )
        })
        .collect();
    let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
    replay(&refs, &clock, &aggregator);

    let candles = aggregator.snapshot_timeframe(Timeframe::M1);
    assert_eq!(candles.len(), 120);

    let last_quarter = filter_window(&candles, clock.now_ms(), ViewWindow::M15);
    assert_eq!(last_quarter.len(), 15);
    assert_eq!(last_quarter[0].open, 205.0);

    let change = PriceChange::from_candles(last_quarter);
    assert_eq!(change.delta, 14.0);
    assert!(PriceChange::is_up(last_quarter));

    let whole_day = filter_window(&candles, clock.now_ms(), ViewWindow::D1);
    assert_eq!(whole_day.len(), 120);
}
