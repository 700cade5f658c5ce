//! SMA and EMA alignment and numerics

use indicator_engine::moving_average::{ema, sma};
use indicator_engine::{Ema, Indicator, Sma};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::*;
use test_utils::{assert_approx_eq, candles_from_closes, random_closes};

#[test]
fn test_sma_values_land_on_window_end() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let values = Sma::new(3).calculate(&candles).scalar_series();

    assert_eq!(values.start_index(), 2);
    assert_eq!(values.len(), 3);
    assert_eq!(values.get(1), None);
    assert_eq!(values.get(2), Some(&2.0));
    assert_eq!(values.get(3), Some(&3.0));
    assert_eq!(values.get(4), Some(&4.0));
}

#[test]
fn test_ema_of_constant_series() {
    let candles = candles_from_closes(&[10.0, 10.0, 10.0, 10.0]);
    let values = Ema::new(3).calculate(&candles).scalar_series();

    let pairs: Vec<(usize, f64)> = values.iter().map(|(i, v)| (i, *v)).collect();
    assert_eq!(pairs, vec![(2, 10.0), (3, 10.0)]);
}

#[test]
fn test_ema_tracks_recent_prices_faster_than_sma() {
    let mut closes = vec![100.0; 20];
    closes.extend([110.0; 5]);

    let ema_last = *ema(&closes, 9).last().unwrap();
    let sma_last = *sma(&closes, 9).last().unwrap();
    assert!(ema_last > sma_last, "ema {ema_last} sma {sma_last}");
}

#[test]
fn test_ema_reference_values() {
    // k = 2 / 6
    let closes = [22.27, 22.19, 22.08, 22.17, 22.18, 22.13];
    let values = ema(&closes, 5);
    let seed = (22.27 + 22.19 + 22.08 + 22.17 + 22.18) / 5.0;
    assert_approx_eq(values[0], seed, 1e-12);
    assert_approx_eq(values[1], 22.13 / 3.0 + seed * 2.0 / 3.0, 1e-12);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(4)]
fn test_insufficient_input_is_empty(#[case] count: usize) {
    let candles = candles_from_closes(&vec![50.0; count]);
    assert!(Sma::new(5).calculate(&candles).is_empty());
    assert!(Ema::new(5).calculate(&candles).is_empty());
}

#[test]
fn test_zero_period_is_empty() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    assert!(Sma::new(0).calculate(&candles).is_empty());
    assert!(Ema::new(0).calculate(&candles).is_empty());
}

#[test]
fn test_period_one_is_identity() {
    let closes = random_closes(30, 11);
    assert_eq!(sma(&closes, 1), closes);
    assert_eq!(ema(&closes, 1), closes);
}

proptest! {
    #[test]
    fn prop_output_length_is_input_minus_offset(
        closes in prop::collection::vec(1.0f64..1_000.0, 0..120),
        period in 1usize..40,
    ) {
        let candles = candles_from_closes(&closes);
        for output in [Sma::new(period).calculate(&candles), Ema::new(period).calculate(&candles)] {
            if closes.len() < period {
                prop_assert!(output.is_empty());
            } else {
                prop_assert_eq!(output.start_index(), period - 1);
                prop_assert_eq!(output.start_index() + output.len(), closes.len());
            }
        }
    }

    #[test]
    fn prop_sma_stays_within_window_range(
        closes in prop::collection::vec(1.0f64..1_000.0, 1..80),
        period in 1usize..20,
    ) {
        for (i, value) in sma(&closes, period).into_iter().enumerate() {
            let window = &closes[i..i + period];
            let min = window.iter().copied().fold(f64::INFINITY, f64::min);
            let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(value >= min - 1e-9 && value <= max + 1e-9);
        }
    }
}
