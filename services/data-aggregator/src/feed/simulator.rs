//! Synthetic trade source
//!
//! Random-walk generator used to seed a chart with history and to keep it
//! moving when no live feed is connected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use services_common::Trade;
use services_common::constants::time::MILLIS_PER_MINUTE;

/// Condition tag for generated history
pub const HISTORICAL_CONDITION: &str = "Historical";

/// Condition tag for generated live ticks
pub const SIMULATED_CONDITION: &str = "Simulated";

/// Spacing between trades of one live tick
const TICK_TRADE_SPACING_MS: i64 = 10;

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Starting price
    pub base_price: f64,
    /// Step size as a fraction of the current price
    pub volatility: f64,
    /// Trades per simulated minute of history (min inclusive, max exclusive)
    pub trades_per_minute: (usize, usize),
    /// Trades per live tick (min inclusive, max exclusive)
    pub trades_per_tick: (usize, usize),
    /// Trade size range (min inclusive, max exclusive)
    pub volume_range: (u32, u32),
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            base_price: 100.0,
            volatility: 0.0002, // 0.02%
            trades_per_minute: (50, 150),
            trades_per_tick: (3, 6),
            volume_range: (100, 1000),
            seed: None,
        }
    }
}

/// Random-walk trade generator
#[derive(Debug)]
pub struct TradeSimulator {
    config: SimulatorConfig,
    price: f64,
    rng: StdRng,
}

impl TradeSimulator {
    /// Create a simulator starting at `config.base_price`
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            price: config.base_price,
            config,
            rng,
        }
    }

    /// Current simulated price
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Minute-by-minute history covering `hours` before `end_ms`
    ///
    /// Trades are spread randomly inside each minute, so they are not in
    /// timestamp order. None is later than `end_ms`.
    pub fn historical(&mut self, end_ms: i64, hours: u32) -> Vec<Trade> {
        let minutes = i64::from(hours) * 60;
        let (min_trades, max_trades) = self.config.trades_per_minute;
        let mut trades = Vec::with_capacity(minutes as usize * max_trades);

        for i in (0..=minutes).rev() {
            let minute_start = end_ms - i * MILLIS_PER_MINUTE;
            let step = self.price * self.config.volatility;
            let count = self.rng.gen_range(min_trades..max_trades.max(min_trades + 1));

            for _ in 0..count {
                self.price += self.rng.gen_range(-0.5..0.5) * step;
                let offset = self.rng.gen_range(0..MILLIS_PER_MINUTE);
                let timestamp = (minute_start + offset).min(end_ms);
                trades.push(
                    Trade::new(self.price, self.volume(), timestamp)
                        .with_conditions([HISTORICAL_CONDITION]),
                );
            }
        }

        trades
    }

    /// A handful of trades around the current price starting at `now_ms`
    pub fn tick(&mut self, now_ms: i64) -> Vec<Trade> {
        let (min_trades, max_trades) = self.config.trades_per_tick;
        let count = self.rng.gen_range(min_trades..max_trades.max(min_trades + 1));
        let step = self.price * self.config.volatility;
        let base = self.price;

        let trades: Vec<Trade> = (0..count)
            .map(|i| {
                let price = base + self.rng.gen_range(-0.5..0.5) * step;
                Trade::new(price, self.volume(), now_ms + i as i64 * TICK_TRADE_SPACING_MS)
                    .with_conditions([SIMULATED_CONDITION])
            })
            .collect();

        if let Some(last) = trades.last() {
            self.price = last.price;
        }
        trades
    }

    fn volume(&mut self) -> f64 {
        let (min, max) = self.config.volume_range;
        f64::from(self.rng.gen_range(min..max.max(min + 1)))
    }
}
