use serde::Serialize;
use tracing::debug;

use crate::liquidity::liquidityerror::LiquidityError;

pub const DEFAULT_POINTS: usize = 10;

/// `[lower, upper]` 上等距、含兩端點的價格取樣。建立後不可變。
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceGrid {
    prices: Vec<f64>
}

impl PriceGrid {
    pub fn new(lower: f64, upper: f64, count: usize) -> Result<PriceGrid, LiquidityError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(LiquidityError::invalid_range(
                format!("bounds must be finite, got [{}, {}]", lower, upper)
            ));
        }
        if lower > upper {
            return Err(LiquidityError::invalid_range(
                format!("lower {} exceeds upper {}", lower, upper)
            ));
        }
        if count == 0 {
            return Err(LiquidityError::invalid_range("grid needs at least one point"));
        }

        let prices = if count == 1 {
            vec![lower]
        } else {
            let span = upper - lower;
            let last = count - 1;
            (0..count)
                .map(|i| {
                    if i == last {
                        upper
                    } else {
                        lower + span * (i as f64) / (last as f64)
                    }
                })
                .collect()
        };
        debug!(lower, upper, count, "price grid built");
        Ok(PriceGrid { prices })
    }

    pub fn lower(&self) -> f64 {
        self.prices[0]
    }

    pub fn upper(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn contain(&self, price: f64) -> bool {
        (price >= self.lower()) && (price <= self.upper())
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, f64>> {
        self.prices.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.prices.clone()
    }
}

pub fn make_grid(lower: f64, upper: f64, count: usize) -> Result<Vec<f64>, LiquidityError> {
    PriceGrid::new(lower, upper, count).map(|grid| grid.to_vec())
}
