use serde::Serialize;
use tracing::debug;

use crate::liquidity::liquidityerror::LiquidityError;
use crate::liquidity::side::Side;
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};
use crate::math::grid::pricegrid::PriceGrid;

// ─────────────────────────────────────────────────────────────────────────────
// LiquidityCurve
// ─────────────────────────────────────────────────────────────────────────────

/// 價格網格與每個網格點上的流動性值。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiquidityCurve {
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<Side>,
    prices: PriceGrid,
    liquidity: Vec<f64>
}

impl LiquidityCurve {
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn with_side(mut self, side: Side) -> LiquidityCurve {
        self.side = Some(side);
        self
    }

    pub fn grid(&self) -> &PriceGrid {
        &self.prices
    }

    pub fn prices(&self) -> &[f64] {
        self.prices.prices()
    }

    pub fn liquidity(&self) -> &[f64] {
        &self.liquidity
    }

    pub fn len(&self) -> usize {
        self.liquidity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liquidity.is_empty()
    }

    /// 取得與 `price` 完全相同的網格點之流動性。
    pub fn liquidity_at(&self, price: f64) -> Option<f64> {
        self.prices()
            .iter()
            .position(|&p| p == price)
            .map(|i| self.liquidity[i])
    }
}

impl NonparametricCurve for LiquidityCurve {
    fn points(&self) -> Vec<Point2D> {
        self.prices()
            .iter()
            .zip(self.liquidity.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect()
    }

    fn min_x(&self) -> Option<f64> {
        Some(self.prices.lower())
    }

    fn max_x(&self) -> Option<f64> {
        Some(self.prices.upper())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// compose
// ─────────────────────────────────────────────────────────────────────────────

/// 將所有元件在每個網格點上的值相加。
///
/// 沒有元件時得到全為 0 的曲線。`clamp_nonnegative` 為真時，
/// 每個加總值再取 `max(0, sum)`。加總溢位為非有限值時回傳
/// `NonFiniteLiquidity`，截斷不會把它變成 0。
pub fn compose<C: Curve>(grid: &PriceGrid,
                         components: &[C],
                         clamp_nonnegative: bool) -> Result<LiquidityCurve, LiquidityError> {
    let liquidity = grid
        .iter()
        .map(|price| {
            let raw_sum: f64 = components.iter().map(|component| component.value(price)).sum();
            if !raw_sum.is_finite() {
                return Err(LiquidityError::NonFiniteLiquidity { price });
            }
            Ok(if clamp_nonnegative { raw_sum.max(0.0) } else { raw_sum })
        })
        .collect::<Result<Vec<f64>, LiquidityError>>()?;
    debug!(points = grid.len(), components = components.len(), clamp_nonnegative, "curve composed");
    Ok(LiquidityCurve {
        side: None,
        prices: grid.clone(),
        liquidity
    })
}
