use serde::Serialize;
use tracing::{
    debug,
    warn
};

use crate::liquidity::component::componentspec::ComponentSpec;
use crate::liquidity::component::parametriccomponent::ParametricParameters;
use crate::liquidity::curvecomposer::{
    compose,
    LiquidityCurve
};
use crate::liquidity::liquidityerror::LiquidityError;
use crate::liquidity::side::Side;
use crate::math::grid::pricegrid::{
    PriceGrid,
    DEFAULT_POINTS
};

// ─────────────────────────────────────────────────────────────────────────────
// SideSpec
// ─────────────────────────────────────────────────────────────────────────────

/// 單側的曲線定義：一組個別元件，或 A-E 參數族。
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "side_type")]
pub enum SideSpec {
    Components { components: Vec<ComponentSpec> },
    Parametric(ParametricParameters)
}

impl SideSpec {
    pub fn components(components: Vec<ComponentSpec>) -> SideSpec {
        SideSpec::Components { components }
    }

    pub fn validate(&self) -> Result<(), LiquidityError> {
        match self {
            SideSpec::Components { components } => {
                for component in components.iter() {
                    component.validate()?;
                }
                Ok(())
            },
            SideSpec::Parametric(params) => params.validate()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RangeSplitter
// ─────────────────────────────────────────────────────────────────────────────

/// 以參考價格將 `[lower, upper]` 切成 `below = [lower, price]`
/// 與 `above = [price, upper]`，兩側各自獨立求值。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeSplitter {
    reference_price: f64,
    lower: f64,
    upper: f64
}

/// `lower <= reference_price <= upper`，且邊界皆為有限值。
pub fn check_bounds(reference_price: f64, lower: f64, upper: f64) -> Result<(), LiquidityError> {
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
    if !(reference_price >= lower && reference_price <= upper) {
        return Err(LiquidityError::OutOfRange { reference_price, lower, upper });
    }
    Ok(())
}

impl RangeSplitter {
    pub fn new(reference_price: f64, lower: f64, upper: f64) -> Result<RangeSplitter, LiquidityError> {
        check_bounds(reference_price, lower, upper)?;
        Ok(RangeSplitter { reference_price, lower, upper })
    }

    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    pub fn domain(&self, side: Side) -> (f64, f64) {
        match side {
            Side::Below => (self.lower, self.reference_price),
            Side::Above => (self.reference_price, self.upper)
        }
    }

    pub fn grid(&self, side: Side, points: usize) -> Result<PriceGrid, LiquidityError> {
        let (lower, upper) = self.domain(side);
        PriceGrid::new(lower, upper, points)
    }

    pub fn compose_side(&self,
                        side: Side,
                        side_spec: &SideSpec,
                        points: usize,
                        clamp_nonnegative: bool) -> Result<LiquidityCurve, LiquidityError> {
        let grid = self.grid(side, points)?;
        let curve = match side_spec {
            SideSpec::Components { components } => {
                for component in components.iter().filter(|c| c.is_width_floored()) {
                    warn!(side = side.as_str(), component = component.name(), "non-positive gaussian width floored to f64::MIN_POSITIVE");
                }
                compose(&grid, components, clamp_nonnegative)?
            },
            SideSpec::Parametric(params) => {
                if params.is_e_floored() {
                    warn!(side = side.as_str(), e = params.e, "zero parametric E floored to f64::MIN_POSITIVE");
                }
                compose(&grid, &[params.anchored_at(self.reference_price)], clamp_nonnegative)?
            }
        };
        debug!(side = side.as_str(), points, "side composed");
        Ok(curve.with_side(side))
    }

    pub fn compose(&self,
                   below: &SideSpec,
                   above: &SideSpec,
                   points: usize,
                   clamp_nonnegative: bool) -> Result<(LiquidityCurve, LiquidityCurve), LiquidityError> {
        let below_curve = self.compose_side(Side::Below, below, points, clamp_nonnegative)?;
        let above_curve = self.compose_side(Side::Above, above, points, clamp_nonnegative)?;
        Ok((below_curve, above_curve))
    }
}

/// 以每側預設點數（`DEFAULT_POINTS`）對兩側分別組合元件。
pub fn split_and_compose(reference_price: f64,
                         lower: f64,
                         upper: f64,
                         below_specs: &[ComponentSpec],
                         above_specs: &[ComponentSpec],
                         clamp_nonnegative: bool) -> Result<(LiquidityCurve, LiquidityCurve), LiquidityError> {
    let splitter = RangeSplitter::new(reference_price, lower, upper)?;
    let below = SideSpec::components(below_specs.to_vec());
    let above = SideSpec::components(above_specs.to_vec());
    splitter.compose(&below, &above, DEFAULT_POINTS, clamp_nonnegative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::curve::nonparametriccurve::nonparametriccurve::NonparametricCurve;

    fn gauss() -> ComponentSpec {
        ComponentSpec::gauss(1.0, 8.0, 100.0).unwrap()
    }

    #[test]
    fn test_domains() {
        let (below, above) = split_and_compose(100.0, 80.0, 120.0, &[gauss()], &[gauss()], true).unwrap();
        assert_eq!(below.min_x(), Some(80.0));
        assert_eq!(below.max_x(), Some(100.0));
        assert_eq!(above.min_x(), Some(100.0));
        assert_eq!(above.max_x(), Some(120.0));
        assert_eq!(below.len(), DEFAULT_POINTS);
        assert_eq!(below.side(), Some(Side::Below));
        assert_eq!(above.side(), Some(Side::Above));
    }

    #[test]
    fn test_gaussian_scenario() {
        let (below, above) = split_and_compose(100.0, 80.0, 120.0, &[gauss()], &[gauss()], true).unwrap();
        let at_80 = below.liquidity_at(80.0).unwrap();
        assert!((at_80 - (-3.125f64).exp()).abs() < 1e-12);
        assert!((at_80 - 0.0439).abs() < 1e-4);
        assert!((below.liquidity_at(100.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((above.liquidity_at(100.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sides_are_independent() {
        let above_specs = [ComponentSpec::quadratic(0.01, 100.0, 120.0).unwrap(), gauss()];
        let (_, above_a) = split_and_compose(100.0, 80.0, 120.0, &[gauss()], &above_specs, true).unwrap();
        let steep_below = [ComponentSpec::linear(-5.0, 80.0, 120.0).unwrap(), ComponentSpec::flat(9.0, 80.0, 120.0).unwrap()];
        let (below_b, above_b) = split_and_compose(100.0, 80.0, 120.0, &steep_below, &above_specs, true).unwrap();
        assert_eq!(above_a.liquidity(), above_b.liquidity());
        assert_eq!(below_b.liquidity_at(80.0), Some(9.0));
    }

    #[test]
    fn test_reference_outside_bounds() {
        assert!(matches!(
            split_and_compose(130.0, 80.0, 120.0, &[], &[], true),
            Err(LiquidityError::OutOfRange { .. })
        ));
        assert!(matches!(
            RangeSplitter::new(79.9, 80.0, 120.0),
            Err(LiquidityError::OutOfRange { .. })
        ));
        assert!(matches!(
            RangeSplitter::new(f64::NAN, 80.0, 120.0),
            Err(LiquidityError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_inverted_bounds() {
        assert!(matches!(
            RangeSplitter::new(100.0, 120.0, 80.0),
            Err(LiquidityError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_reference_on_bound_gives_degenerate_side() {
        let splitter = RangeSplitter::new(80.0, 80.0, 120.0).unwrap();
        let spec = SideSpec::components(vec![gauss()]);
        let (below, above) = splitter.compose(&spec, &spec, 5, true).unwrap();
        assert!(below.prices().iter().all(|&p| p == 80.0));
        assert!(below.liquidity().iter().all(|v| v.is_finite()));
        assert_eq!(above.max_x(), Some(120.0));
    }

    #[test]
    fn test_parametric_side() {
        let splitter = RangeSplitter::new(100.0, 80.0, 120.0).unwrap();
        let params = ParametricParameters::new(0.5, 0.0, 0.0, 2.0, 100.0).unwrap();
        let curve = splitter.compose_side(Side::Above, &SideSpec::Parametric(params), 3, true).unwrap();
        assert_eq!(curve.prices(), &[100.0, 110.0, 120.0]);
        assert!((curve.liquidity()[0] - 2.5).abs() < 1e-12);
        assert!((curve.liquidity()[1] - (0.5 + 2.0 * (-1.0f64).exp())).abs() < 1e-12);
        assert!((curve.liquidity()[2] - (0.5 + 2.0 * (-4.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_parametric_side_is_clamped() {
        let splitter = RangeSplitter::new(100.0, 80.0, 120.0).unwrap();
        let params = ParametricParameters::new(-1.0, 0.0, 0.0, 2.0, 100.0).unwrap();
        let curve = splitter.compose_side(Side::Below, &SideSpec::Parametric(params), 3, true).unwrap();
        assert_eq!(curve.prices(), &[80.0, 90.0, 100.0]);
        assert_eq!(curve.liquidity()[0], 0.0);
        assert_eq!(curve.liquidity()[1], 0.0);
        assert!((curve.liquidity()[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overflowing_side_is_reported() {
        let splitter = RangeSplitter::new(100.0, 80.0, 120.0).unwrap();
        let params = ParametricParameters::new(0.0, 0.0, 1e308, 0.0, 1.0).unwrap();
        assert!(matches!(
            splitter.compose_side(Side::Below, &SideSpec::Parametric(params), 3, true),
            Err(LiquidityError::NonFiniteLiquidity { price }) if price == 80.0
        ));
    }

    #[test]
    fn test_check_bounds() {
        assert!(check_bounds(100.0, 80.0, 120.0).is_ok());
        assert!(check_bounds(80.0, 80.0, 80.0).is_ok());
        assert!(matches!(check_bounds(100.0, 80.0, f64::INFINITY), Err(LiquidityError::InvalidRange { .. })));
        assert!(matches!(check_bounds(121.0, 80.0, 120.0), Err(LiquidityError::OutOfRange { .. })));
    }
}
