use serde::Serialize;

use crate::liquidity::liquidityerror::LiquidityError;
use crate::math::curve::curve::Curve;
use crate::math::grid::pricegrid::PriceGrid;

// ─────────────────────────────────────────────────────────────────────────────
// ComponentSpec
// ─────────────────────────────────────────────────────────────────────────────

/// 可疊加的流動性基底函數。
///
/// - `Flat`：區間內為 `height`，區間外為 0。
/// - `Linear`：區間內為 `coefficient * (x - range_start)`。
/// - `Quadratic`：區間內為 `coefficient * (x - range_start)^2`。
/// - `Gauss`：`height * exp(-(x - center)^2 / (2 * width^2))`，不受區間限制。
///
/// 區間皆為閉區間 `[range_start, range_end]`。個別元件不做非負截斷，
/// 截斷由 `CurveComposer` 負責。
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "component_type")]
pub enum ComponentSpec {
    Flat {
        height: f64,
        range_start: f64,
        range_end: f64
    },
    Linear {
        coefficient: f64,
        range_start: f64,
        range_end: f64
    },
    Quadratic {
        coefficient: f64,
        range_start: f64,
        range_end: f64
    },
    Gauss {
        height: f64,
        width: f64,
        center: f64
    }
}

fn check_finite(component: &'static str, name: &str, value: f64) -> Result<(), LiquidityError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LiquidityError::invalid_parameter(component, format!("{} must be finite, got {}", name, value)))
    }
}

fn check_range(component: &'static str, range_start: f64, range_end: f64) -> Result<(), LiquidityError> {
    check_finite(component, "range_start", range_start)?;
    check_finite(component, "range_end", range_end)?;
    if range_start > range_end {
        return Err(LiquidityError::invalid_parameter(
            component,
            format!("range_start {} exceeds range_end {}", range_start, range_end)
        ));
    }
    Ok(())
}

/// 以 `f64::MIN_POSITIVE` 為下限的高斯分母 `2 * width^2`。
///
/// 下限套用在分母本身，`width` 極小導致平方下溢為 0 時同樣生效。
/// 第二個回傳值表示是否套用了下限。
pub fn gauss_denominator(width: f64) -> (f64, bool) {
    let denominator = 2.0 * width * width;
    if width > 0.0 && denominator > 0.0 {
        (denominator, false)
    } else {
        (f64::MIN_POSITIVE, true)
    }
}

impl ComponentSpec {
    pub fn flat(height: f64, range_start: f64, range_end: f64) -> Result<ComponentSpec, LiquidityError> {
        check_finite("flat", "height", height)?;
        check_range("flat", range_start, range_end)?;
        Ok(ComponentSpec::Flat { height, range_start, range_end })
    }

    pub fn linear(coefficient: f64, range_start: f64, range_end: f64) -> Result<ComponentSpec, LiquidityError> {
        check_finite("linear", "coefficient", coefficient)?;
        check_range("linear", range_start, range_end)?;
        Ok(ComponentSpec::Linear { coefficient, range_start, range_end })
    }

    pub fn quadratic(coefficient: f64, range_start: f64, range_end: f64) -> Result<ComponentSpec, LiquidityError> {
        check_finite("quadratic", "coefficient", coefficient)?;
        check_range("quadratic", range_start, range_end)?;
        Ok(ComponentSpec::Quadratic { coefficient, range_start, range_end })
    }

    /// 負寬度回傳錯誤；寬度為 0 則接受，於求值時套用下限。
    pub fn gauss(height: f64, width: f64, center: f64) -> Result<ComponentSpec, LiquidityError> {
        check_finite("gauss", "height", height)?;
        check_finite("gauss", "width", width)?;
        check_finite("gauss", "center", center)?;
        if width < 0.0 {
            return Err(LiquidityError::invalid_parameter(
                "gauss",
                format!("width must not be negative, got {}", width)
            ));
        }
        Ok(ComponentSpec::Gauss { height, width, center })
    }

    /// 以建構子的規則重新檢查直接建立的列舉值。
    pub fn validate(&self) -> Result<(), LiquidityError> {
        let _ = match *self {
            ComponentSpec::Flat { height, range_start, range_end } => ComponentSpec::flat(height, range_start, range_end)?,
            ComponentSpec::Linear { coefficient, range_start, range_end } => ComponentSpec::linear(coefficient, range_start, range_end)?,
            ComponentSpec::Quadratic { coefficient, range_start, range_end } => ComponentSpec::quadratic(coefficient, range_start, range_end)?,
            ComponentSpec::Gauss { height, width, center } => ComponentSpec::gauss(height, width, center)?
        };
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComponentSpec::Flat { .. } => "flat",
            ComponentSpec::Linear { .. } => "linear",
            ComponentSpec::Quadratic { .. } => "quadratic",
            ComponentSpec::Gauss { .. } => "gauss"
        }
    }

    /// 區間型元件的 `[range_start, range_end]`；高斯元件為全域，回傳 `None`。
    pub fn range(&self) -> Option<(f64, f64)> {
        match *self {
            ComponentSpec::Flat { range_start, range_end, .. }
            | ComponentSpec::Linear { range_start, range_end, .. }
            | ComponentSpec::Quadratic { range_start, range_end, .. } => Some((range_start, range_end)),
            ComponentSpec::Gauss { .. } => None
        }
    }

    pub fn is_width_floored(&self) -> bool {
        match *self {
            ComponentSpec::Gauss { width, .. } => gauss_denominator(width).1,
            _ => false
        }
    }
}

impl Curve for ComponentSpec {
    fn value(&self, x: f64) -> f64 {
        let in_range = |start: f64, end: f64| (x >= start) && (x <= end);
        match *self {
            ComponentSpec::Flat { height, range_start, range_end } => {
                if in_range(range_start, range_end) { height } else { 0.0 }
            },
            ComponentSpec::Linear { coefficient, range_start, range_end } => {
                if in_range(range_start, range_end) { coefficient * (x - range_start) } else { 0.0 }
            },
            ComponentSpec::Quadratic { coefficient, range_start, range_end } => {
                if in_range(range_start, range_end) {
                    let dx = x - range_start;
                    coefficient * dx * dx
                } else {
                    0.0
                }
            },
            ComponentSpec::Gauss { height, width, center } => {
                let (denominator, _) = gauss_denominator(width);
                let dx = x - center;
                height * (-(dx * dx) / denominator).exp()
            }
        }
    }
}

pub fn evaluate_component(spec: &ComponentSpec, grid: &PriceGrid) -> Vec<f64> {
    spec.values(grid.prices())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(prices: &[f64]) -> Vec<f64> {
        prices.to_vec()
    }

    #[test]
    fn test_flat_inside_and_outside_range() {
        let flat = ComponentSpec::flat(2.0, 80.0, 90.0).unwrap();
        assert_eq!(flat.values(&grid(&[79.0, 80.0, 85.0, 90.0, 91.0])), vec![0.0, 2.0, 2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_linear_measures_from_range_start() {
        let linear = ComponentSpec::linear(0.5, 80.0, 100.0).unwrap();
        assert_eq!(linear.value(85.0), 2.5);
        assert_eq!(linear.value(95.0), 7.5);
        assert_eq!(linear.value(101.0), 0.0);
    }

    #[test]
    fn test_linear_keeps_negative_sign() {
        let linear = ComponentSpec::linear(-1.0, 0.0, 10.0).unwrap();
        assert_eq!(linear.value(4.0), -4.0);
    }

    #[test]
    fn test_quadratic() {
        let quadratic = ComponentSpec::quadratic(0.25, 100.0, 120.0).unwrap();
        assert_eq!(quadratic.value(104.0), 4.0);
        assert_eq!(quadratic.value(99.0), 0.0);
        assert_eq!(quadratic.value(120.0), 100.0);
    }

    #[test]
    fn test_gauss_is_global() {
        let gauss = ComponentSpec::gauss(1.0, 8.0, 100.0).unwrap();
        assert!((gauss.value(100.0) - 1.0).abs() < 1e-15);
        assert!((gauss.value(80.0) - (-3.125f64).exp()).abs() < 1e-15);
        assert!(gauss.value(1000.0) >= 0.0);
        assert_eq!(gauss.range(), None);
    }

    #[test]
    fn test_zero_width_is_floored() {
        let gauss = ComponentSpec::gauss(3.0, 0.0, 100.0).unwrap();
        assert!(gauss.is_width_floored());
        assert_eq!(gauss.value(100.0), 3.0);
        assert_eq!(gauss.value(100.5), 0.0);
    }

    #[test]
    fn test_negative_width_never_produces_nan() {
        let gauss = ComponentSpec::Gauss { height: 1.0, width: -2.0, center: 0.0 };
        let values = gauss.values(&grid(&[-1.0, 0.0, 1.0]));
        assert!(values.iter().all(|v| v.is_finite()));
        assert_eq!(values[1], 1.0);
    }

    #[test]
    fn test_underflowing_width_is_floored() {
        let gauss = ComponentSpec::Gauss { height: 1.0, width: 1e-200, center: 0.0 };
        assert!(gauss.is_width_floored());
        assert_eq!(gauss.value(0.0), 1.0);
    }

    #[test]
    fn test_constructor_validation() {
        assert!(matches!(
            ComponentSpec::gauss(1.0, -1.0, 0.0),
            Err(LiquidityError::InvalidComponentParameter { component: "gauss", .. })
        ));
        assert!(matches!(
            ComponentSpec::flat(1.0, 90.0, 80.0),
            Err(LiquidityError::InvalidComponentParameter { component: "flat", .. })
        ));
        assert!(ComponentSpec::linear(f64::NAN, 0.0, 1.0).is_err());
        assert!(ComponentSpec::quadratic(1.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_direct_variant() {
        assert!(ComponentSpec::Gauss { height: 1.0, width: -2.0, center: 0.0 }.validate().is_err());
        assert!(ComponentSpec::Gauss { height: 1.0, width: 0.0, center: 0.0 }.validate().is_ok());
        assert!(ComponentSpec::Linear { coefficient: 1.0, range_start: 5.0, range_end: 1.0 }.validate().is_err());
    }

    #[test]
    fn test_evaluate_component_over_grid() {
        let price_grid = PriceGrid::new(80.0, 100.0, 3).unwrap();
        let flat = ComponentSpec::flat(1.5, 85.0, 95.0).unwrap();
        assert_eq!(evaluate_component(&flat, &price_grid), vec![0.0, 1.5, 0.0]);
    }

    #[test]
    fn test_degenerate_grid_evaluates() {
        let price_grid = PriceGrid::new(100.0, 100.0, 3).unwrap();
        let quadratic = ComponentSpec::quadratic(2.0, 100.0, 100.0).unwrap();
        assert_eq!(evaluate_component(&quadratic, &price_grid), vec![0.0; 3]);
    }
}
