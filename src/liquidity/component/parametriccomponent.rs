use serde::{
    Deserialize,
    Serialize
};

use crate::liquidity::liquidityerror::LiquidityError;
use crate::math::curve::curve::Curve;

/// 單一公式取代個別元件的參數族：
///
///   f(p) = A + B*x + C*x^2 + D*exp(-x^2 / E),  x = |p - reference_price|
///
/// 負的 `E` 為參數錯誤；`E == 0` 則以 `f64::MIN_POSITIVE` 代替。
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParametricParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64
}

impl ParametricParameters {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64) -> Result<ParametricParameters, LiquidityError> {
        let params = ParametricParameters { a, b, c, d, e };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), LiquidityError> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c), ("d", self.d), ("e", self.e)] {
            if !value.is_finite() {
                return Err(LiquidityError::invalid_parameter(
                    "parametric",
                    format!("{} must be finite, got {}", name, value)
                ));
            }
        }
        if self.e < 0.0 {
            return Err(LiquidityError::invalid_parameter(
                "parametric",
                format!("e must not be negative, got {}", self.e)
            ));
        }
        Ok(())
    }

    pub fn effective_e(&self) -> f64 {
        if self.e > 0.0 { self.e } else { f64::MIN_POSITIVE }
    }

    pub fn is_e_floored(&self) -> bool {
        !(self.e > 0.0)
    }

    pub fn anchored_at(self, reference_price: f64) -> ParametricComponent {
        ParametricComponent { params: self, reference_price }
    }
}

/// 固定於某個參考價格的參數族曲線。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParametricComponent {
    params: ParametricParameters,
    reference_price: f64
}

impl ParametricComponent {
    pub fn params(&self) -> &ParametricParameters {
        &self.params
    }

    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }
}

impl Curve for ParametricComponent {
    fn value(&self, x: f64) -> f64 {
        let p = &self.params;
        let distance = (x - self.reference_price).abs();
        let squared = distance * distance;
        p.a + p.b * distance + p.c * squared + p.d * (-squared / p.effective_e()).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::grid::pricegrid::PriceGrid;

    #[test]
    fn test_value_at_reference_price() {
        let curve = ParametricParameters::new(0.5, 1.0, 2.0, 3.0, 10.0).unwrap().anchored_at(100.0);
        assert!((curve.value(100.0) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_in_distance() {
        let curve = ParametricParameters::new(1.0, 0.2, 0.01, 2.0, 50.0).unwrap().anchored_at(100.0);
        assert!((curve.value(90.0) - curve.value(110.0)).abs() < 1e-12);
        let expected = 1.0 + 0.2 * 10.0 + 0.01 * 100.0 + 2.0 * (-100.0f64 / 50.0).exp();
        assert!((curve.value(90.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_e_is_floored() {
        let params = ParametricParameters::new(0.0, 0.0, 0.0, 1.0, 0.0).unwrap();
        assert!(params.is_e_floored());
        let curve = params.anchored_at(100.0);
        let grid = PriceGrid::new(90.0, 100.0, 3).unwrap();
        let values = curve.values(grid.prices());
        assert!(values.iter().all(|v| v.is_finite()));
        assert_eq!(values[2], 1.0);
        assert_eq!(values[0], 0.0);
    }

    #[test]
    fn test_negative_e_rejected() {
        assert!(matches!(
            ParametricParameters::new(0.0, 0.0, 0.0, 1.0, -50.0),
            Err(LiquidityError::InvalidComponentParameter { component: "parametric", .. })
        ));
        let direct = ParametricParameters { a: 0.0, b: 0.0, c: 0.0, d: 1.0, e: -50.0 };
        assert!(direct.validate().is_err());
        assert!(ParametricParameters::new(0.0, 0.0, 0.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            ParametricParameters::new(0.0, f64::NAN, 0.0, 0.0, 1.0),
            Err(LiquidityError::InvalidComponentParameter { component: "parametric", .. })
        ));
    }
}
