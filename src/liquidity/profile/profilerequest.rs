use serde::Serialize;

use crate::liquidity::liquidityerror::LiquidityError;
use crate::liquidity::rangesplitter::SideSpec;
use crate::math::grid::pricegrid::DEFAULT_POINTS;

/// 產生一組流動性曲線所需的全部輸入。建立後不可變，引擎本身不持有狀態。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiquidityProfileRequest {
    reference_price: f64,
    lower: f64,
    upper: f64,
    points: usize,
    bin_count: Option<usize>,
    clamp_nonnegative: bool,
    below: SideSpec,
    above: SideSpec
}

impl LiquidityProfileRequest {
    pub fn new(reference_price: f64,
               lower: f64,
               upper: f64,
               below: SideSpec,
               above: SideSpec) -> LiquidityProfileRequest {
        LiquidityProfileRequest {
            reference_price,
            lower,
            upper,
            points: DEFAULT_POINTS,
            bin_count: None,
            clamp_nonnegative: true,
            below,
            above
        }
    }

    pub fn with_points(mut self, points: usize) -> LiquidityProfileRequest {
        self.points = points;
        self
    }

    pub fn with_bin_count(mut self, bin_count: Option<usize>) -> LiquidityProfileRequest {
        self.bin_count = bin_count;
        self
    }

    pub fn with_clamp_nonnegative(mut self, clamp_nonnegative: bool) -> LiquidityProfileRequest {
        self.clamp_nonnegative = clamp_nonnegative;
        self
    }

    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn bin_count(&self) -> Option<usize> {
        self.bin_count
    }

    pub fn clamp_nonnegative(&self) -> bool {
        self.clamp_nonnegative
    }

    pub fn below(&self) -> &SideSpec {
        &self.below
    }

    pub fn above(&self) -> &SideSpec {
        &self.above
    }

    /// 價格必須為正的有限值，`lower < upper`，且參考價格落在 `[lower, upper]`。
    pub fn validate(&self) -> Result<(), LiquidityError> {
        for (name, value) in [("lower", self.lower), ("upper", self.upper)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LiquidityError::invalid_range(
                    format!("{} must be a positive finite price, got {}", name, value)
                ));
            }
        }
        if self.lower >= self.upper {
            return Err(LiquidityError::invalid_range(
                format!("lower {} must be less than upper {}", self.lower, self.upper)
            ));
        }
        if !(self.reference_price >= self.lower && self.reference_price <= self.upper) {
            return Err(LiquidityError::OutOfRange {
                reference_price: self.reference_price,
                lower: self.lower,
                upper: self.upper
            });
        }
        if self.points < 1 {
            return Err(LiquidityError::invalid_range("points per side must be at least 1"));
        }
        if self.bin_count == Some(0) {
            return Err(LiquidityError::invalid_range("bin count must be at least 1"));
        }
        self.below.validate()?;
        self.above.validate()?;
        Ok(())
    }
}
