use serde::Serialize;
use tracing::{
    debug,
    info
};

use crate::liquidity::binner::{
    bin_curve,
    BinnedCurve
};
use crate::liquidity::component::componentspec::ComponentSpec;
use crate::liquidity::curvecomposer::{
    compose,
    LiquidityCurve
};
use crate::liquidity::liquidityerror::LiquidityError;
use crate::liquidity::profile::profilerequest::LiquidityProfileRequest;
use crate::liquidity::rangesplitter::{
    check_bounds,
    RangeSplitter
};
use crate::liquidity::side::Side;
use crate::math::grid::pricegrid::PriceGrid;

/// 單側的原始曲線與（選用的）分箱結果。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SideProfile {
    curve: LiquidityCurve,
    #[serde(skip_serializing_if = "Option::is_none")]
    binned: Option<BinnedCurve>
}

impl SideProfile {
    pub fn curve(&self) -> &LiquidityCurve {
        &self.curve
    }

    pub fn binned(&self) -> Option<&BinnedCurve> {
        self.binned.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiquidityProfile {
    reference_price: f64,
    below: SideProfile,
    above: SideProfile
}

impl LiquidityProfile {
    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    pub fn side(&self, side: Side) -> &SideProfile {
        match side {
            Side::Below => &self.below,
            Side::Above => &self.above
        }
    }

    pub fn below(&self) -> &SideProfile {
        &self.below
    }

    pub fn above(&self) -> &SideProfile {
        &self.above
    }
}

fn side_profile(curve: LiquidityCurve, bin_count: Option<usize>) -> Result<SideProfile, LiquidityError> {
    let binned = match bin_count {
        Some(bin_count) => Some(bin_curve(&curve, bin_count)?),
        None => None
    };
    Ok(SideProfile { curve, binned })
}

/// 切分 → 取樣 → 求值 → 加總截斷 → 分箱（選用）。
pub fn generate_profile(request: &LiquidityProfileRequest) -> Result<LiquidityProfile, LiquidityError> {
    request.validate()?;
    let splitter = RangeSplitter::new(request.reference_price(), request.lower(), request.upper())?;
    let (below, above) = splitter.compose(
        request.below(),
        request.above(),
        request.points(),
        request.clamp_nonnegative()
    )?;
    let profile = LiquidityProfile {
        reference_price: request.reference_price(),
        below: side_profile(below, request.bin_count())?,
        above: side_profile(above, request.bin_count())?
    };
    info!(
        reference_price = request.reference_price(),
        lower = request.lower(),
        upper = request.upper(),
        points = request.points(),
        bin_count = ?request.bin_count(),
        "liquidity profile generated"
    );
    Ok(profile)
}

/// 不分側的預設曲線：以參考價格為中心、寬度為 `(upper - lower) / 5`
/// 的單位高斯，取樣於整個 `[lower, upper]`。
pub fn default_gaussian_profile(reference_price: f64,
                                lower: f64,
                                upper: f64,
                                points: usize) -> Result<LiquidityCurve, LiquidityError> {
    check_bounds(reference_price, lower, upper)?;
    let grid = PriceGrid::new(lower, upper, points)?;
    let width = (upper - lower) / 5.0;
    let gauss = ComponentSpec::gauss(1.0, width, reference_price)?;
    debug!(reference_price, width, "default gaussian profile");
    compose(&grid, &[gauss], true)
}
