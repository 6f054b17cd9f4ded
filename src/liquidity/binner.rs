use serde::{
    Serialize,
    Serializer
};
use tracing::{
    debug,
    warn
};

use crate::liquidity::liquidityerror::LiquidityError;
use crate::math::curve::nonparametriccurve::nonparametriccurve::NonparametricCurve;

// ─────────────────────────────────────────────────────────────────────────────
// BinLiquidity / Bin
// ─────────────────────────────────────────────────────────────────────────────

/// 區間的平均流動性。`NoData` 表示區間內沒有任何取樣點，
/// 與量測值為 0 的 `Mean(0.0)` 不同。序列化時 `NoData` 為 `null`。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BinLiquidity {
    Mean(f64),
    NoData
}

impl BinLiquidity {
    pub fn value(&self) -> Option<f64> {
        match self {
            BinLiquidity::Mean(mean) => Some(*mean),
            BinLiquidity::NoData => None
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, BinLiquidity::NoData)
    }
}

impl Serialize for BinLiquidity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bin {
    lower_edge: f64,
    upper_edge: f64,
    center_price: f64,
    sample_count: usize,
    liquidity: BinLiquidity
}

impl Bin {
    pub fn lower_edge(&self) -> f64 {
        self.lower_edge
    }

    pub fn upper_edge(&self) -> f64 {
        self.upper_edge
    }

    pub fn center_price(&self) -> f64 {
        self.center_price
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn liquidity(&self) -> BinLiquidity {
        self.liquidity
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BinnedCurve {
    bins: Vec<Bin>
}

impl BinnedCurve {
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn empty_bin_count(&self) -> usize {
        self.bins.iter().filter(|bin| bin.liquidity.is_no_data()).count()
    }

    /// `(center_price, mean_liquidity)` 的序列。
    pub fn pairs(&self) -> Vec<(f64, BinLiquidity)> {
        self.bins.iter().map(|bin| (bin.center_price, bin.liquidity)).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// bin_curve
// ─────────────────────────────────────────────────────────────────────────────

/// 第 `k` 條邊界；最後一條邊界固定為 `max_x`，避免累積誤差。
fn bin_edges(min_x: f64, max_x: f64, bin_count: usize) -> Vec<f64> {
    let span = max_x - min_x;
    (0..=bin_count)
        .map(|k| {
            if k == bin_count {
                max_x
            } else {
                min_x + span * (k as f64) / (bin_count as f64)
            }
        })
        .collect()
}

/// 取樣點所屬的區間索引。
///
/// 內部邊界上的點屬於以該邊界為上界的區間，`min_x` 屬於第一個區間：
/// 第一個區間為 `[e0, e1]`，其餘為 `(e_k, e_{k+1}]`。
fn bin_index(x: f64, edges: &[f64]) -> usize {
    let bin_count = edges.len() - 1;
    let min_x = edges[0];
    let width = edges[bin_count] - min_x;
    if !(width > 0.0) || x <= min_x {
        return 0;
    }
    let estimate = ((x - min_x) / width * bin_count as f64).ceil() as usize;
    let mut index = estimate.saturating_sub(1).min(bin_count - 1);
    while index > 0 && x <= edges[index] {
        index -= 1;
    }
    while index < bin_count - 1 && x > edges[index + 1] {
        index += 1;
    }
    index
}

/// 將取樣曲線縮減為 `bin_count` 個等寬區間的平均值。
///
/// 區間劃分 `[min(price), max(price)]`；沒有取樣點的區間回報
/// `BinLiquidity::NoData`。價格非有限值的取樣點不列入任何區間。
pub fn bin_curve<C: NonparametricCurve + ?Sized>(curve: &C, bin_count: usize) -> Result<BinnedCurve, LiquidityError> {
    if bin_count < 1 {
        return Err(LiquidityError::invalid_range("bin count must be at least 1"));
    }
    let (min_x, max_x) = match (curve.min_x(), curve.max_x()) {
        (Some(min_x), Some(max_x)) => (min_x, max_x),
        _ => return Err(LiquidityError::invalid_range("curve has no finite samples to bin"))
    };

    let edges = bin_edges(min_x, max_x, bin_count);
    let mut sums = vec![0.0; bin_count];
    let mut counts = vec![0usize; bin_count];
    for point in curve.points().iter().filter(|pt| pt.x().is_finite()) {
        let index = bin_index(point.x(), &edges);
        sums[index] += point.y();
        counts[index] += 1;
    }

    let bins: Vec<Bin> = (0..bin_count)
        .map(|k| {
            let liquidity = if counts[k] == 0 {
                BinLiquidity::NoData
            } else {
                BinLiquidity::Mean(sums[k] / counts[k] as f64)
            };
            Bin {
                lower_edge: edges[k],
                upper_edge: edges[k + 1],
                center_price: (edges[k] + edges[k + 1]) / 2.0,
                sample_count: counts[k],
                liquidity
            }
        })
        .collect();

    let binned = BinnedCurve { bins };
    let empty = binned.empty_bin_count();
    if empty > 0 {
        warn!(bin_count, empty, "bins without samples reported as no data");
    }
    debug!(bin_count, min_x, max_x, "curve binned");
    Ok(binned)
}
