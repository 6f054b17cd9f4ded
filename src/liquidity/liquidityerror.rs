use thiserror::Error;

/// 流動性引擎的錯誤。
///
/// 所有錯誤皆在偵測點同步回傳，沒有暫時性失敗，因此不需重試。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiquidityError {
    #[error("invalid range: {reason}")]
    InvalidRange { reason: String },

    #[error("reference price {reference_price} is outside [{lower}, {upper}]")]
    OutOfRange {
        reference_price: f64,
        lower: f64,
        upper: f64
    },

    #[error("invalid parameter for {component} component: {reason}")]
    InvalidComponentParameter {
        component: &'static str,
        reason: String
    },

    #[error("composed liquidity at price {price} is not finite")]
    NonFiniteLiquidity { price: f64 }
}

impl LiquidityError {
    pub fn invalid_range(reason: impl Into<String>) -> LiquidityError {
        LiquidityError::InvalidRange { reason: reason.into() }
    }

    pub fn invalid_parameter(component: &'static str, reason: impl Into<String>) -> LiquidityError {
        LiquidityError::InvalidComponentParameter {
            component,
            reason: reason.into()
        }
    }
}
