use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::liquidity::liquidityerror::LiquidityError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),

    #[error("key '{0}' not found")]
    NameNotFoundError(String),

    #[error("key '{0}' already registered")]
    DuplicatedNameError(String),

    #[error(transparent)]
    LiquidityError(#[from] LiquidityError)
}

pub fn parse_json_value<T: DeserializeOwned>(json_value: serde_json::Value) -> Result<T, ManagerError> {
    serde_json::from_value(json_value).map_err(ManagerError::JsonParseError)
}
