use std::fmt;

use serde::Serialize;

/// 相對於參考價格的子區間。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Below,
    Above
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Below => "below",
            Side::Above => "above"
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
