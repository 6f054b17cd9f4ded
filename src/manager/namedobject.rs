use serde::Deserialize;

use super::managererror::{
    ManagerError,
    parse_json_value
};

/// 只讀取 JSON 物件中的 `name` 欄位，其餘欄位交由各自的解析函式處理。
#[derive(Clone, Debug, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn from_json(json_value: &serde_json::Value) -> Result<NamedJsonObject, ManagerError> {
        parse_json_value(json_value.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
