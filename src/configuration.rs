use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::liquidity::profile::profilegenerator::{
    generate_profile,
    LiquidityProfile
};
use crate::liquidity::profile::profilemanager::ProfileManager;
use crate::liquidity::profile::profilerequest::LiquidityProfileRequest;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    profile: Vec<serde_json::Value>
}

/// 由 JSON 設定檔載入的具名流動性曲線請求。載入後不可變。
pub struct Configuration {
    profile_manager: Manager<Arc<LiquidityProfileRequest>>
}

impl Configuration {
    pub fn from_json(json_value: serde_json::Value) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = parse_json_value(json_value)?;
        let mut profile_manager = ProfileManager::new();
        profile_manager.insert_obj_from_json_vec(&json_prop.profile)?;
        Ok(Configuration { profile_manager: profile_manager.build() })
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Configuration, ManagerError> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        let configuration = Configuration::from_json(json_value)?;
        info!(
            path = %file_path.display(),
            profiles = configuration.profile_manager.map().len(),
            "configuration loaded"
        );
        Ok(configuration)
    }

    pub fn profile_manager(&self) -> &Manager<Arc<LiquidityProfileRequest>> {
        &self.profile_manager
    }

    pub fn generate(&self, name: &str) -> Result<LiquidityProfile, ManagerError> {
        let request = self.profile_manager.get(name)?;
        Ok(generate_profile(&request)?)
    }
}
