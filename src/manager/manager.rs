use std::collections::HashMap;

use tracing::debug;

use super::managererror::ManagerError;
use super::namedobject::NamedJsonObject;

pub trait IManager<V> where
    V: Clone {
    fn map(&self) -> &HashMap<String, V>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map()
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::NameNotFoundError(name.to_owned()))
    }

    /// 依名稱排序。
    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ManagerBuilder：載入階段，可寫入
// ─────────────────────────────────────────────────────────────────────────────

pub struct ManagerBuilder<V> {
    map: HashMap<String, V>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}

impl<V> ManagerBuilder<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> ManagerBuilder<V> {
        ManagerBuilder { map: HashMap::new(), get_obj_from_json }
    }

    pub fn insert(&mut self, name: String, obj: V) -> Result<(), ManagerError> {
        if self.map.contains_key(&name) {
            return Err(ManagerError::DuplicatedNameError(name));
        }
        self.map.insert(name, obj);
        Ok(())
    }

    pub fn insert_obj_from_json(&mut self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object = NamedJsonObject::from_json(&json_value)?;
        let obj = (self.get_obj_from_json)(json_value)?;
        debug!(name = named_object.name(), "object registered");
        self.insert(named_object.name().to_owned(), obj)
    }

    pub fn insert_obj_from_json_vec(&mut self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for json_value in json_vec.iter() {
            self.insert_obj_from_json(json_value.clone())?;
        }
        Ok(())
    }

    pub fn build(self) -> Manager<V> {
        Manager { map: self.map }
    }
}

impl<V> IManager<V> for ManagerBuilder<V> where
    V: Clone {
    fn map(&self) -> &HashMap<String, V> {
        &self.map
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Manager：載入完成後不可變，可跨執行緒共享
// ─────────────────────────────────────────────────────────────────────────────

pub struct Manager<V> {
    map: HashMap<String, V>
}

impl<V> IManager<V> for Manager<V> where
    V: Clone {
    fn map(&self) -> &HashMap<String, V> {
        &self.map
    }
}
