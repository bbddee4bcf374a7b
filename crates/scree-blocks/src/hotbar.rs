use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::material::{MaterialCatalog, MaterialId};

/// Ordered placeable materials, referenced by catalog key.
#[derive(Clone, Debug, Deserialize)]
pub struct HotbarConfig {
    #[serde(default = "default_slots")]
    pub slots: Vec<String>,
}

fn default_slots() -> Vec<String> {
    vec!["brick".to_string(), "grass".to_string(), "sand".to_string()]
}

impl Default for HotbarConfig {
    fn default() -> Self {
        Self {
            slots: default_slots(),
        }
    }
}

impl HotbarConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, String> {
        let s = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("read {}: {}", path.as_ref().display(), e))?;
        toml::from_str(&s).map_err(|e| format!("parse {}: {}", path.as_ref().display(), e))
    }

    /// Maps slot keys to ids; an unknown key is an error rather than a hole,
    /// since slot indices are selected blind by number.
    pub fn resolve(&self, catalog: &MaterialCatalog) -> Result<Vec<MaterialId>, String> {
        self.slots
            .iter()
            .map(|key| {
                catalog
                    .get_id(key)
                    .ok_or_else(|| format!("hotbar slot references unknown material '{}'", key))
            })
            .collect()
    }
}
