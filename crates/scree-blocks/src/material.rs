use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Stable index into the catalog's material list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

/// Atlas tile per face group. Tiles index a square texture atlas; the same
/// side tile is used for all four lateral faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceTiles {
    pub top: (u8, u8),
    pub bottom: (u8, u8),
    pub side: (u8, u8),
}

impl FaceTiles {
    #[inline]
    pub const fn uniform(tile: (u8, u8)) -> Self {
        Self {
            top: tile,
            bottom: tile,
            side: tile,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MaterialDef {
    pub id: MaterialId,
    pub key: String,
    pub tiles: FaceTiles,
    pub unbreakable: bool,
}

#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<MaterialDef>,
    pub by_key: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// The stock catalog: the four classic materials with their atlas tiles.
    /// Stone cannot be broken by the player.
    pub fn builtin() -> Self {
        let mut catalog = MaterialCatalog::new();
        catalog.push("brick", FaceTiles::uniform((2, 0)), false);
        catalog.push(
            "grass",
            FaceTiles {
                top: (1, 0),
                bottom: (0, 1),
                side: (0, 0),
            },
            false,
        );
        catalog.push("sand", FaceTiles::uniform((1, 1)), false);
        catalog.push("stone", FaceTiles::uniform((2, 1)), true);
        catalog
    }

    fn push(&mut self, key: &str, tiles: FaceTiles, unbreakable: bool) {
        let id = MaterialId(self.materials.len() as u16);
        self.by_key.insert(key.to_string(), id);
        self.materials.push(MaterialDef {
            id,
            key: key.to_string(),
            tiles,
            unbreakable,
        });
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so MaterialId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let (tiles, unbreakable) = match entry {
                MaterialEntry::Uniform(tile) => (FaceTiles::uniform((tile[0], tile[1])), false),
                MaterialEntry::Detail {
                    top,
                    bottom,
                    side,
                    unbreakable,
                } => (
                    FaceTiles {
                        top: (top[0], top[1]),
                        bottom: (bottom[0], bottom[1]),
                        side: (side[0], side[1]),
                    },
                    unbreakable,
                ),
            };
            catalog.push(&key, tiles, unbreakable);
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct MaterialsConfig {
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: material = [x, y] (one atlas tile for every face)
    Uniform([u8; 2]),
    // Detailed: material = { top = [x, y], bottom = [x, y], side = [x, y], unbreakable = true }
    Detail {
        top: [u8; 2],
        bottom: [u8; 2],
        side: [u8; 2],
        #[serde(default)]
        unbreakable: bool,
    },
}
