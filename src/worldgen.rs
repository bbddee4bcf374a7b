use std::path::Path;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use scree_blocks::MaterialId;
use scree_geom::BlockPos;
use scree_world::{Apply, WorldStore};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Bounded slab with a rim wall and scattered tapered hills.
    Classic,
    /// Open-simplex heightmap terrain.
    Rolling,
}

fn default_mode() -> Mode {
    Mode::Classic
}
fn default_extent() -> i32 {
    80
}
fn default_seed() -> u64 {
    42
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    /// Half-width of the generated square, in blocks.
    #[serde(default = "default_extent")]
    pub extent: i32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub hills: HillsConfig,
    #[serde(default)]
    pub rolling: RollingConfig,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            extent: default_extent(),
            seed: default_seed(),
            hills: HillsConfig::default(),
            rolling: RollingConfig::default(),
        }
    }
}

fn default_hill_count() -> u32 {
    120
}
fn default_hill_base() -> i32 {
    -1
}
fn default_hill_min_height() -> i32 {
    1
}
fn default_hill_max_height() -> i32 {
    6
}
fn default_hill_min_side() -> i32 {
    4
}
fn default_hill_max_side() -> i32 {
    8
}
fn default_hill_taper() -> i32 {
    1
}
fn default_spawn_clearance() -> i32 {
    5
}

#[derive(Clone, Debug, Deserialize)]
pub struct HillsConfig {
    #[serde(default = "default_hill_count")]
    pub count: u32,
    /// Lowest layer of every hill, one above the ground slab.
    #[serde(default = "default_hill_base")]
    pub base_y: i32,
    #[serde(default = "default_hill_min_height")]
    pub min_height: i32,
    #[serde(default = "default_hill_max_height")]
    pub max_height: i32,
    #[serde(default = "default_hill_min_side")]
    pub min_side: i32,
    #[serde(default = "default_hill_max_side")]
    pub max_side: i32,
    /// Radius lost per layer climbed.
    #[serde(default = "default_hill_taper")]
    pub taper: i32,
    /// Hills keep out of the column where x² + z² < clearance².
    #[serde(default = "default_spawn_clearance")]
    pub spawn_clearance: i32,
}

impl Default for HillsConfig {
    fn default() -> Self {
        Self {
            count: default_hill_count(),
            base_y: default_hill_base(),
            min_height: default_hill_min_height(),
            max_height: default_hill_max_height(),
            min_side: default_hill_min_side(),
            max_side: default_hill_max_side(),
            taper: default_hill_taper(),
            spawn_clearance: default_spawn_clearance(),
        }
    }
}

fn default_roll_frequency() -> f32 {
    0.02
}
fn default_roll_amplitude() -> f32 {
    6.0
}
fn default_roll_sand_below() -> i32 {
    -1
}
fn default_roll_floor() -> i32 {
    -3
}

#[derive(Clone, Debug, Deserialize)]
pub struct RollingConfig {
    #[serde(default = "default_roll_frequency")]
    pub frequency: f32,
    /// Height span of the surface above the floor, in blocks.
    #[serde(default = "default_roll_amplitude")]
    pub amplitude: f32,
    /// Surfaces at or below this height get sand instead of grass.
    #[serde(default = "default_roll_sand_below")]
    pub sand_below: i32,
    #[serde(default = "default_roll_floor")]
    pub floor_y: i32,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            frequency: default_roll_frequency(),
            amplitude: default_roll_amplitude(),
            sand_below: default_roll_sand_below(),
            floor_y: default_roll_floor(),
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("read {}: {}", path.display(), e))?;
    toml::from_str(&text).map_err(|e| format!("parse {}: {}", path.display(), e))
}

/// Material ids the generators place, resolved up front so a bad catalog
/// fails before any block lands.
struct Palette {
    grass: MaterialId,
    sand: MaterialId,
    brick: MaterialId,
    stone: MaterialId,
}

fn palette(store: &WorldStore) -> Result<Palette, String> {
    let get = |key: &str| {
        store
            .catalog()
            .get_id(key)
            .ok_or_else(|| format!("worldgen needs material '{}' in the catalog", key))
    };
    Ok(Palette {
        grass: get("grass")?,
        sand: get("sand")?,
        brick: get("brick")?,
        stone: get("stone")?,
    })
}

/// Populate an empty store. Every write is deferred, so nothing becomes
/// visible until the caller's first sector assignment drains the queue.
/// Returns the number of blocks added.
pub fn generate(store: &mut WorldStore, cfg: &WorldGenConfig) -> Result<usize, String> {
    let before = store.block_count();
    let p = palette(store)?;
    match cfg.mode {
        Mode::Classic => generate_classic(store, cfg, &p),
        Mode::Rolling => generate_rolling(store, cfg, &p),
    }
    Ok(store.block_count() - before)
}

fn generate_classic(store: &mut WorldStore, cfg: &WorldGenConfig, p: &Palette) {
    let n = cfg.extent;
    for x in -n..=n {
        for z in -n..=n {
            store.add_block(BlockPos::new(x, -2, z), p.grass, Apply::Deferred);
            store.add_block(BlockPos::new(x, -3, z), p.stone, Apply::Deferred);
            if x == -n || x == n || z == -n || z == n {
                // Rim wall keeps the player from walking off the slab.
                for y in -2..3 {
                    store.add_block(BlockPos::new(x, y, z), p.stone, Apply::Deferred);
                }
            }
        }
    }

    let hills = &cfg.hills;
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let margin = (n - 10).max(0);
    let clearance_sq = hills.spawn_clearance * hills.spawn_clearance;
    for _ in 0..hills.count {
        let a = rng.gen_range(-margin..=margin);
        let b = rng.gen_range(-margin..=margin);
        let h = rng.gen_range(hills.min_height..=hills.max_height);
        let mut s = rng.gen_range(hills.min_side..=hills.max_side);
        let material = match rng.gen_range(0..3) {
            0 => p.grass,
            1 => p.sand,
            _ => p.brick,
        };
        for y in hills.base_y..hills.base_y + h {
            for x in (a - s)..=(a + s) {
                for z in (b - s)..=(b + s) {
                    if (x - a).pow(2) + (z - b).pow(2) > (s + 1).pow(2) {
                        continue;
                    }
                    if x * x + z * z < clearance_sq {
                        continue;
                    }
                    store.add_block(BlockPos::new(x, y, z), material, Apply::Deferred);
                }
            }
            s -= hills.taper;
        }
    }
}

fn generate_rolling(store: &mut WorldStore, cfg: &WorldGenConfig, p: &Palette) {
    let mut noise = FastNoiseLite::with_seed(cfg.seed as i32);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(cfg.rolling.frequency));

    let n = cfg.extent;
    let r = &cfg.rolling;
    for x in -n..=n {
        for z in -n..=n {
            let h = noise.get_noise_2d(x as f32, z as f32);
            // Map [-1, 1] onto [floor_y + 1, floor_y + 1 + amplitude].
            let surface = r.floor_y + 1 + ((h + 1.0) * 0.5 * r.amplitude) as i32;
            for y in r.floor_y..=surface {
                let material = if y == surface {
                    if surface <= r.sand_below { p.sand } else { p.grass }
                } else {
                    p.stone
                };
                store.add_block(BlockPos::new(x, y, z), material, Apply::Deferred);
            }
        }
    }
}
