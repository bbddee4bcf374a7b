use scree_blocks::MaterialId;
use scree_geom::Vec3;
use scree_world::{SectorCoord, WorldStore};

use crate::player::Player;

/// Everything the frame driver mutates: the world, the body walking it,
/// and the hotbar the edit events draw from.
pub struct GameState {
    pub tick: u64,
    pub store: WorldStore,
    pub player: Player,
    /// Sector the player was last seen in. `None` until the first tick
    /// computes it; that first assignment materializes the whole scene.
    pub sector: Option<SectorCoord>,
    /// Placeable materials, in slot order. May be empty, which just
    /// disables placement.
    pub hotbar: Vec<MaterialId>,
    pub selected_slot: usize,
}

impl GameState {
    pub fn new(store: WorldStore, hotbar: Vec<MaterialId>, spawn: Vec3) -> Self {
        Self {
            tick: 0,
            store,
            player: Player::new(spawn),
            sector: None,
            hotbar,
            selected_slot: 0,
        }
    }

    pub fn selected_material(&self) -> Option<MaterialId> {
        self.hotbar.get(self.selected_slot).copied()
    }
}
