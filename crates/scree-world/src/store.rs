use std::sync::Arc;

use hashbrown::HashMap;

use scree_blocks::{MaterialCatalog, MaterialId};
use scree_geom::{BlockPos, Face};
use scree_mesh_cpu::CubeMesh;

use crate::queue::{DeferredQueue, PendingOp};
use crate::sector::{SECTOR_PAD, SectorCoord, sectorize};

/// Whether a mutation's rendering side effect happens now or goes through
/// the deferred queue. The block/sector maps update synchronously either
/// way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Apply {
    Immediate,
    Deferred,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct WorldStats {
    pub blocks: usize,
    pub shown: usize,
    pub meshes: usize,
    pub sectors: usize,
    pub pending: usize,
}

/// Authoritative block map plus the sector index, shown set, and geometry
/// handles derived from it.
pub struct WorldStore {
    catalog: Arc<MaterialCatalog>,
    blocks: HashMap<BlockPos, MaterialId>,
    // Sector membership lists; removal is an O(members) scan
    sectors: HashMap<SectorCoord, Vec<BlockPos>>,
    // Membership is synchronous; geometry in `meshes` may lag via the queue
    shown: HashMap<BlockPos, MaterialId>,
    meshes: HashMap<BlockPos, CubeMesh>,
    queue: DeferredQueue,
}

impl WorldStore {
    pub fn new(catalog: Arc<MaterialCatalog>) -> Self {
        Self {
            catalog,
            blocks: HashMap::new(),
            sectors: HashMap::new(),
            shown: HashMap::new(),
            meshes: HashMap::new(),
            queue: DeferredQueue::new(),
        }
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            blocks: self.blocks.len(),
            shown: self.shown.len(),
            meshes: self.meshes.len(),
            sectors: self.sectors.len(),
            pending: self.queue.len(),
        }
    }

    // --- Occupancy ---

    #[inline]
    pub fn occupied(&self, pos: BlockPos) -> bool {
        self.blocks.contains_key(&pos)
    }

    #[inline]
    pub fn material_at(&self, pos: BlockPos) -> Option<MaterialId> {
        self.blocks.get(&pos).copied()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockPos, MaterialId)> + '_ {
        self.blocks.iter().map(|(p, m)| (*p, *m))
    }

    // --- Sector index ---

    pub fn sector_members(&self, sector: SectorCoord) -> &[BlockPos] {
        self.sectors.get(&sector).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sectors(&self) -> impl Iterator<Item = (SectorCoord, &[BlockPos])> + '_ {
        self.sectors.iter().map(|(s, m)| (*s, m.as_slice()))
    }

    // --- Shown set / renderer contract ---

    #[inline]
    pub fn is_shown(&self, pos: BlockPos) -> bool {
        self.shown.contains_key(&pos)
    }

    pub fn shown_count(&self) -> usize {
        self.shown.len()
    }

    pub fn shown(&self) -> impl Iterator<Item = (BlockPos, MaterialId)> + '_ {
        self.shown.iter().map(|(p, m)| (*p, *m))
    }

    pub fn mesh(&self, pos: BlockPos) -> Option<&CubeMesh> {
        self.meshes.get(&pos)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn meshes(&self) -> impl Iterator<Item = (BlockPos, &CubeMesh)> + '_ {
        self.meshes.iter().map(|(p, m)| (*p, m))
    }

    // --- Mutation ---

    /// Inserts a block, replacing any occupant first (remove-then-insert,
    /// never a merge). Immediate application shows the block when exposed
    /// and re-checks all six neighbors; deferred application has no
    /// rendering side effect at all.
    pub fn add_block(&mut self, pos: BlockPos, material: MaterialId, apply: Apply) {
        if self.blocks.contains_key(&pos) {
            self.remove_block(pos, apply);
        }
        self.blocks.insert(pos, material);
        self.sectors.entry(sectorize(pos)).or_default().push(pos);
        if apply == Apply::Immediate {
            if self.exposed(pos) {
                self.show_block(pos, Apply::Immediate);
            }
            self.check_neighbors(pos);
        }
    }

    /// Removes a block. Calling this for an unoccupied coordinate is a
    /// precondition violation: it trips a debug assertion, and in release
    /// it returns None leaving the sector index untouched.
    pub fn remove_block(&mut self, pos: BlockPos, apply: Apply) -> Option<MaterialId> {
        let material = self.blocks.remove(&pos);
        debug_assert!(material.is_some(), "remove_block at empty {:?}", pos);
        let material = material?;

        let sector = sectorize(pos);
        if let Some(members) = self.sectors.get_mut(&sector) {
            if let Some(i) = members.iter().position(|m| *m == pos) {
                members.remove(i);
            }
            if members.is_empty() {
                self.sectors.remove(&sector);
            }
        }

        if apply == Apply::Immediate {
            if self.shown.contains_key(&pos) {
                self.hide_block(pos, Apply::Immediate);
            }
            self.check_neighbors(pos);
        }
        Some(material)
    }

    // --- Exposure ---

    /// A block is exposed when any of its six axis-aligned neighbors is
    /// absent. All six faces are scanned; an isolated block is exposed, a
    /// fully enclosed one is not.
    pub fn exposed(&self, pos: BlockPos) -> bool {
        Face::ALL
            .iter()
            .any(|face| !self.blocks.contains_key(&pos.neighbor(*face)))
    }

    /// Re-evaluates each occupied neighbor of `pos` and shows or hides it
    /// to match its current exposure. Runs immediately; this is what keeps
    /// the shown set equal to the world surface after an edit.
    pub fn check_neighbors(&mut self, pos: BlockPos) {
        for face in Face::ALL {
            let key = pos.neighbor(face);
            if !self.blocks.contains_key(&key) {
                continue;
            }
            if self.exposed(key) {
                if !self.shown.contains_key(&key) {
                    self.show_block(key, Apply::Immediate);
                }
            } else if self.shown.contains_key(&key) {
                self.hide_block(key, Apply::Immediate);
            }
        }
    }

    // --- Show / hide ---

    /// Marks a block shown. Membership updates now; the geometry handle is
    /// built now or queued per `apply`.
    pub fn show_block(&mut self, pos: BlockPos, apply: Apply) {
        let Some(material) = self.blocks.get(&pos).copied() else {
            debug_assert!(false, "show_block at empty {:?}", pos);
            return;
        };
        self.shown.insert(pos, material);
        match apply {
            Apply::Immediate => self.materialize(pos, material),
            Apply::Deferred => self.queue.push(PendingOp::Show(pos, material)),
        }
    }

    /// Marks a block hidden. Membership updates now; the geometry handle is
    /// dropped now or queued per `apply`.
    pub fn hide_block(&mut self, pos: BlockPos, apply: Apply) {
        self.shown.remove(&pos);
        match apply {
            Apply::Immediate => {
                self.meshes.remove(&pos);
            }
            Apply::Deferred => self.queue.push(PendingOp::Hide(pos)),
        }
    }

    fn materialize(&mut self, pos: BlockPos, material: MaterialId) {
        let Some(def) = self.catalog.get(material) else {
            debug_assert!(false, "material {:?} not in catalog", material);
            return;
        };
        self.meshes.insert(pos, CubeMesh::build(pos, def));
    }

    // --- Sector visibility ---

    /// Queues deferred shows for every member that is exposed and not yet
    /// shown. Returns the number queued.
    pub fn show_sector(&mut self, sector: SectorCoord) -> usize {
        let candidates: Vec<BlockPos> = self
            .sector_members(sector)
            .iter()
            .copied()
            .filter(|pos| !self.shown.contains_key(pos) && self.exposed(*pos))
            .collect();
        for pos in &candidates {
            self.show_block(*pos, Apply::Deferred);
        }
        candidates.len()
    }

    /// Queues deferred hides for every shown member. Returns the number
    /// queued.
    pub fn hide_sector(&mut self, sector: SectorCoord) -> usize {
        let candidates: Vec<BlockPos> = self
            .sector_members(sector)
            .iter()
            .copied()
            .filter(|pos| self.shown.contains_key(pos))
            .collect();
        for pos in &candidates {
            self.hide_block(*pos, Apply::Deferred);
        }
        candidates.len()
    }

    /// Shows sectors that entered the pad-radius disk around the player's
    /// column and hides the ones that left it. A None `before` (first
    /// assignment) only shows.
    pub fn change_sector(&mut self, before: Option<SectorCoord>, after: SectorCoord) {
        let before_set: Vec<SectorCoord> = before
            .map(|s| s.neighborhood(SECTOR_PAD))
            .unwrap_or_default();
        let after_set = after.neighborhood(SECTOR_PAD);

        let mut queued_shows = 0usize;
        let mut queued_hides = 0usize;
        for s in &after_set {
            if !before_set.contains(s) {
                queued_shows += self.show_sector(*s);
            }
        }
        for s in &before_set {
            if !after_set.contains(s) {
                queued_hides += self.hide_sector(*s);
            }
        }
        log::trace!(
            target: "sectors",
            "change_sector {:?} -> {:?}: queued {} shows, {} hides",
            before,
            after,
            queued_shows,
            queued_hides
        );
    }

    // --- Deferred queue ---

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Applies the oldest pending op, if any.
    pub fn process_one(&mut self) -> bool {
        match self.queue.pop() {
            Some(op) => {
                self.apply_op(op);
                true
            }
            None => false,
        }
    }

    /// Applies at most `budget` pending ops; returns how many were applied.
    pub fn process_budget(&mut self, budget: usize) -> usize {
        let mut applied = 0;
        while applied < budget && self.process_one() {
            applied += 1;
        }
        applied
    }

    /// Drains the whole queue. Used once when the player's sector first
    /// becomes known, so the initial scene is complete before the first
    /// draw.
    pub fn process_all(&mut self) -> usize {
        let mut applied = 0;
        while self.process_one() {
            applied += 1;
        }
        applied
    }

    fn apply_op(&mut self, op: PendingOp) {
        match op {
            PendingOp::Show(pos, material) => {
                // Stale if hidden or replaced since enqueue; FIFO means the
                // newest op for the coordinate already decided the outcome.
                if self.shown.get(&pos) == Some(&material) {
                    self.materialize(pos, material);
                }
            }
            PendingOp::Hide(pos) => {
                // Stale if re-shown since enqueue
                if !self.shown.contains_key(&pos) {
                    self.meshes.remove(&pos);
                }
            }
        }
    }
}
