use scree_blocks::MaterialId;
use scree_geom::{BlockPos, Vec3};
use scree_mesh_cpu::outline_positions;
use scree_world::{Apply, WorldStore, sectorize};

use crate::event::{Event, EventEnvelope, EventQueue};
use crate::gamestate::GameState;
use crate::raycast::{self, RayHit};

/// Simulation rate the frame driver targets.
pub const TICKS_PER_SEC: u32 = 60;
/// Hard cap on input events applied per tick. Input is cheap; this only
/// guards against a runaway producer.
const MAX_EVENTS_PER_TICK: usize = 20_000;
/// Deferred world ops applied per tick unless the caller overrides it.
pub const DEFAULT_DRAIN_BUDGET: usize = 256;

/// Counters accumulated across a run, reported at exit.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunStats {
    pub ticks: u64,
    pub events_applied: u64,
    pub ops_drained: u64,
    pub sector_changes: u64,
    pub blocks_broken: u64,
    pub blocks_placed: u64,
}

/// Frame driver. Owns the event queue and the game state and advances them
/// in a fixed order per tick: input, bounded queue drain, sector tracking,
/// then kinematics. A renderer would read `gs.store` and `last_pick` after
/// each step; nothing here depends on one existing.
pub struct App {
    pub gs: GameState,
    pub queue: EventQueue,
    pub drain_budget: usize,
    /// Cell under the crosshair after the latest step, if any. The place
    /// cell rides along for the block outline.
    pub last_pick: Option<RayHit>,
    pub stats: RunStats,
}

impl App {
    pub fn new(store: WorldStore, hotbar: Vec<MaterialId>, spawn: Vec3) -> Self {
        Self {
            gs: GameState::new(store, hotbar, spawn),
            queue: EventQueue::new(),
            drain_budget: DEFAULT_DRAIN_BUDGET,
            last_pick: None,
            stats: RunStats::default(),
        }
    }

    /// Advance one tick of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        // Input intents first so this tick's kinematics see them.
        let mut applied = 0usize;
        while let Some(env) = self.queue.pop_ready() {
            self.handle_event(env);
            applied += 1;
            if applied >= MAX_EVENTS_PER_TICK {
                break;
            }
        }
        self.stats.events_applied += applied as u64;

        // Bounded drain keeps per-tick geometry work flat while edits and
        // sector swaps land over the following frames.
        let drained = self.gs.store.process_budget(self.drain_budget);
        if drained > 0 {
            log::trace!(
                target: "sectors",
                "[tick {}] drained {} deferred ops, {} pending",
                self.gs.tick,
                drained,
                self.gs.store.pending_count()
            );
        }
        self.stats.ops_drained += drained as u64;

        // Sector tracking. The very first assignment has no neighborhood to
        // diff against, so the whole spawn scene gets materialized at once
        // rather than trickling in over budget-sized slices.
        let sector = sectorize(BlockPos::from_world(self.gs.player.position));
        if self.gs.sector != Some(sector) {
            let before = self.gs.sector;
            self.gs.store.change_sector(before, sector);
            if before.is_none() {
                let eager = self.gs.store.process_all();
                self.stats.ops_drained += eager as u64;
                log::info!(
                    target: "sectors",
                    "[tick {}] entered {:?}: materialized {} ops",
                    self.gs.tick,
                    sector,
                    eager
                );
            }
            self.gs.sector = Some(sector);
            self.stats.sector_changes += 1;
        }

        // Kinematics last, against the occupancy that exists now.
        {
            let GameState { player, store, .. } = &mut self.gs;
            let occupied = |pos: BlockPos| store.occupied(pos);
            player.update(dt, &occupied);
        }

        self.last_pick = self.pick_target();

        self.gs.tick = self.gs.tick.wrapping_add(1);
        self.queue.advance_tick();
        self.stats.ticks += 1;
    }

    fn handle_event(&mut self, env: EventEnvelope) {
        Self::log_event(self.gs.tick, &env.kind);
        match env.kind {
            Event::MoveStarted { dir } => {
                let (axis, delta) = dir.strafe_delta();
                self.gs.player.strafe[axis] += delta;
            }
            Event::MoveEnded { dir } => {
                let (axis, delta) = dir.strafe_delta();
                self.gs.player.strafe[axis] -= delta;
            }
            Event::LookChanged { dx, dy } => self.gs.player.look(dx, dy),
            Event::JumpRequested => self.gs.player.jump(),
            Event::FlightToggled => self.gs.player.toggle_flight(),
            Event::SlotSelected { index } => {
                if !self.gs.hotbar.is_empty() {
                    self.gs.selected_slot = index % self.gs.hotbar.len();
                }
            }
            Event::BreakRequested => {
                if self.break_block() {
                    self.stats.blocks_broken += 1;
                }
            }
            Event::PlaceRequested => {
                if self.place_block() {
                    self.stats.blocks_placed += 1;
                }
            }
        }
    }

    /// Ray through the crosshair against current occupancy.
    fn pick_target(&self) -> Option<RayHit> {
        let player = &self.gs.player;
        let store = &self.gs.store;
        raycast::pick(
            player.position,
            player.sight_vector(),
            raycast::DEFAULT_REACH,
            |pos| store.occupied(pos),
        )
    }

    /// Highlight geometry for the targeted block, ready for the renderer.
    pub fn pick_outline(&self) -> Option<[f32; 72]> {
        self.last_pick.map(|hit| outline_positions(hit.hit))
    }

    /// Remove the block under the crosshair. Edits apply immediately; the
    /// deferred queue is for bulk work, not player actions.
    fn break_block(&mut self) -> bool {
        let Some(target) = self.pick_target() else {
            return false;
        };
        let Some(material) = self.gs.store.material_at(target.hit) else {
            return false;
        };
        let unbreakable = self
            .gs
            .store
            .catalog()
            .get(material)
            .map(|def| def.unbreakable)
            .unwrap_or(false);
        if unbreakable {
            log::debug!(
                target: "events",
                "[tick {}] break refused, {:?} is unbreakable",
                self.gs.tick,
                target.hit
            );
            return false;
        }
        self.gs.store.remove_block(target.hit, Apply::Immediate);
        true
    }

    /// Place the selected material in the cell the crosshair ray crossed
    /// just before its hit. No hit, no entry cell, or an empty hotbar all
    /// make this a no-op.
    fn place_block(&mut self) -> bool {
        let Some(target) = self.pick_target() else {
            return false;
        };
        let Some(cell) = target.previous else {
            return false;
        };
        let Some(material) = self.gs.selected_material() else {
            return false;
        };
        self.gs.store.add_block(cell, material, Apply::Immediate);
        true
    }

    fn log_event(tick: u64, ev: &Event) {
        match ev {
            Event::MoveStarted { dir } => {
                log::trace!(target: "events", "[tick {}] MoveStarted {:?}", tick, dir)
            }
            Event::MoveEnded { dir } => {
                log::trace!(target: "events", "[tick {}] MoveEnded {:?}", tick, dir)
            }
            Event::LookChanged { dx, dy } => {
                log::trace!(target: "events", "[tick {}] LookChanged dx={:.1} dy={:.1}", tick, dx, dy)
            }
            Event::JumpRequested => {
                log::debug!(target: "events", "[tick {}] JumpRequested", tick)
            }
            Event::FlightToggled => {
                log::info!(target: "events", "[tick {}] FlightToggled", tick)
            }
            Event::SlotSelected { index } => {
                log::debug!(target: "events", "[tick {}] SlotSelected {}", tick, index)
            }
            Event::BreakRequested => {
                log::info!(target: "events", "[tick {}] BreakRequested", tick)
            }
            Event::PlaceRequested => {
                log::info!(target: "events", "[tick {}] PlaceRequested", tick)
            }
        }
    }
}
