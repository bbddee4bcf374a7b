use std::collections::VecDeque;

/// Strafe directions. The intent pair is [forward/back, left/right]; each
/// direction contributes ±1 while held, paired down/up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDir {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveDir {
    /// (strafe index, delta applied on start; the end event subtracts it).
    #[inline]
    pub const fn strafe_delta(self) -> (usize, i32) {
        match self {
            MoveDir::Forward => (0, -1),
            MoveDir::Back => (0, 1),
            MoveDir::Left => (1, -1),
            MoveDir::Right => (1, 1),
        }
    }
}

/// Input-derived intents. Device bindings live outside the core; whatever
/// window layer exists translates raw input into these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    MoveStarted { dir: MoveDir },
    MoveEnded { dir: MoveDir },
    LookChanged { dx: f32, dy: f32 },
    JumpRequested,
    FlightToggled,
    SlotSelected { index: usize },
    BreakRequested,
    PlaceRequested,
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

/// FIFO queue of input intents, stamped with the tick they were emitted on.
pub struct EventQueue {
    pending: VecDeque<EventEnvelope>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        let id = self.alloc_id();
        self.pending.push_back(EventEnvelope {
            id,
            tick: self.now,
            kind,
        });
        id
    }

    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn advance_tick(&mut self) {
        self.now = self.now.wrapping_add(1);
    }
}
