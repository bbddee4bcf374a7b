use scree_geom::{BlockPos, Face, Vec3};

pub const WALKING_SPEED: f32 = 5.0;
pub const FLYING_SPEED: f32 = 15.0;
/// u/s^2, applied while walking.
pub const GRAVITY: f32 = 21.0;
/// Apex of a jump above the launch height, in blocks.
pub const MAX_JUMP_HEIGHT: f32 = 1.0;
pub const TERMINAL_VELOCITY: f32 = 50.0;
/// Body occupies this many cells stacked downward from the head.
pub const PLAYER_HEIGHT: i32 = 2;
/// Fixed kinematics substeps per frame.
pub const SUBSTEPS: u32 = 8;
/// Frame deltas above this get clamped before subdividing, so a long
/// stall cannot step the body through geometry.
pub const MAX_FRAME_DT: f32 = 0.2;
/// Degrees of rotation per unit of pointer delta.
pub const LOOK_SENSITIVITY: f32 = 0.15;
/// Overlap below this much into a neighboring cell is tolerated; beyond
/// it the body is pushed back to exactly this depth.
pub const COLLIDE_PAD: f32 = 0.25;

/// Launch velocity whose ballistic apex under `GRAVITY` is `MAX_JUMP_HEIGHT`.
#[inline]
pub fn jump_speed() -> f32 {
    (2.0 * GRAVITY * MAX_JUMP_HEIGHT).sqrt()
}

/// First-person body: a position plus orientation, a strafe intent pair,
/// and the vertical velocity the integrator owns. Collision is resolved
/// against whatever occupancy sampler the caller hands to [`Player::update`].
pub struct Player {
    pub position: Vec3,
    /// Heading in degrees, unbounded (wraps visually, never clamped).
    pub yaw: f32,
    /// Degrees, clamped to [-90, 90].
    pub pitch: f32,
    /// Vertical velocity in u/s. Zero means grounded (or hovering in flight).
    pub dy: f32,
    pub flying: bool,
    /// Held-key intent: `[forward/back, left/right]`, each -1, 0 or +1.
    pub strafe: [i32; 2],
}

impl Player {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            yaw: 0.0,
            pitch: 0.0,
            dy: 0.0,
            flying: false,
            strafe: [0, 0],
        }
    }

    /// Unit vector through the crosshair. Yaw 0 faces -z.
    pub fn sight_vector(&self) -> Vec3 {
        let m = self.pitch.to_radians().cos();
        let heading = (self.yaw - 90.0).to_radians();
        Vec3::new(
            heading.cos() * m,
            self.pitch.to_radians().sin(),
            heading.sin() * m,
        )
    }

    /// Direction the strafe pair wants to move, before speed scaling.
    /// Walking keeps it horizontal; flying tilts forward motion by pitch.
    /// Zero when no key is held.
    pub fn motion_vector(&self) -> Vec3 {
        if self.strafe == [0, 0] {
            return Vec3::ZERO;
        }
        // Folding the strafe pair into the heading keeps diagonals at unit speed.
        let strafe_deg = (self.strafe[0] as f32)
            .atan2(self.strafe[1] as f32)
            .to_degrees();
        let heading = (self.yaw + strafe_deg).to_radians();
        if self.flying {
            let pitch = self.pitch.to_radians();
            let mut m = pitch.cos();
            let mut dy = pitch.sin();
            if self.strafe[1] != 0 {
                // Sideways flight stays level.
                dy = 0.0;
                m = 1.0;
            }
            if self.strafe[0] > 0 {
                // Backing up inverts the climb.
                dy = -dy;
            }
            Vec3::new(heading.cos() * m, dy, heading.sin() * m)
        } else {
            Vec3::new(heading.cos(), 0.0, heading.sin())
        }
    }

    /// Apply a pointer delta, scaled by [`LOOK_SENSITIVITY`].
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * LOOK_SENSITIVITY;
        self.pitch = (self.pitch + dy * LOOK_SENSITIVITY).clamp(-90.0, 90.0);
    }

    /// Grounded means dy == 0; collide zeroes it on any floor or ceiling touch.
    pub fn jump(&mut self) {
        if self.dy == 0.0 {
            self.dy = jump_speed();
        }
    }

    pub fn toggle_flight(&mut self) {
        self.flying = !self.flying;
    }

    /// Advance one frame: clamp the delta, then integrate in fixed substeps
    /// so fast vertical motion cannot skip a collision cell.
    pub fn update<F>(&mut self, dt: f32, occupied: &F)
    where
        F: Fn(BlockPos) -> bool,
    {
        let dt = dt.min(MAX_FRAME_DT);
        let step = dt / SUBSTEPS as f32;
        for _ in 0..SUBSTEPS {
            self.substep(step, occupied);
        }
    }

    fn substep<F>(&mut self, dt: f32, occupied: &F)
    where
        F: Fn(BlockPos) -> bool,
    {
        let speed = if self.flying { FLYING_SPEED } else { WALKING_SPEED };
        let mut motion = self.motion_vector() * (speed * dt);
        if !self.flying {
            self.dy -= dt * GRAVITY;
            self.dy = self.dy.max(-TERMINAL_VELOCITY);
            motion.y += self.dy * dt;
        }
        self.position = self.collide(self.position + motion, PLAYER_HEIGHT, occupied);
    }

    /// Resolve a candidate position against the occupancy sampler.
    ///
    /// For each face the anchor cell touches, measure how far the body has
    /// pushed past the cell boundary; past [`COLLIDE_PAD`], probe the cell on
    /// the other side (for every cell of the body column) and push back flush
    /// with the pad. Vertical contact also kills vertical velocity, which is
    /// what makes landing and head bumps stick.
    pub fn collide<F>(&mut self, candidate: Vec3, height: i32, occupied: &F) -> Vec3
    where
        F: Fn(BlockPos) -> bool,
    {
        let mut p = [candidate.x, candidate.y, candidate.z];
        let anchor = BlockPos::from_world(candidate);
        let cell = [anchor.x as f32, anchor.y as f32, anchor.z as f32];
        for face in Face::ALL {
            let axis = face.axis();
            let sign = face.sign() as f32;
            let overlap = (p[axis] - cell[axis]) * sign;
            if overlap < COLLIDE_PAD {
                continue;
            }
            for k in 0..height {
                let probe = anchor.offset(0, -k, 0).neighbor(face);
                if !occupied(probe) {
                    continue;
                }
                p[axis] -= (overlap - COLLIDE_PAD) * sign;
                if face.is_vertical() {
                    self.dy = 0.0;
                }
                break;
            }
        }
        Vec3::new(p[0], p[1], p[2])
    }
}
