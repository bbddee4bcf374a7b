use scree_geom::{BlockPos, Vec3};

/// Micro-steps per block of reach. Coarser and the ray can clip block
/// corners; finer buys nothing at pick distances.
pub const STEPS_PER_BLOCK: i32 = 8;
/// Default pick range in blocks.
pub const DEFAULT_REACH: i32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayHit {
    /// First occupied cell along the ray.
    pub hit: BlockPos,
    /// Last empty cell crossed before the hit. `None` when the ray starts
    /// inside the hit cell, in which case there is nowhere to place.
    pub previous: Option<BlockPos>,
}

/// March from `origin` along `direction` in increments of 1/8 block,
/// returning the first occupied cell and the cell in front of it.
///
/// The origin's own cell is tested before the first step, so a camera
/// buried in a block reports that block with no `previous`.
pub fn pick<F>(origin: Vec3, direction: Vec3, max_distance: i32, mut occupied: F) -> Option<RayHit>
where
    F: FnMut(BlockPos) -> bool,
{
    let step = direction / STEPS_PER_BLOCK as f32;
    let mut p = origin;
    let mut previous: Option<BlockPos> = None;
    for _ in 0..max_distance * STEPS_PER_BLOCK {
        let key = BlockPos::from_world(p);
        if previous != Some(key) && occupied(key) {
            return Some(RayHit { hit: key, previous });
        }
        previous = Some(key);
        p += step;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const DOWN: Vec3 = Vec3::new(0.0, -1.0, 0.0);

    #[test]
    fn straight_down_reports_hit_and_entry_cell() {
        let mut solid = HashSet::new();
        solid.insert(BlockPos::new(0, 0, 0));
        let hit = pick(Vec3::new(0.0, 5.0, 0.0), DOWN, DEFAULT_REACH, |p| {
            solid.contains(&p)
        })
        .expect("block within reach");
        assert_eq!(hit.hit, BlockPos::new(0, 0, 0));
        assert_eq!(hit.previous, Some(BlockPos::new(0, 1, 0)));
    }

    #[test]
    fn empty_world_misses() {
        assert!(pick(Vec3::ZERO, DOWN, DEFAULT_REACH, |_| false).is_none());
    }

    #[test]
    fn reach_bounds_the_march() {
        let in_range = BlockPos::new(0, -8, 0);
        let beyond = BlockPos::new(0, -9, 0);

        let hit = pick(Vec3::ZERO, DOWN, 8, |p| p == in_range).expect("inside reach");
        assert_eq!(hit.hit, in_range);

        assert!(pick(Vec3::ZERO, DOWN, 8, |p| p == beyond).is_none());
    }

    #[test]
    fn starting_inside_a_block_has_no_previous() {
        let hit = pick(
            Vec3::new(0.1, 0.2, -0.1),
            DOWN,
            DEFAULT_REACH,
            |p| p == BlockPos::new(0, 0, 0),
        )
        .expect("origin cell counts");
        assert_eq!(hit.hit, BlockPos::new(0, 0, 0));
        assert_eq!(hit.previous, None);
    }

    #[test]
    fn horizontal_ray_enters_a_wall_face_on() {
        let hit = pick(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), DEFAULT_REACH, |p| {
            p.x >= 3
        })
        .expect("wall within reach");
        assert_eq!(hit.hit, BlockPos::new(3, 0, 0));
        assert_eq!(hit.previous, Some(BlockPos::new(2, 0, 0)));
    }
}
