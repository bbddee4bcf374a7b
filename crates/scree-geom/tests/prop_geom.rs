use proptest::prelude::*;
use scree_geom::{BlockPos, Vec3};

fn small_coord() -> impl Strategy<Value = i32> {
    -100_000..100_000i32
}

fn arb_blockpos() -> impl Strategy<Value = BlockPos> {
    (small_coord(), small_coord(), small_coord()).prop_map(|(x, y, z)| BlockPos::new(x, y, z))
}

// Offsets strictly inside (-0.5, 0.5) so rounding is unambiguous
fn sub_half() -> impl Strategy<Value = f32> {
    (-0.49f32..0.49).prop_map(|v| v)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Any float triple within (-0.5, 0.5) of an integer triple rounds back to it
    #[test]
    fn from_world_round_trips(b in arb_blockpos(), ox in sub_half(), oy in sub_half(), oz in sub_half()) {
        // Stay in the range where f32 represents the coordinate exactly enough
        let p = Vec3::new(
            b.x as f32 + ox,
            b.y as f32 + oy,
            b.z as f32 + oz,
        );
        prop_assert_eq!(BlockPos::from_world(p), b);
    }

    // center() is the fixed point of from_world
    #[test]
    fn center_round_trips(b in arb_blockpos()) {
        prop_assert_eq!(BlockPos::from_world(b.center()), b);
    }

    // offset composes additively
    #[test]
    fn offset_composes(b in arb_blockpos(), dx in -64..64i32, dy in -64..64i32, dz in -64..64i32) {
        let once = b.offset(dx, dy, dz).offset(-dx, -dy, -dz);
        prop_assert_eq!(once, b);
    }

    // a + b - b == a within float tolerance
    #[test]
    fn vec3_add_sub_cancels(a in arb_vec3(), b in arb_vec3()) {
        let c = a + b - b;
        let eps = 1e-2 * (1.0 + a.length().max(b.length()));
        prop_assert!((c - a).length() <= eps);
    }

    // normalized() has unit length for nonzero vectors
    #[test]
    fn normalized_is_unit(a in arb_vec3()) {
        prop_assume!(a.length() > 1e-3);
        let n = a.normalized();
        prop_assert!((n.length() - 1.0).abs() <= 1e-3);
    }
}
