//! CPU-side cube geometry: vertex positions and atlas UVs, no GPU types.
#![forbid(unsafe_code)]

use scree_blocks::{FaceTiles, MaterialDef};
use scree_geom::{Aabb, BlockPos, Vec3};

/// Tiles per atlas row/column.
pub const ATLAS_TILES: u8 = 4;
/// Half-extent of a block cube.
pub const BLOCK_HALF: f32 = 0.5;
/// Half-extent of the pick-highlight outline, slightly inflated so the
/// wireframe sits outside the block faces.
pub const OUTLINE_HALF: f32 = 0.51;

/// 24 vertices (4 per face), xyz interleaved. Face order: top, bottom,
/// left (-x), right (+x), front (+z), back (-z).
pub fn cube_positions(c: Vec3, n: f32) -> [f32; 72] {
    let (x, y, z) = (c.x, c.y, c.z);
    [
        // top
        x - n, y + n, z - n, x - n, y + n, z + n, x + n, y + n, z + n, x + n, y + n, z - n,
        // bottom
        x - n, y - n, z - n, x + n, y - n, z - n, x + n, y - n, z + n, x - n, y - n, z + n,
        // left
        x - n, y - n, z - n, x - n, y - n, z + n, x - n, y + n, z + n, x - n, y + n, z - n,
        // right
        x + n, y - n, z + n, x + n, y - n, z - n, x + n, y + n, z - n, x + n, y + n, z + n,
        // front
        x - n, y - n, z + n, x + n, y - n, z + n, x + n, y + n, z + n, x - n, y + n, z + n,
        // back
        x + n, y - n, z - n, x - n, y - n, z - n, x - n, y + n, z - n, x + n, y + n, z - n,
    ]
}

/// UV corners of one atlas tile, bottom-left first, counter-clockwise.
pub fn tile_uv(tile: (u8, u8)) -> [f32; 8] {
    let m = 1.0 / ATLAS_TILES as f32;
    let du = tile.0 as f32 * m;
    let dv = tile.1 as f32 * m;
    [du, dv, du + m, dv, du + m, dv + m, du, dv + m]
}

/// UVs for all 24 cube vertices in `cube_positions` face order: the top
/// tile, the bottom tile, then the side tile repeated for all four side
/// faces.
pub fn face_uvs(tiles: FaceTiles) -> [f32; 48] {
    let mut out = [0.0f32; 48];
    out[0..8].copy_from_slice(&tile_uv(tiles.top));
    out[8..16].copy_from_slice(&tile_uv(tiles.bottom));
    let side = tile_uv(tiles.side);
    for face in 2..6 {
        out[face * 8..(face + 1) * 8].copy_from_slice(&side);
    }
    out
}

/// One materialized block: the renderable handle held per shown coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeMesh {
    pub positions: [f32; 72],
    pub uvs: [f32; 48],
}

impl CubeMesh {
    pub fn build(pos: BlockPos, def: &MaterialDef) -> Self {
        Self {
            positions: cube_positions(pos.center(), BLOCK_HALF),
            uvs: face_uvs(def.tiles),
        }
    }

    pub fn bounds(&self) -> Aabb {
        let mut min = Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in self.positions.chunks_exact(3) {
            min.x = min.x.min(v[0]);
            min.y = min.y.min(v[1]);
            min.z = min.z.min(v[2]);
            max.x = max.x.max(v[0]);
            max.y = max.y.max(v[1]);
            max.z = max.z.max(v[2]);
        }
        Aabb::new(min, max)
    }
}

/// Wireframe cube for the pick highlight.
pub fn outline_positions(pos: BlockPos) -> [f32; 72] {
    cube_positions(pos.center(), OUTLINE_HALF)
}
