use scree_geom::BlockPos;

/// Blocks per sector along x and z. Sectors are full-height vertical
/// columns, so there is no vertical component.
pub const SECTOR_SIZE: i32 = 16;

/// Radius (in sectors) of the live neighborhood around the player's column.
pub const SECTOR_PAD: i32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SectorCoord {
    pub sx: i32,
    pub sz: i32,
}

impl SectorCoord {
    #[inline]
    pub const fn new(sx: i32, sz: i32) -> Self {
        Self { sx, sz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            sx: self.sx + dx,
            sz: self.sz + dz,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: SectorCoord) -> i64 {
        let dx = i64::from(self.sx - other.sx);
        let dz = i64::from(self.sz - other.sz);
        dx * dx + dz * dz
    }

    /// Sectors within `pad` whose squared distance is at most (pad+1)²,
    /// in fixed dx-then-dz scan order so callers enqueue deterministically.
    pub fn neighborhood(self, pad: i32) -> Vec<SectorCoord> {
        let limit = i64::from(pad + 1) * i64::from(pad + 1);
        let mut out = Vec::new();
        for dx in -pad..=pad {
            for dz in -pad..=pad {
                let s = self.offset(dx, dz);
                if self.distance_sq(s) <= limit {
                    out.push(s);
                }
            }
        }
        out
    }
}

impl From<(i32, i32)> for SectorCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Sector containing a block coordinate: floor division of x and z by the
/// sector size. The y component never contributes.
#[inline]
pub fn sectorize(pos: BlockPos) -> SectorCoord {
    SectorCoord::new(
        pos.x.div_euclid(SECTOR_SIZE),
        pos.z.div_euclid(SECTOR_SIZE),
    )
}
