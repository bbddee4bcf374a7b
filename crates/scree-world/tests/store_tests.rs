use std::sync::Arc;

use scree_blocks::{MaterialCatalog, MaterialId};
use scree_geom::BlockPos;
use scree_world::{Apply, WorldStore, sectorize};

fn store() -> WorldStore {
    WorldStore::new(Arc::new(MaterialCatalog::builtin()))
}

fn mat(store: &WorldStore, key: &str) -> MaterialId {
    store.catalog().get_id(key).unwrap()
}

#[test]
fn add_and_remove_keep_sector_index_in_sync() {
    let mut s = store();
    let grass = mat(&s, "grass");
    let coords = [
        BlockPos::new(0, 0, 0),
        BlockPos::new(17, 4, -3),
        BlockPos::new(-1, 5, -16),
        BlockPos::new(-1, -9, -16),
    ];
    for c in coords {
        s.add_block(c, grass, Apply::Immediate);
    }
    for (c, _) in s.blocks().collect::<Vec<_>>() {
        assert!(s.sector_members(sectorize(c)).contains(&c));
    }
    for (sector, members) in s.sectors() {
        for m in members {
            assert!(s.occupied(*m));
            assert_eq!(sectorize(*m), sector);
        }
    }

    s.remove_block(coords[1], Apply::Immediate);
    assert!(!s.occupied(coords[1]));
    assert!(!s.sector_members(sectorize(coords[1])).contains(&coords[1]));
    assert_eq!(s.block_count(), 3);
}

#[test]
fn isolated_block_is_exposed_and_shown() {
    let mut s = store();
    let brick = mat(&s, "brick");
    let p = BlockPos::new(0, 0, 0);
    s.add_block(p, brick, Apply::Immediate);
    assert!(s.exposed(p));
    assert!(s.is_shown(p));
    assert!(s.mesh(p).is_some());
}

#[test]
fn exposure_scans_all_six_faces() {
    let mut s = store();
    let stone = mat(&s, "stone");
    let center = BlockPos::new(0, 0, 0);
    s.add_block(center, stone, Apply::Immediate);

    // Cover the face that is probed first; the rest stay open
    s.add_block(BlockPos::new(0, 1, 0), stone, Apply::Immediate);
    assert!(s.exposed(center));

    s.add_block(BlockPos::new(1, 0, 0), stone, Apply::Immediate);
    assert!(s.exposed(center));

    // Enclose it completely
    for n in [
        BlockPos::new(0, -1, 0),
        BlockPos::new(-1, 0, 0),
        BlockPos::new(0, 0, 1),
        BlockPos::new(0, 0, -1),
    ] {
        s.add_block(n, stone, Apply::Immediate);
    }
    assert!(!s.exposed(center));
    assert!(!s.is_shown(center));
    assert!(s.mesh(center).is_none());
}

#[test]
fn removal_recheck_reveals_buried_neighbors() {
    let mut s = store();
    let stone = mat(&s, "stone");
    let center = BlockPos::new(0, 0, 0);
    s.add_block(center, stone, Apply::Immediate);
    for n in [
        BlockPos::new(0, 1, 0),
        BlockPos::new(0, -1, 0),
        BlockPos::new(-1, 0, 0),
        BlockPos::new(1, 0, 0),
        BlockPos::new(0, 0, 1),
        BlockPos::new(0, 0, -1),
    ] {
        s.add_block(n, stone, Apply::Immediate);
    }
    assert!(!s.is_shown(center));

    // Opening the lid exposes the center again
    s.remove_block(BlockPos::new(0, 1, 0), Apply::Immediate);
    assert!(s.exposed(center));
    assert!(s.is_shown(center));
    assert!(s.mesh(center).is_some());
}

#[test]
fn remove_then_readd_restores_shown_set() {
    let mut s = store();
    let sand = mat(&s, "sand");
    let cluster = [
        BlockPos::new(0, 0, 0),
        BlockPos::new(1, 0, 0),
        BlockPos::new(-1, 0, 0),
        BlockPos::new(0, 0, 1),
        BlockPos::new(0, 1, 0),
    ];
    for c in cluster {
        s.add_block(c, sand, Apply::Immediate);
    }
    let mut before: Vec<BlockPos> = s.shown().map(|(p, _)| p).collect();
    before.sort_by_key(|p| (p.x, p.y, p.z));

    s.remove_block(BlockPos::new(0, 0, 0), Apply::Immediate);
    s.add_block(BlockPos::new(0, 0, 0), sand, Apply::Immediate);

    let mut after: Vec<BlockPos> = s.shown().map(|(p, _)| p).collect();
    after.sort_by_key(|p| (p.x, p.y, p.z));
    assert_eq!(before, after);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "remove_block at empty")]
fn removing_absent_trips_debug_assertion() {
    let mut s = store();
    s.remove_block(BlockPos::new(5, 5, 5), Apply::Immediate);
}

#[cfg(not(debug_assertions))]
#[test]
fn removing_absent_is_a_safe_noop() {
    let mut s = store();
    let grass = mat(&s, "grass");
    s.add_block(BlockPos::new(0, 0, 0), grass, Apply::Immediate);
    let sectors_before: Vec<_> = s.sectors().map(|(sec, m)| (sec, m.to_vec())).collect();

    assert_eq!(s.remove_block(BlockPos::new(5, 5, 5), Apply::Immediate), None);

    let sectors_after: Vec<_> = s.sectors().map(|(sec, m)| (sec, m.to_vec())).collect();
    assert_eq!(sectors_before, sectors_after);
    assert_eq!(s.block_count(), 1);
}

#[test]
fn deferred_add_has_no_render_side_effect() {
    let mut s = store();
    let grass = mat(&s, "grass");
    let p = BlockPos::new(2, 2, 2);
    s.add_block(p, grass, Apply::Deferred);
    assert!(s.occupied(p));
    assert!(s.sector_members(sectorize(p)).contains(&p));
    assert!(!s.is_shown(p));
    assert!(s.mesh(p).is_none());
    assert_eq!(s.pending_count(), 0);
}

#[test]
fn replacement_is_remove_then_insert() {
    let mut s = store();
    let grass = mat(&s, "grass");
    let brick = mat(&s, "brick");
    let p = BlockPos::new(0, 0, 0);
    s.add_block(p, grass, Apply::Immediate);
    s.add_block(p, brick, Apply::Immediate);
    assert_eq!(s.material_at(p), Some(brick));
    assert_eq!(s.block_count(), 1);
    // The member list holds the coordinate exactly once
    let members = s.sector_members(sectorize(p));
    assert_eq!(members.iter().filter(|m| **m == p).count(), 1);
    assert!(s.is_shown(p));
}

#[test]
fn change_sector_to_itself_enqueues_nothing() {
    let mut s = store();
    let grass = mat(&s, "grass");
    for x in -3..=3 {
        for z in -3..=3 {
            s.add_block(BlockPos::new(x, 0, z), grass, Apply::Deferred);
        }
    }
    let here = sectorize(BlockPos::new(0, 0, 0));
    s.change_sector(Some(here), here);
    assert_eq!(s.pending_count(), 0);
}

#[test]
fn first_change_sector_only_shows() {
    let mut s = store();
    let grass = mat(&s, "grass");
    for x in -3..=3 {
        for z in -3..=3 {
            s.add_block(BlockPos::new(x, 0, z), grass, Apply::Deferred);
        }
    }
    let here = sectorize(BlockPos::new(0, 0, 0));
    s.change_sector(None, here);
    // Membership is synchronous, geometry still pending: every queued op is a show
    assert!(s.pending_count() > 0);
    assert_eq!(s.pending_count(), s.shown_count());
    assert_eq!(s.mesh_count(), 0);

    let applied = s.process_all();
    assert_eq!(applied, s.shown_count());
    assert_eq!(s.mesh_count(), s.shown_count());
    // A flat slab is exposed everywhere
    assert_eq!(s.shown_count(), 49);
}

#[test]
fn fifo_drain_applies_shows_then_hides() {
    let mut s = store();
    let brick = mat(&s, "brick");
    let shown_first = [BlockPos::new(10, 0, 10), BlockPos::new(12, 0, 10)];
    for p in shown_first {
        s.add_block(p, brick, Apply::Immediate);
    }
    let deferred = [
        BlockPos::new(0, 0, 0),
        BlockPos::new(2, 0, 0),
        BlockPos::new(4, 0, 0),
    ];
    for p in deferred {
        s.add_block(p, brick, Apply::Deferred);
        s.show_block(p, Apply::Deferred);
    }
    for p in shown_first {
        s.hide_block(p, Apply::Deferred);
    }
    assert_eq!(s.pending_count(), 5);

    let applied = s.process_all();
    assert_eq!(applied, 5);
    assert_eq!(s.shown_count(), 3);
    for p in deferred {
        assert!(s.is_shown(p));
        assert!(s.mesh(p).is_some());
    }
    for p in shown_first {
        assert!(!s.is_shown(p));
        assert!(s.mesh(p).is_none());
    }
}

#[test]
fn stats_track_the_maps() {
    let mut s = store();
    let grass = mat(&s, "grass");
    s.add_block(BlockPos::new(0, 0, 0), grass, Apply::Immediate);
    s.add_block(BlockPos::new(40, 0, 40), grass, Apply::Deferred);
    let st = s.stats();
    assert_eq!(st.blocks, 2);
    assert_eq!(st.shown, 1);
    assert_eq!(st.meshes, 1);
    assert_eq!(st.sectors, 2);
    assert_eq!(st.pending, 0);
}
