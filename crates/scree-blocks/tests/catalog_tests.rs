use proptest::prelude::*;
use scree_blocks::material::MaterialCatalog;
use scree_blocks::{FaceTiles, MaterialId};

#[test]
fn catalog_parses_uniform_and_detailed_entries() {
    let cat = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        sand = [1, 1]
        grass = { top = [1, 0], bottom = [0, 1], side = [0, 0] }
        stone = { top = [2, 1], bottom = [2, 1], side = [2, 1], unbreakable = true }
    "#,
    )
    .unwrap();
    assert_eq!(cat.len(), 3);

    let sand = cat.get(cat.get_id("sand").unwrap()).unwrap();
    assert_eq!(sand.tiles, FaceTiles::uniform((1, 1)));
    assert!(!sand.unbreakable);

    let grass = cat.get(cat.get_id("grass").unwrap()).unwrap();
    assert_eq!(grass.tiles.top, (1, 0));
    assert_eq!(grass.tiles.bottom, (0, 1));
    assert_eq!(grass.tiles.side, (0, 0));

    let stone = cat.get(cat.get_id("stone").unwrap()).unwrap();
    assert!(stone.unbreakable);
}

#[test]
fn id_assignment_ignores_source_order() {
    let a = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        zinc = [0, 0]
        alum = [1, 1]
    "#,
    )
    .unwrap();
    let b = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        alum = [1, 1]
        zinc = [0, 0]
    "#,
    )
    .unwrap();
    assert_eq!(a.get_id("alum"), b.get_id("alum"));
    assert_eq!(a.get_id("zinc"), b.get_id("zinc"));
    assert_eq!(a.get_id("alum"), Some(MaterialId(0)));
}

#[test]
fn builtin_matches_shipped_toml_shape() {
    // The asset file must assign the same ids as the builtin fallback
    let from_toml = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        grass = { top = [1, 0], bottom = [0, 1], side = [0, 0] }
        sand = [1, 1]
        brick = [2, 0]
        stone = { top = [2, 1], bottom = [2, 1], side = [2, 1], unbreakable = true }
    "#,
    )
    .unwrap();
    let builtin = MaterialCatalog::builtin();
    for def in &builtin.materials {
        let other = from_toml.get(from_toml.get_id(&def.key).unwrap()).unwrap();
        assert_eq!(other.id, def.id);
        assert_eq!(other.tiles, def.tiles);
        assert_eq!(other.unbreakable, def.unbreakable);
    }
}

fn key_set() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z]{1,8}", 1..12).prop_map(|s| s.into_iter().collect())
}

proptest! {
    // ids are dense 0..n and by_key agrees with the materials list
    #[test]
    fn ids_are_dense_and_consistent(keys in key_set()) {
        let body: String = keys
            .iter()
            .map(|k| format!("{} = [0, 0]\n", k))
            .collect();
        let cat = MaterialCatalog::from_toml_str(&format!("[materials]\n{}", body)).unwrap();
        prop_assert_eq!(cat.len(), keys.len());
        for (i, def) in cat.materials.iter().enumerate() {
            prop_assert_eq!(def.id, MaterialId(i as u16));
            prop_assert_eq!(cat.get_id(&def.key), Some(def.id));
        }
    }
}
