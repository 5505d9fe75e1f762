#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use octart::{AdaptiveRadixTree, DuplicatePolicy, TreeConfig};

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: u64 },
    Insert { key: u64, val: usize },
    InsertKeep { key: u64, val: usize },
    Update { key: u64, val: usize },
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut art = AdaptiveRadixTree::<usize>::new();
    let mut keep_art = AdaptiveRadixTree::<usize>::with_config(
        TreeConfig::default().with_duplicate_policy(DuplicatePolicy::KeepExisting),
    );
    let mut bt_map = BTreeMap::<u64, usize>::new();
    let mut keep_bt_map = BTreeMap::<u64, usize>::new();

    for m in &methods {
        match m {
            MapMethod::Get { key } => {
                let art_v = art.get(*key).copied();
                let bt_v = bt_map.get(key).copied();
                assert_eq!(art_v, bt_v);
            }
            MapMethod::Insert { key, val } => {
                let btree_insert = bt_map.insert(*key, *val);
                let a_insert = art.insert(*key, *val);
                eprintln!("Insert: {:?} {:?} {:?}", key, val, a_insert);
                assert_eq!(a_insert, btree_insert);
            }
            MapMethod::InsertKeep { key, val } => {
                let expected = match keep_bt_map.get(key) {
                    Some(_) => Some(*val),
                    None => {
                        keep_bt_map.insert(*key, *val);
                        None
                    }
                };
                let a_insert = keep_art.insert(*key, *val);
                eprintln!("InsertKeep: {:?} {:?} {:?}", key, val, a_insert);
                assert_eq!(a_insert, expected);
            }
            MapMethod::Update { key, val } => {
                let old_bt = bt_map.get_mut(key);
                let old_art = art.get_mut(*key);
                assert_eq!(old_art, old_bt);

                if let Some(old_bt) = old_bt {
                    *old_bt = *val;
                    if let Some(old_art) = old_art {
                        *old_art = *val;
                    }
                }

                let new_bt = bt_map.get(key);
                let new_art = art.get(*key);
                eprintln!("Update: {:?} {:?} {:?}", key, val, new_art);
                assert_eq!(new_art, new_bt);
            }
        }
    }

    assert_eq!(art.len(), bt_map.len());
    assert_eq!(keep_art.len(), keep_bt_map.len());
    for (k, expected_value) in bt_map.iter() {
        let result = art.get(*k);
        assert_eq!(
            result,
            Some(expected_value),
            "Expected value for key {}: {:?} != {:?}",
            k,
            result,
            expected_value
        );
    }
    for (k, expected_value) in keep_bt_map.iter() {
        assert_eq!(keep_art.get(*k), Some(expected_value));
    }
});
