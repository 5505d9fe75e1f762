#![no_main]

use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;

use octart::{AdaptiveRadixTree, Key};

// Raw byte keys, so every byte value (including 0x00 and 0xff) shows up at every depth.
fuzz_target!(|entries: Vec<([u8; 8], u16)>| {
    let mut art = AdaptiveRadixTree::<u16>::new();
    let mut bt_map = BTreeMap::<[u8; 8], u16>::new();

    for (key, val) in &entries {
        assert_eq!(art.insert(*key, *val), bt_map.insert(*key, *val));
    }

    let art_entries: Vec<(Key, u16)> = art.iter().map(|(k, v)| (*k, *v)).collect();
    let bt_entries: Vec<(Key, u16)> = bt_map.iter().map(|(k, v)| (Key::from(*k), *v)).collect();
    assert_eq!(art_entries, bt_entries);
    assert_eq!(art.iter().len(), bt_map.len());
});
