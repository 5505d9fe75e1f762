//! Ownership tests for the mapping layer: children must survive every size-class conversion and
//! be dropped exactly once. Worth running under Miri, since the mappings keep children in
//! `MaybeUninit` storage.

use std::rc::Rc;

use octart::mapping::{
    NodeMapping, direct_mapping::DirectMapping, indexed_mapping::IndexedMapping,
    sorted_keyed_mapping::SortedKeyedMapping,
};
use octart::utils::bitset::Bitset64;

type Mapping48<N> = IndexedMapping<N, 48, Bitset64<1>>;

#[test]
fn children_survive_every_conversion() {
    let token = Rc::new(());

    let mut n4 = SortedKeyedMapping::<Rc<()>, 4>::new();
    for k in [200u8, 0, 255, 7] {
        n4.add_child(k, token.clone());
    }
    assert_eq!(n4.keys(), &[0, 7, 200, 255]);
    assert_eq!(Rc::strong_count(&token), 5);

    let mut n16 = SortedKeyedMapping::<Rc<()>, 16>::from_resized(&mut n4);
    assert_eq!(n4.num_children(), 0);
    for k in 100..112u8 {
        n16.add_child(k, token.clone());
    }
    assert!(n16.is_full());
    assert_eq!(Rc::strong_count(&token), 17);

    let mut n48 = Mapping48::from_sorted_keyed(&mut n16);
    assert_eq!(n16.num_children(), 0);
    for k in 20..52u8 {
        n48.add_child(k, token.clone());
    }
    assert!(n48.is_full());
    assert_eq!(Rc::strong_count(&token), 49);

    let mut n256 = DirectMapping::from_indexed(&mut n48);
    assert_eq!(n48.num_children(), 0);
    assert_eq!(n256.num_children(), 48);
    for k in [0u8, 7, 200, 255, 100, 111, 20, 51] {
        assert!(n256.seek_child(k).is_some(), "lost {k}");
    }
    n256.add_child(1, token.clone());
    assert_eq!(Rc::strong_count(&token), 50);

    // The emptied mappings own nothing any more.
    drop(n4);
    drop(n16);
    drop(n48);
    assert_eq!(Rc::strong_count(&token), 50);

    drop(n256);
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn partially_filled_mappings_drop_their_children() {
    let token = Rc::new(());
    {
        let mut n4 = SortedKeyedMapping::<Rc<()>, 4>::new();
        n4.add_child(3, token.clone());
        let mut n16 = SortedKeyedMapping::<Rc<()>, 16>::new();
        n16.add_child(9, token.clone());
        n16.add_child(1, token.clone());
        let mut n48 = Mapping48::<Rc<()>>::new();
        n48.add_child(255, token.clone());
        let mut n256 = DirectMapping::<Rc<()>>::new();
        n256.add_child(0, token.clone());
        assert_eq!(Rc::strong_count(&token), 6);
    }
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn seek_child_mut_updates_in_place() {
    let mut n16 = SortedKeyedMapping::<Box<u32>, 16>::new();
    for k in (0..16u8).rev() {
        n16.add_child(k * 16, Box::new(k as u32));
    }
    for k in 0..16u8 {
        **n16.seek_child_mut(k * 16).unwrap() += 100;
    }
    let mut n48 = Mapping48::from_sorted_keyed(&mut n16);
    for k in 0..16u8 {
        assert_eq!(**n48.seek_child(k * 16).unwrap(), k as u32 + 100);
        assert!(n48.seek_child(k * 16 + 1).is_none());
    }
    **n48.seek_child_mut(0).unwrap() = 7;
    let n256 = DirectMapping::from_indexed(&mut n48);
    assert_eq!(**n256.seek_child(0).unwrap(), 7);
    assert_eq!(n256.iter().count(), 16);
}
