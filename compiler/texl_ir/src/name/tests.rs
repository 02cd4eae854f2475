use super::*;

#[test]
fn shard_and_slot_are_packed_apart() {
    let name = Name::new(7, 4242);
    assert_eq!(name.shard(), 7);
    assert_eq!(name.local(), 4242);
    assert_ne!(name, Name::new(6, 4242));
}

#[test]
fn last_shard_keeps_full_slot_range() {
    let name = Name::new(15, Name::MAX_LOCAL);
    assert_eq!(name.shard(), Name::NUM_SHARDS - 1);
    assert_eq!(name.local(), Name::MAX_LOCAL as usize);
}

#[test]
fn empty_is_default() {
    assert_eq!(Name::default(), Name::EMPTY);
    assert!(Name::EMPTY.is_empty());
    assert!(!Name::new(0, 1).is_empty());
}

#[test]
fn debug_shows_shard_and_slot() {
    assert_eq!(format!("{:?}", Name::new(2, 9)), "Name#2.9");
}
