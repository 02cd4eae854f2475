use super::*;

#[test]
fn flags_size() {
    assert_eq!(std::mem::size_of::<TypeFlags>(), 4);
}

#[test]
fn for_kind_sets_categories() {
    let number = TypeFlags::for_kind(Kind::Number);
    assert!(number.contains(TypeFlags::IS_PRIMITIVE | TypeFlags::IS_NUMERIC));
    assert!(!number.contains(TypeFlags::IS_DATE_TIME));

    let date = TypeFlags::for_kind(Kind::Date);
    assert!(date.contains(TypeFlags::IS_DATE_TIME));

    let record = TypeFlags::for_kind(Kind::Record);
    assert_eq!(record.category(), TypeCategory::Aggregate);

    let untyped = TypeFlags::for_kind(Kind::UntypedObject);
    assert_eq!(untyped.category(), TypeCategory::External);
    assert!(untyped.contains(TypeFlags::HAS_UNTYPED));
}

#[test]
fn absorbing_kinds_are_unresolved() {
    for kind in [Kind::Error, Kind::Unknown, Kind::Void] {
        let flags = TypeFlags::for_kind(kind);
        assert!(flags.is_absorbing(), "{kind:?}");
        assert!(!flags.is_resolved(), "{kind:?}");
        assert_eq!(flags.category(), TypeCategory::Special);
    }
    assert!(TypeFlags::for_kind(Kind::Error).has_errors());
    assert!(!TypeFlags::for_kind(Kind::Unknown).has_errors());
}

#[test]
fn blank_is_resolved() {
    let blank = TypeFlags::for_kind(Kind::ObjNull);
    assert!(blank.is_resolved());
    assert!(!blank.is_absorbing());
    assert!(blank.contains(TypeFlags::HAS_BLANK));
}

#[test]
fn propagate_keeps_presence_only() {
    let child = TypeFlags::for_kind(Kind::Error);
    let propagated = TypeFlags::propagate_from(child);

    assert!(propagated.has_errors());
    assert!(!propagated.is_absorbing());
    assert!(!propagated.contains(TypeFlags::IS_ABSORBING));
}

#[test]
fn propagate_all_merges_children() {
    let combined = TypeFlags::propagate_all([
        TypeFlags::for_kind(Kind::Unknown),
        TypeFlags::for_kind(Kind::ObjNull),
        TypeFlags::for_kind(Kind::Number),
        TypeFlags::HAS_DATA_SOURCE,
    ]);

    assert!(combined.contains(TypeFlags::HAS_UNKNOWN));
    assert!(combined.contains(TypeFlags::HAS_BLANK));
    assert!(!combined.contains(TypeFlags::IS_PRIMITIVE));
    assert!(!combined.contains(TypeFlags::HAS_DATA_SOURCE));
}
