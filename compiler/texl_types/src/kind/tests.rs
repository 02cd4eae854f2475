use super::*;

const ALL: [Kind; 22] = [
    Kind::Unknown,
    Kind::Error,
    Kind::ObjNull,
    Kind::Void,
    Kind::Number,
    Kind::Decimal,
    Kind::Boolean,
    Kind::String,
    Kind::Hyperlink,
    Kind::Image,
    Kind::Media,
    Kind::Blob,
    Kind::Color,
    Kind::Guid,
    Kind::Date,
    Kind::Time,
    Kind::DateTime,
    Kind::Record,
    Kind::Table,
    Kind::OptionSetValue,
    Kind::Polymorphic,
    Kind::UntypedObject,
];

#[test]
fn ranges_are_disjoint() {
    for kind in ALL {
        let categories = [
            kind.is_absorbing() || kind == Kind::ObjNull,
            kind.is_primitive(),
            kind.is_aggregate(),
            kind.is_external(),
        ];
        let count = categories.iter().filter(|&&c| c).count();
        assert_eq!(count, 1, "{kind:?} belongs to {count} ranges");
    }
}

#[test]
fn numeric_and_date_time_families() {
    assert!(Kind::Number.is_numeric());
    assert!(Kind::Decimal.is_numeric());
    assert!(!Kind::Boolean.is_numeric());

    assert!(Kind::Date.is_date_time());
    assert!(Kind::Time.is_date_time());
    assert!(Kind::DateTime.is_date_time());
    assert!(!Kind::Number.is_date_time());
}

#[test]
fn textual_kinds() {
    assert!(Kind::String.is_textual());
    assert!(Kind::Hyperlink.is_textual());
    assert!(Kind::Image.is_textual());
    assert!(!Kind::Guid.is_textual());
    assert!(!Kind::Color.is_textual());
}

#[test]
fn names_are_unique() {
    let mut names: Vec<_> = ALL.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ALL.len());
}

#[test]
fn display_uses_user_facing_name() {
    assert_eq!(Kind::String.to_string(), "Text");
    assert_eq!(Kind::ObjNull.to_string(), "Blank");
    assert_eq!(format!("{:?}", Kind::Guid), "Kind::GUID");
}
