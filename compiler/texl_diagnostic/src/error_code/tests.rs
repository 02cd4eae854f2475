use std::collections::HashSet;

use super::*;

#[test]
fn display_matches_as_str() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::W4002.as_str(), "W4002");
}

#[test]
fn codes_and_keys_are_unique() {
    let codes: HashSet<_> = ErrorCode::ALL.iter().map(|c| c.as_str()).collect();
    let keys: HashSet<_> = ErrorCode::ALL.iter().map(|c| c.resource_key()).collect();
    assert_eq!(codes.len(), ErrorCode::ALL.len());
    assert_eq!(keys.len(), ErrorCode::ALL.len());
}

#[test]
fn prefix_matches_phase() {
    for code in ErrorCode::ALL {
        let digit = code.as_str().as_bytes()[1];
        let phase = match digit {
            b'1' => Phase::Arity,
            b'2' => Phase::Types,
            b'3' => Phase::Semantics,
            b'4' => Phase::Delegation,
            _ => panic!("unexpected code {code}"),
        };
        assert_eq!(code.phase(), phase, "{code}");
    }
}

#[test]
fn warnings_have_warning_severity() {
    for code in ErrorCode::ALL {
        let expected = if code.as_str().starts_with('W') {
            Severity::Warning
        } else {
            Severity::Severe
        };
        assert_eq!(code.default_severity(), expected, "{code}");
        assert_eq!(code.is_warning(), expected == Severity::Warning);
    }
}

#[test]
fn well_known_keys() {
    assert_eq!(ErrorCode::E1001.resource_key(), "ErrBadArity");
    assert_eq!(ErrorCode::E2005.resource_key(), "ErrIncompatibleRecord");
    assert_eq!(ErrorCode::E2007.resource_key(), "ErrReduceUndeterminedType");
}
