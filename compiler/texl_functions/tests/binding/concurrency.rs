//! Many binding passes sharing one registry and one telemetry sink.

use pretty_assertions::assert_eq;
use rayon::prelude::*;
use texl_functions::{DelegationCapability, NotDelegable, RecordingTelemetry};
use texl_types::{DType, Features};

use crate::common::{registry, Harness, ACCOUNTS};

const PASSES: usize = 64;

/// Bind `CountRows(Contacts)` over a relationship and `Sum(1, 2)` in one
/// pass, reporting delegation telemetry into `sink`.
fn bind_pass(pass: usize, sink: &RecordingTelemetry) -> (DType, bool) {
    let features = Features::legacy().with_number_is_float(pass % 2 == 0);
    let mut h = Harness::new(features);
    h.connect_accounts(DelegationCapability::all());

    let (_, sum) = h.check("Sum", &[DType::NUMBER, DType::DECIMAL]);

    let contacts = h.ident("Contacts");
    let call = h.call("CountRows", &[contacts]);
    let types = [h.accounts().with_expand_info()];
    let cx = h.cx_with(sink);
    let checked = registry().check_call(&cx, &h.site(call, &types));
    assert!(checked.is_valid());
    let delegation = registry().check_delegation(&cx, &h.site(call, &types));

    (sum.return_type, delegation.delegable)
}

#[test]
fn concurrent_passes_share_the_registry() {
    let sink = RecordingTelemetry::new();

    let results: Vec<(DType, bool)> = (0..PASSES)
        .into_par_iter()
        .map(|pass| bind_pass(pass, &sink))
        .collect();

    for (sum, delegable) in &results {
        assert_eq!(sum, &DType::NUMBER);
        assert!(!delegable);
    }

    let events = sink.take();
    assert_eq!(events.len(), PASSES);
    assert!(events
        .iter()
        .all(|event| event.function == "CountRows"
            && event.source == Some(ACCOUNTS)
            && event.reason == NotDelegable::OneToMany));
    assert!(sink.is_empty());
}

#[test]
fn concurrent_results_match_sequential_results() {
    let sink = RecordingTelemetry::new();

    let sequential: Vec<(DType, bool)> = (0..PASSES).map(|pass| bind_pass(pass, &sink)).collect();
    let parallel: Vec<(DType, bool)> = (0..PASSES)
        .into_par_iter()
        .map(|pass| bind_pass(pass, &sink))
        .collect();

    assert_eq!(sequential, parallel);
    assert_eq!(sink.len(), 2 * PASSES);
}
