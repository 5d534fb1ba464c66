// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Whole-enumeration checks for the syllogism generator

use std::collections::HashSet;
use sylloprove::syllogism::{decode_uid, encode_uid, COMBINATION_COUNT};
use sylloprove::{generate_all, make_instance_from_uid, GenerateOptions};

fn full(dedup: bool) -> Vec<sylloprove::Syllogism> {
    generate_all(GenerateOptions {
        dedup,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_full_product_without_dedup() {
    let all = full(false);
    assert_eq!(all.len(), COMBINATION_COUNT);
    assert_eq!(all.len(), 87_808);

    let uids: HashSet<&str> = all.iter().map(|s| s.uid.as_str()).collect();
    assert_eq!(uids.len(), COMBINATION_COUNT);
    assert_eq!(all[0].uid, "1A0A0A0");
}

#[test]
fn test_dedup_leaves_distinct_formulas() {
    let all = full(true);
    assert!(all.len() < COMBINATION_COUNT);

    let shapes: HashSet<_> = all.iter().map(|s| &s.formula).collect();
    assert_eq!(shapes.len(), all.len());
}

#[test]
fn test_dedup_preserves_enumeration_order() {
    let raw = full(false);
    let kept = full(true);

    let position: std::collections::HashMap<&str, usize> = raw
        .iter()
        .enumerate()
        .map(|(i, s)| (s.uid.as_str(), i))
        .collect();
    assert!(kept
        .windows(2)
        .all(|w| position[w[0].uid.as_str()] < position[w[1].uid.as_str()]));
}

#[test]
fn test_uids_rebuild_their_formulas() {
    for s in full(false).iter().step_by(97) {
        assert_eq!(encode_uid(&decode_uid(&s.uid).unwrap()), s.uid);
        assert_eq!(make_instance_from_uid(&s.uid).unwrap(), *s);
    }
}

#[test]
fn test_every_formula_uses_three_terms() {
    for s in full(true).iter().step_by(31) {
        let names: Vec<String> = s.formula.predicates().into_iter().collect();
        assert_eq!(names, vec!["M", "P", "S"], "{}", s.uid);

        let prolog = s.formula.to_prolog();
        assert_eq!(prolog.matches('(').count(), prolog.matches(')').count());
        assert!(prolog.contains("s(X)") && prolog.contains("p(X)"));

        let thf = s.formula.to_thf();
        assert!(thf.contains("(s @ X)"));
    }
}

#[test]
fn test_barbara_prolog() {
    let barbara = make_instance_from_uid("1A0A0A0").unwrap();
    assert_eq!(
        barbara.formula.to_prolog(),
        "((((all X: (m(X) => p(X))) , (ex X: m(X))) , \
         ((all X: (s(X) => m(X))) , (ex X: s(X)))) => \
         ((all X: (s(X) => p(X))) , (ex X: s(X))))"
    );
}
