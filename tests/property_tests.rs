// SPDX-License-Identifier: PMPL-1.0-or-later
// Property-based tests for generation, partitioning and consensus

use proptest::prelude::*;
use sylloprove::dispatch::{partition, scaled_timeout};
use sylloprove::provers::{ProverKind, Verdict};
use sylloprove::syllogism::{
    decode_uid, make_instance, make_instance_from_uid, Figure, ModalVariant, Mood,
};
use sylloprove::verification::{ConsensusAggregator, ConsensusPolicy};

fn figure() -> impl Strategy<Value = Figure> {
    prop::sample::select(Figure::ALL.to_vec())
}

fn mood() -> impl Strategy<Value = Mood> {
    prop::sample::select(Mood::ALL.to_vec())
}

fn modal() -> impl Strategy<Value = ModalVariant> {
    prop::sample::select(ModalVariant::ALL.to_vec())
}

fn kind() -> impl Strategy<Value = ProverKind> {
    prop::sample::select(ProverKind::ALL.to_vec())
}

proptest! {
    // A UID decodes to the construction that produced it
    #[test]
    fn uid_identifies_construction(
        fig in figure(),
        moods in (mood(), mood(), mood()),
        modals in (modal(), modal(), modal()),
    ) {
        let s = make_instance(fig, moods.0, modals.0, moods.1, modals.1, moods.2, modals.2);
        prop_assert_eq!(s.uid.len(), 7);
        prop_assert_eq!(decode_uid(&s.uid).unwrap(), s.construction);
        prop_assert_eq!(make_instance_from_uid(&s.uid).unwrap().formula, s.formula);
    }

    // Arbitrary short strings either decode or are rejected without panicking
    #[test]
    fn uid_parsing_is_total(uid in "[0-9A-Za-z]{0,9}") {
        if let Ok(info) = decode_uid(&uid) {
            prop_assert_eq!(make_instance_from_uid(&uid).unwrap().construction, info);
        }
    }

    // Partitioning keeps every item, in order, in exactly `groups` chunks
    #[test]
    fn partition_concatenates_to_input(items in prop::collection::vec(any::<u16>(), 0..200), groups in 1usize..20) {
        let chunks = partition(items.clone(), groups);
        prop_assert_eq!(chunks.len(), groups);

        let limit = items.len().div_ceil(groups).max(1);
        prop_assert!(chunks.iter().all(|c| c.len() <= limit));

        let flat: Vec<u16> = chunks.into_iter().flatten().collect();
        prop_assert_eq!(flat, items);
    }

    // Renaming to a fresh name and back is the identity
    #[test]
    fn rename_roundtrip(
        fig in figure(),
        moods in (mood(), mood(), mood()),
        modals in (modal(), modal(), modal()),
        term in prop::sample::select(vec!["M", "S", "P"]),
    ) {
        let original = make_instance(fig, moods.0, modals.0, moods.1, modals.1, moods.2, modals.2).formula;
        let mut renamed = original.clone();

        renamed.rename_predicate(term, "Q");
        prop_assert!(!renamed.predicates().contains(term));
        prop_assert_eq!(renamed.depth(), original.depth());

        renamed.rename_predicate("Q", term);
        prop_assert_eq!(renamed, original);
    }

    // Scaled timeouts never exceed the base and never collapse to unlimited
    #[test]
    fn scaled_timeout_bounds(base in 0u64..100_000, k in kind()) {
        let t = scaled_timeout(base, k);
        prop_assert!(t <= base);
        prop_assert_eq!(t == 0, base == 0);
    }

    // Any Theorem alongside any Non-Theorem is a contradiction, whatever the thresholds
    #[test]
    fn contradiction_overrides_thresholds(
        t in 0usize..5,
        n in 0usize..5,
        theorem_threshold in 1usize..5,
        non_theorem_threshold in 1usize..5,
    ) {
        let agg = ConsensusAggregator::new(ConsensusPolicy { theorem_threshold, non_theorem_threshold });
        let (verdict, contradiction) = agg.decide(t, n);

        prop_assert_eq!(contradiction, t > 0 && n > 0);
        if contradiction {
            prop_assert_eq!(verdict, Verdict::Unknown);
        }
        if verdict == Verdict::Theorem {
            prop_assert!(t >= theorem_threshold && n == 0);
        }
        if verdict == Verdict::NonTheorem {
            prop_assert!(n >= non_theorem_threshold && t == 0);
        }
    }
}
