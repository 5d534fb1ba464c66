// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Premise templates over the placeholders `F` (subject) and `G` (predicate)

use std::collections::HashMap;
use std::sync::OnceLock;

use super::{ModalVariant, Mood};
use crate::core::{and, exists, forall, implies, nec, not, or, poss, pred, Formula};

static TEMPLATES: OnceLock<HashMap<(ModalVariant, Mood), Formula>> = OnceLock::new();

/// Template for a premise; clone before specialising.
pub fn template(modal: ModalVariant, mood: Mood) -> &'static Formula {
    let table = TEMPLATES.get_or_init(build_table);
    // The table is total over both enums.
    &table[&(modal, mood)]
}

fn f() -> Formula {
    pred("F")
}

fn g() -> Formula {
    pred("G")
}

/// ◇G ∧ ◇¬G
fn contingent_g() -> Formula {
    and(poss(g()), poss(not(g())))
}

fn build_table() -> HashMap<(ModalVariant, Mood), Formula> {
    let mut table = HashMap::new();

    for mood in Mood::ALL {
        table.insert((ModalVariant::NonModal, mood), non_modal(mood));
        table.insert((ModalVariant::Accidentally, mood), accidentally(mood));
        table.insert((ModalVariant::AccidentallyQuodEst, mood), accidentally_quod_est(mood));
        table.insert((ModalVariant::Necessarily, mood), de_dicto(mood, nec));
        table.insert((ModalVariant::NecessarilyQuodEst, mood), quod_est(mood, nec));
        table.insert((ModalVariant::Possibly, mood), de_dicto(mood, poss));
        table.insert((ModalVariant::PossiblyQuodEst, mood), quod_est(mood, poss));
    }

    table
}

fn non_modal(mood: Mood) -> Formula {
    match mood {
        Mood::A => and(forall(implies(f(), g())), exists(f())),
        Mood::E => forall(implies(f(), not(g()))),
        Mood::I => exists(and(f(), g())),
        Mood::O => or(exists(and(f(), not(g()))), not(exists(f()))),
    }
}

// Affirmative and negative moods coincide under the accidental reading.
fn accidentally(mood: Mood) -> Formula {
    match mood {
        Mood::A | Mood::E => nec(forall(implies(f(), contingent_g()))),
        Mood::I | Mood::O => poss(exists(and(f(), contingent_g()))),
    }
}

fn accidentally_quod_est(mood: Mood) -> Formula {
    match mood {
        Mood::A | Mood::E => and(forall(implies(f(), contingent_g())), exists(f())),
        Mood::I | Mood::O => exists(and(f(), contingent_g())),
    }
}

/// Whole premise under □, predicate under `modality`
fn de_dicto(mood: Mood, modality: fn(Formula) -> Formula) -> Formula {
    match mood {
        Mood::A => and(nec(forall(implies(f(), modality(g())))), poss(exists(f()))),
        Mood::E => nec(forall(implies(f(), modality(not(g()))))),
        Mood::I => poss(exists(and(f(), modality(g())))),
        Mood::O => or(
            poss(exists(and(f(), modality(not(g()))))),
            nec(not(exists(f()))),
        ),
    }
}

/// Only the predicate is modalised; explicit existence conjunct on A
fn quod_est(mood: Mood, modality: fn(Formula) -> Formula) -> Formula {
    match mood {
        Mood::A => and(forall(implies(f(), modality(g()))), exists(f())),
        Mood::E => forall(implies(f(), modality(not(g())))),
        Mood::I => exists(and(f(), modality(g()))),
        Mood::O => or(exists(and(f(), modality(not(g())))), nec(not(exists(f())))),
    }
}
