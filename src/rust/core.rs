// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: MIT OR Palimpsest-0.6

//! Core formula representation for monadic modal syllogisms

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Monadic modal formula over the single bound variable `x`.
///
/// Equality and hashing are structural, so two independently built trees
/// with the same shape and predicate names compare equal. The generator
/// deduplicates on this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Formula {
    /// Predicate applied to the bound variable
    Predicate(String),

    /// Negation ¬φ
    Not(Box<Formula>),

    /// Conjunction φ ∧ ψ
    And(Box<Formula>, Box<Formula>),

    /// Disjunction φ ∨ ψ
    Or(Box<Formula>, Box<Formula>),

    /// Implication φ → ψ
    Implies(Box<Formula>, Box<Formula>),

    /// Necessity □φ
    Necessarily(Box<Formula>),

    /// Possibility ◇φ
    Possibly(Box<Formula>),

    /// Existential quantification ∃x φ
    Exists(Box<Formula>),

    /// Universal quantification ∀x φ
    Forall(Box<Formula>),
}

pub fn pred(name: &str) -> Formula {
    Formula::Predicate(name.to_string())
}

pub fn not(x: Formula) -> Formula {
    Formula::Not(Box::new(x))
}

pub fn and(l: Formula, r: Formula) -> Formula {
    Formula::And(Box::new(l), Box::new(r))
}

pub fn or(l: Formula, r: Formula) -> Formula {
    Formula::Or(Box::new(l), Box::new(r))
}

pub fn implies(l: Formula, r: Formula) -> Formula {
    Formula::Implies(Box::new(l), Box::new(r))
}

pub fn nec(x: Formula) -> Formula {
    Formula::Necessarily(Box::new(x))
}

pub fn poss(x: Formula) -> Formula {
    Formula::Possibly(Box::new(x))
}

pub fn exists(x: Formula) -> Formula {
    Formula::Exists(Box::new(x))
}

pub fn forall(x: Formula) -> Formula {
    Formula::Forall(Box::new(x))
}

impl Formula {
    /// Rename every predicate leaf called `old` to `new`, in place.
    pub fn rename_predicate(&mut self, old: &str, new: &str) {
        match self {
            Formula::Predicate(name) => {
                if name == old {
                    *name = new.to_string();
                }
            }
            Formula::Not(x)
            | Formula::Necessarily(x)
            | Formula::Possibly(x)
            | Formula::Exists(x)
            | Formula::Forall(x) => x.rename_predicate(old, new),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
                l.rename_predicate(old, new);
                r.rename_predicate(old, new);
            }
        }
    }

    /// Nesting depth; a lone predicate has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Formula::Predicate(_) => 1,
            Formula::Not(x)
            | Formula::Necessarily(x)
            | Formula::Possibly(x)
            | Formula::Exists(x)
            | Formula::Forall(x) => 1 + x.depth(),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
                1 + l.depth().max(r.depth())
            }
        }
    }

    /// Distinct predicate names, sorted
    pub fn predicates(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_predicates(&mut names);
        names
    }

    fn collect_predicates(&self, names: &mut BTreeSet<String>) {
        match self {
            Formula::Predicate(name) => {
                names.insert(name.clone());
            }
            Formula::Not(x)
            | Formula::Necessarily(x)
            | Formula::Possibly(x)
            | Formula::Exists(x)
            | Formula::Forall(x) => x.collect_predicates(names),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
                l.collect_predicates(names);
                r.collect_predicates(names);
            }
        }
    }

    /// Human-readable form, e.g. `(∀x(MX→PX)∧∃xMX)`
    pub fn to_unicode(&self) -> String {
        match self {
            Formula::Predicate(name) => format!("{}x", name.to_uppercase()),
            Formula::Not(x) => format!("¬{}", x.to_unicode()),
            Formula::And(l, r) => format!("({}∧{})", l.to_unicode(), r.to_unicode()),
            Formula::Or(l, r) => format!("({}∨{})", l.to_unicode(), r.to_unicode()),
            Formula::Implies(l, r) => format!("({}→{})", l.to_unicode(), r.to_unicode()),
            Formula::Necessarily(x) => format!("□{}", x.to_unicode()),
            Formula::Possibly(x) => format!("◇{}", x.to_unicode()),
            Formula::Exists(x) => format!("∃x{}", x.to_unicode()),
            Formula::Forall(x) => format!("∀x{}", x.to_unicode()),
        }
    }

    /// Prolog clause syntax understood by the leanCoP/leanTAP family
    pub fn to_prolog(&self) -> String {
        match self {
            Formula::Predicate(name) => format!("{}(X)", name.to_lowercase()),
            Formula::Not(x) => format!("(~ {})", x.to_prolog()),
            Formula::And(l, r) => format!("({} , {})", l.to_prolog(), r.to_prolog()),
            Formula::Or(l, r) => format!("({} ; {})", l.to_prolog(), r.to_prolog()),
            Formula::Implies(l, r) => format!("({} => {})", l.to_prolog(), r.to_prolog()),
            Formula::Necessarily(x) => format!("(# {})", x.to_prolog()),
            Formula::Possibly(x) => format!("(* {})", x.to_prolog()),
            Formula::Exists(x) => format!("(ex X: {})", x.to_prolog()),
            Formula::Forall(x) => format!("(all X: {})", x.to_prolog()),
        }
    }

    /// TPTP THF with the `$box`/`$dia` modal constants
    pub fn to_thf(&self) -> String {
        match self {
            Formula::Predicate(name) => format!("({} @ X)", name.to_lowercase()),
            Formula::Not(x) => format!("(~ {})", x.to_thf()),
            Formula::And(l, r) => format!("( {} & {} )", l.to_thf(), r.to_thf()),
            Formula::Or(l, r) => format!("( {} | {} )", l.to_thf(), r.to_thf()),
            Formula::Implies(l, r) => format!("( {} => {} )", l.to_thf(), r.to_thf()),
            Formula::Necessarily(x) => format!("( $box @ {} )", x.to_thf()),
            Formula::Possibly(x) => format!("( $dia @ {} )", x.to_thf()),
            Formula::Exists(x) => format!("( ? [X: $i] : {} )", x.to_thf()),
            Formula::Forall(x) => format!("( ! [X: $i] : {} )", x.to_thf()),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_unicode())
    }
}
