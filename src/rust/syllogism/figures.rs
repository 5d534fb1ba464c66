// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! The four syllogistic figures

use serde::{Deserialize, Serialize};

/// Middle term
pub const MIDDLE: &str = "M";
/// Subject of the conclusion (minor term)
pub const SUBJECT: &str = "S";
/// Predicate of the conclusion (major term)
pub const PREDICATE: &str = "P";

/// Placeholder names every template uses
pub const PLACEHOLDER_F: &str = "F";
pub const PLACEHOLDER_G: &str = "G";

/// Placement of the middle term in the premises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Figure {
    /// M-P, S-M
    First,
    /// P-M, S-M
    Second,
    /// M-P, M-S
    Third,
    /// P-M, M-S
    Fourth,
}

impl Figure {
    pub const ALL: [Figure; 4] = [Figure::First, Figure::Second, Figure::Third, Figure::Fourth];

    pub fn number(&self) -> u8 {
        match self {
            Figure::First => 1,
            Figure::Second => 2,
            Figure::Third => 3,
            Figure::Fourth => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Figure> {
        match n {
            1 => Some(Figure::First),
            2 => Some(Figure::Second),
            3 => Some(Figure::Third),
            4 => Some(Figure::Fourth),
            _ => None,
        }
    }

    /// `(F, G)` substitution for the major premise
    pub fn major(&self) -> (&'static str, &'static str) {
        match self {
            Figure::First | Figure::Third => (MIDDLE, PREDICATE),
            Figure::Second | Figure::Fourth => (PREDICATE, MIDDLE),
        }
    }

    /// `(F, G)` substitution for the minor premise
    pub fn minor(&self) -> (&'static str, &'static str) {
        match self {
            Figure::First | Figure::Second => (SUBJECT, MIDDLE),
            Figure::Third | Figure::Fourth => (MIDDLE, SUBJECT),
        }
    }
}

/// `(F, G)` substitution for every conclusion
pub fn conclusion() -> (&'static str, &'static str) {
    (SUBJECT, PREDICATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_numbers_round_trip() {
        for fig in Figure::ALL {
            assert_eq!(Figure::from_number(fig.number()), Some(fig));
        }
        assert_eq!(Figure::from_number(0), None);
        assert_eq!(Figure::from_number(5), None);
    }

    #[test]
    fn test_middle_term_never_in_conclusion() {
        for fig in Figure::ALL {
            let (mf, mg) = fig.major();
            let (nf, ng) = fig.minor();
            assert!(mf == MIDDLE || mg == MIDDLE);
            assert!(nf == MIDDLE || ng == MIDDLE);
            assert!(mf == PREDICATE || mg == PREDICATE);
            assert!(nf == SUBJECT || ng == SUBJECT);
        }
        assert_eq!(conclusion(), (SUBJECT, PREDICATE));
    }
}
