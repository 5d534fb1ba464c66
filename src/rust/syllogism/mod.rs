// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Modal syllogism construction
//!
//! A syllogism is `(major ∧ minor) → conclusion`, where each premise is a
//! template picked by mood letter and modal variant, specialised to the term
//! ordering of one of the four figures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::Formula;
use crate::error::Error;

pub mod figures;
pub mod generator;
pub mod templates;
pub mod uid;

pub use figures::Figure;
pub use generator::{
    generate_all, make_instance, make_instance_from_names, make_instance_from_uid,
    GenerateOptions, COMBINATION_COUNT,
};
pub use uid::{decode_uid, encode_uid};

/// Categorical mood letter of a premise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mood {
    /// Universal affirmative
    A,
    /// Universal negative
    E,
    /// Particular affirmative
    I,
    /// Particular negative
    O,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::A, Mood::E, Mood::I, Mood::O];

    pub fn letter(&self) -> char {
        match self {
            Mood::A => 'A',
            Mood::E => 'E',
            Mood::I => 'I',
            Mood::O => 'O',
        }
    }

    pub fn from_letter(c: char) -> Option<Mood> {
        match c {
            'A' => Some(Mood::A),
            'E' => Some(Mood::E),
            'I' => Some(Mood::I),
            'O' => Some(Mood::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Mood::from_letter(c),
            _ => None,
        }
        .ok_or_else(|| Error::config(format!("unknown mood letter: {}", s)))
    }
}

/// Modal reading applied to a premise template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModalVariant {
    NonModal,
    Accidentally,
    AccidentallyQuodEst,
    Necessarily,
    NecessarilyQuodEst,
    Possibly,
    PossiblyQuodEst,
}

impl ModalVariant {
    /// Enumeration order used by the generator and the UID alphabet
    pub const ALL: [ModalVariant; 7] = [
        ModalVariant::NonModal,
        ModalVariant::Accidentally,
        ModalVariant::AccidentallyQuodEst,
        ModalVariant::Necessarily,
        ModalVariant::NecessarilyQuodEst,
        ModalVariant::Possibly,
        ModalVariant::PossiblyQuodEst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModalVariant::NonModal => "non modal",
            ModalVariant::Accidentally => "accidentally",
            ModalVariant::AccidentallyQuodEst => "accidentally (quod est)",
            ModalVariant::Necessarily => "necessarily",
            ModalVariant::NecessarilyQuodEst => "necessarily (quod est)",
            ModalVariant::Possibly => "possibly",
            ModalVariant::PossiblyQuodEst => "possibly (quod est)",
        }
    }

    /// Single-character code used inside syllogism UIDs
    pub fn code(&self) -> char {
        match self {
            ModalVariant::NonModal => '0',
            ModalVariant::Accidentally => 'a',
            ModalVariant::AccidentallyQuodEst => 'A',
            ModalVariant::Necessarily => 'n',
            ModalVariant::NecessarilyQuodEst => 'N',
            ModalVariant::Possibly => 'p',
            ModalVariant::PossiblyQuodEst => 'P',
        }
    }

    pub fn from_code(c: char) -> Option<ModalVariant> {
        ModalVariant::ALL.iter().copied().find(|v| v.code() == c)
    }
}

impl fmt::Display for ModalVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModalVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ModalVariant::ALL
            .iter()
            .copied()
            .find(|v| v.name() == wanted || (wanted.len() == 1 && v.code().to_string() == s.trim()))
            .ok_or_else(|| Error::config(format!("unknown modal variant: {}", s)))
    }
}

/// Mood and modal reading of one premise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Premise {
    pub mood: Mood,
    pub modal: ModalVariant,
}

impl Premise {
    pub fn new(mood: Mood, modal: ModalVariant) -> Self {
        Premise { mood, modal }
    }
}

/// How a syllogism was put together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstructionInfo {
    pub figure: Figure,
    pub major: Premise,
    pub minor: Premise,
    pub conclusion: Premise,
}

impl fmt::Display for ConstructionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) {}({}) {}({}) : figure: {}",
            self.major.mood,
            self.major.modal,
            self.minor.mood,
            self.minor.modal,
            self.conclusion.mood,
            self.conclusion.modal,
            self.figure.number()
        )
    }
}

/// A generated formula together with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllogism {
    pub formula: Formula,
    pub construction: ConstructionInfo,
    pub uid: String,
}

impl fmt::Display for Syllogism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.uid, self.formula)
    }
}
