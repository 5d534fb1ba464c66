// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Instantiation of syllogisms from templates and figures

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use super::figures::{self, PLACEHOLDER_F, PLACEHOLDER_G};
use super::templates::template;
use super::uid::{decode_uid, encode_uid};
use super::{ConstructionInfo, Figure, ModalVariant, Mood, Premise, Syllogism};
use crate::core::{and, implies, Formula};
use crate::error::{Error, Result};

/// Size of the full figure × mood³ × modal³ product
pub const COMBINATION_COUNT: usize = 4 * 4 * 4 * 4 * 7 * 7 * 7;

/// Selection applied while enumerating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Maximum number of syllogisms returned
    pub limit: Option<usize>,
    /// Keep every `stride`-th entry after `skip`
    pub stride: usize,
    /// Entries dropped from the front
    pub skip: usize,
    /// Collapse structurally equal formulas, keeping the first UID
    pub dedup: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            limit: None,
            stride: 1,
            skip: 0,
            dedup: true,
        }
    }
}

fn specialise(premise: Premise, (f, g): (&str, &str)) -> Formula {
    let mut formula = template(premise.modal, premise.mood).clone();
    formula.rename_predicate(PLACEHOLDER_F, f);
    formula.rename_predicate(PLACEHOLDER_G, g);
    formula
}

/// Build `(major ∧ minor) → conclusion` for one combination.
pub fn make_instance(
    figure: Figure,
    major_mood: Mood,
    major_modal: ModalVariant,
    minor_mood: Mood,
    minor_modal: ModalVariant,
    conclusion_mood: Mood,
    conclusion_modal: ModalVariant,
) -> Syllogism {
    build(ConstructionInfo {
        figure,
        major: Premise::new(major_mood, major_modal),
        minor: Premise::new(minor_mood, minor_modal),
        conclusion: Premise::new(conclusion_mood, conclusion_modal),
    })
}

fn build(construction: ConstructionInfo) -> Syllogism {
    let major = specialise(construction.major, construction.figure.major());
    let minor = specialise(construction.minor, construction.figure.minor());
    let conclusion = specialise(construction.conclusion, figures::conclusion());

    Syllogism {
        formula: implies(and(major, minor), conclusion),
        uid: encode_uid(&construction),
        construction,
    }
}

/// String-keyed entry point; anything outside the fixed enumerations is a
/// configuration error.
#[allow(clippy::too_many_arguments)]
pub fn make_instance_from_names(
    figure: u8,
    major_mood: &str,
    major_modal: &str,
    minor_mood: &str,
    minor_modal: &str,
    conclusion_mood: &str,
    conclusion_modal: &str,
) -> Result<Syllogism> {
    let figure = Figure::from_number(figure)
        .ok_or_else(|| Error::config(format!("unknown figure: {}", figure)))?;

    Ok(make_instance(
        figure,
        major_mood.parse()?,
        major_modal.parse()?,
        minor_mood.parse()?,
        minor_modal.parse()?,
        conclusion_mood.parse()?,
        conclusion_modal.parse()?,
    ))
}

pub fn make_instance_from_uid(uid: &str) -> Result<Syllogism> {
    Ok(build(decode_uid(uid)?))
}

/// Enumerate syllogisms in the fixed nested order: figure, the three mood
/// letters, then the three modal variants with the conclusion innermost.
pub fn generate_all(options: GenerateOptions) -> Result<Vec<Syllogism>> {
    if options.stride == 0 {
        return Err(Error::config("stride must be at least 1"));
    }

    let target = options.limit.map(|limit| {
        limit
            .saturating_mul(options.stride)
            .saturating_add(options.skip)
    });

    let mut seen: HashSet<Formula> = HashSet::new();
    let mut all = Vec::new();
    let mut raw = 0usize;

    'enumerate: for figure in Figure::ALL {
        for major_mood in Mood::ALL {
            for minor_mood in Mood::ALL {
                for conclusion_mood in Mood::ALL {
                    for major_modal in ModalVariant::ALL {
                        for minor_modal in ModalVariant::ALL {
                            for conclusion_modal in ModalVariant::ALL {
                                if target.is_some_and(|t| all.len() >= t) {
                                    break 'enumerate;
                                }

                                let syllogism = make_instance(
                                    figure,
                                    major_mood,
                                    major_modal,
                                    minor_mood,
                                    minor_modal,
                                    conclusion_mood,
                                    conclusion_modal,
                                );
                                raw += 1;

                                if options.dedup && !seen.insert(syllogism.formula.clone()) {
                                    continue;
                                }
                                all.push(syllogism);
                            }
                        }
                    }
                }
            }
        }
    }

    debug!(
        "Enumerated {} combinations, kept {} (dedup: {})",
        raw,
        all.len(),
        options.dedup
    );

    let selected = all
        .into_iter()
        .skip(options.skip)
        .step_by(options.stride)
        .take(options.limit.unwrap_or(usize::MAX))
        .collect();

    Ok(selected)
}
