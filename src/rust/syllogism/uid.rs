// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Syllogism identifiers
//!
//! Seven characters: the figure digit, then mood letter and modal code for
//! the major premise, the minor premise and the conclusion, e.g. `1A0A0A0`.

use super::{ConstructionInfo, Figure, ModalVariant, Mood, Premise};
use crate::error::UidError;

pub const UID_LEN: usize = 7;

pub fn encode_uid(info: &ConstructionInfo) -> String {
    let mut uid = String::with_capacity(UID_LEN);
    uid.push(char::from(b'0' + info.figure.number()));
    for premise in [info.major, info.minor, info.conclusion] {
        uid.push(premise.mood.letter());
        uid.push(premise.modal.code());
    }
    uid
}

pub fn decode_uid(uid: &str) -> Result<ConstructionInfo, UidError> {
    let chars: Vec<char> = uid.chars().collect();
    if chars.len() != UID_LEN {
        return Err(UidError::Length(chars.len()));
    }

    let figure = chars[0]
        .to_digit(10)
        .and_then(|d| Figure::from_number(d as u8))
        .ok_or(UidError::Figure(chars[0]))?;

    let premise = |at: usize| -> Result<Premise, UidError> {
        let mood = Mood::from_letter(chars[at]).ok_or(UidError::Mood(chars[at], at))?;
        let modal =
            ModalVariant::from_code(chars[at + 1]).ok_or(UidError::Modal(chars[at + 1], at + 1))?;
        Ok(Premise::new(mood, modal))
    };

    Ok(ConstructionInfo {
        figure,
        major: premise(1)?,
        minor: premise(3)?,
        conclusion: premise(5)?,
    })
}
