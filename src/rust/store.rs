// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Formula-set persistence
//!
//! The generated set is stored as a single bincode blob of `Vec<Syllogism>`
//! so a run can reuse it without regenerating.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::syllogism::Syllogism;

pub fn save_formulas(path: &Path, formulas: &[Syllogism]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, formulas)?;
    writer.flush()?;
    debug!("Saved {} formulas to {}", formulas.len(), path.display());
    Ok(())
}

pub fn load_formulas(path: &Path) -> Result<Vec<Syllogism>> {
    let reader = BufReader::new(File::open(path)?);
    let formulas: Vec<Syllogism> = bincode::deserialize_from(reader)?;
    debug!("Loaded {} formulas from {}", formulas.len(), path.display());
    Ok(formulas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::syllogism::{generate_all, GenerateOptions};

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formulas.bin");

        let formulas = generate_all(GenerateOptions {
            limit: Some(25),
            stride: 3,
            ..Default::default()
        })
        .unwrap();

        save_formulas(&path, &formulas).unwrap();
        assert_eq!(load_formulas(&path).unwrap(), formulas);
    }

    #[test]
    fn test_missing_or_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");
        assert!(matches!(load_formulas(&path), Err(Error::Io(_))));

        std::fs::write(&path, b"\xff\xff\xff\xff\xff\xff\xff\xff\x01").unwrap();
        assert!(matches!(load_formulas(&path), Err(Error::Codec(_))));
    }
}
