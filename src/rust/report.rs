// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! CSV report of consolidated results
//!
//! One row per syllogism: its construction, the formula, the final verdict,
//! then a result and a proof column per engine in roster order.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::verification::ConsolidatedRecord;

const FIXED_COLUMNS: [&str; 9] = [
    "Figure",
    "Major",
    "Major modal",
    "Minor",
    "Minor modal",
    "Conclusion",
    "Conclusion modal",
    "Formula",
    "Final",
];

pub fn header(engine_names: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    for name in engine_names {
        columns.push(format!("{} result", name));
        columns.push(format!("{} proof", name));
    }
    columns
}

/// Cells for one record; engines missing from the record leave their two
/// columns empty.
pub fn row(record: &ConsolidatedRecord, engine_count: usize) -> Vec<String> {
    let info = &record.syllogism.construction;
    let mut cells = vec![
        info.figure.number().to_string(),
        info.major.mood.to_string(),
        info.major.modal.to_string(),
        info.minor.mood.to_string(),
        info.minor.modal.to_string(),
        info.conclusion.mood.to_string(),
        info.conclusion.modal.to_string(),
        record.syllogism.formula.to_string(),
        record.verdict.to_string(),
    ];

    for i in 0..engine_count {
        match record.engines.get(i) {
            Some(engine) => {
                cells.push(engine.verdict.to_string());
                cells.push(engine.proof.clone().unwrap_or_default());
            }
            None => {
                cells.push(String::new());
                cells.push(String::new());
            }
        }
    }
    cells
}

/// Quote a field when it holds a separator, a quote or a line break.
pub fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_line<W: Write>(writer: &mut W, cells: &[String]) -> std::io::Result<()> {
    let line: Vec<Cow<'_, str>> = cells.iter().map(|c| escape(c)).collect();
    writeln!(writer, "{}", line.join(","))
}

pub fn write_report<W: Write>(
    writer: W,
    engine_names: &[String],
    records: &[ConsolidatedRecord],
) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    write_line(&mut writer, &header(engine_names))?;
    for record in records {
        write_line(&mut writer, &row(record, engine_names.len()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_report_file(
    path: &Path,
    engine_names: &[String],
    records: &[ConsolidatedRecord],
) -> Result<()> {
    write_report(File::create(path)?, engine_names, records)?;
    info!("Wrote {} results to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provers::Verdict;
    use crate::syllogism::make_instance_from_uid;
    use crate::verification::EngineVerdict;
    use pretty_assertions::assert_eq;

    fn names() -> Vec<String> {
        vec!["MleanCoP".to_string(), "LEO-III".to_string()]
    }

    fn record() -> ConsolidatedRecord {
        ConsolidatedRecord {
            syllogism: make_instance_from_uid("1A0A0A0").unwrap(),
            verdict: Verdict::Theorem,
            contradiction: false,
            engines: vec![
                EngineVerdict {
                    engine: "MleanCoP".to_string(),
                    verdict: Verdict::Theorem,
                    proof: Some("1. \"ax\", closed\n2. done".to_string()),
                },
                EngineVerdict {
                    engine: "LEO-III".to_string(),
                    verdict: Verdict::Unknown,
                    proof: None,
                },
            ],
        }
    }

    #[test]
    fn test_header() {
        assert_eq!(
            header(&names()).join(","),
            "Figure,Major,Major modal,Minor,Minor modal,Conclusion,Conclusion modal,\
             Formula,Final,MleanCoP result,MleanCoP proof,LEO-III result,LEO-III proof"
        );
    }

    #[test]
    fn test_row_cells() {
        let cells = row(&record(), 2);
        assert_eq!(cells.len(), 13);
        assert_eq!(&cells[..7], &["1", "A", "non modal", "A", "non modal", "A", "non modal"]);
        assert_eq!(cells[8], "Theorem");
        assert_eq!(cells[11], "Unknown");
        assert_eq!(cells[12], "");

        let padded = row(&record(), 3);
        assert_eq!(&padded[13..], &["", ""]);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_write_report() {
        let mut out = Vec::new();
        write_report(&mut out, &names(), &[record()]).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.splitn(2, '\n');
        assert!(lines.next().unwrap().starts_with("Figure,Major,"));
        let body = lines.next().unwrap();
        assert!(body.starts_with("1,A,non modal,A,non modal,A,non modal,"));
        assert!(body.contains("Theorem,\"1. \"\"ax\"\", closed\n2. done\",Unknown,\n"));
    }
}
