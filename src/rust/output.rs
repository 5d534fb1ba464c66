// SPDX-FileCopyrightText: 2026 Sylloprove Project Team
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Output formatting module for CLI
//!
//! Provides JSON and pretty-printed text output with colors

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;
use sylloprove::orchestrator::RunSummary;
use sylloprove::provers::Verdict;
use sylloprove::syllogism::Syllogism;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid output format: {}. Must be 'text' or 'json'", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Output formatter for different output formats
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Output a success message
    pub fn success(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("{}", message.green().bold()),
            OutputFormat::Json => self.output_json(&JsonMessage {
                level: "success",
                message,
            })?,
        }
        Ok(())
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("{}", message.yellow()),
            OutputFormat::Json => self.output_json(&JsonMessage {
                level: "warning",
                message,
            })?,
        }
        Ok(())
    }

    /// Output an info message
    pub fn info(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => self.output_json(&JsonMessage {
                level: "info",
                message,
            })?,
        }
        Ok(())
    }

    /// Output a section header
    pub fn header(&self, title: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                println!("\n{}", title.bold().underline());
                println!("{}", "=".repeat(title.chars().count()));
            }
            OutputFormat::Json => self.output_json(&JsonMessage {
                level: "header",
                message: title,
            })?,
        }
        Ok(())
    }

    /// Output a subsection title
    pub fn section(&self, title: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("\n{}", title.cyan().bold()),
            OutputFormat::Json => self.output_json(&JsonMessage {
                level: "section",
                message: title,
            })?,
        }
        Ok(())
    }

    /// Output a result item
    pub fn result(&self, item: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("{}", item),
            OutputFormat::Json => self.output_json(&JsonMessage {
                level: "result",
                message: item,
            })?,
        }
        Ok(())
    }

    /// Output a syllogism with its construction and serializations
    pub fn output_syllogism(&self, syllogism: &Syllogism) -> Result<()> {
        let view = SyllogismView {
            uid: &syllogism.uid,
            construction: syllogism.construction.to_string(),
            unicode: syllogism.formula.to_unicode(),
            prolog: syllogism.formula.to_prolog(),
            thf: syllogism.formula.to_thf(),
        };

        match self.format {
            OutputFormat::Text => {
                println!();
                println!("{} {}", "Syllogism".cyan().bold(), view.uid.bright_blue());
                println!("  {} {}", "Construction:".yellow(), view.construction);
                println!("  {} {}", "Formula:".yellow(), view.unicode);
                println!("  {} {}", "Prolog:".yellow(), view.prolog);
                println!("  {} {}", "THF:".yellow(), view.thf);
                println!();
            }
            OutputFormat::Json => self.output_json(&view)?,
        }
        Ok(())
    }

    /// Output verdict totals of a finished run
    pub fn output_summary(&self, summary: &RunSummary) -> Result<()> {
        let count = |v: Verdict| summary.records.iter().filter(|r| r.verdict == v).count();
        let view = SummaryView {
            formulas: summary.records.len(),
            theorems: count(Verdict::Theorem),
            non_theorems: count(Verdict::NonTheorem),
            unknown: count(Verdict::Unknown),
            contradictions: summary.contradictions(),
            engines: &summary.engine_names,
        };

        match self.format {
            OutputFormat::Text => {
                println!();
                println!("{}", "Run Summary".cyan().bold());
                println!("{}", "===========".cyan());
                println!("  Engines:        {}", view.engines.join(", "));
                println!("  Formulas:       {}", view.formulas);
                println!("  {}       {}", "Theorem:".green(), view.theorems);
                println!("  {}   {}", "Non-Theorem:".red(), view.non_theorems);
                println!("  {}       {}", "Unknown:".yellow(), view.unknown);
                if view.contradictions > 0 {
                    println!(
                        "  {} {}",
                        "Contradictions:".magenta().bold(),
                        view.contradictions
                    );
                }
                println!();
            }
            OutputFormat::Json => self.output_json(&view)?,
        }
        Ok(())
    }

    /// Output JSON
    fn output_json<T: Serialize>(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        println!("{}", json);
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonMessage<'a> {
    level: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct SyllogismView<'a> {
    uid: &'a str,
    construction: String,
    unicode: String,
    prolog: String,
    thf: String,
}

#[derive(Serialize)]
struct SummaryView<'a> {
    formulas: usize,
    theorems: usize,
    non_theorems: usize,
    unknown: usize,
    contradictions: usize,
    engines: &'a [String],
}
