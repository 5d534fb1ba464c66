// SPDX-License-Identifier: PMPL-1.0-or-later

//! Engine consensus
//!
//! Every formula is decided by all engines of a group. A contradiction (at
//! least one Theorem and at least one Non-Theorem) always yields `Unknown`
//! and is flagged for review; otherwise the quorum thresholds decide.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::provers::{EngineResult, Verdict};
use crate::syllogism::Syllogism;

/// Quorum thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusPolicy {
    /// Minimum Theorem votes for a Theorem verdict
    pub theorem_threshold: usize,
    /// Minimum Non-Theorem votes for a Non-Theorem verdict
    pub non_theorem_threshold: usize,
}

impl Default for ConsensusPolicy {
    fn default() -> Self {
        Self {
            theorem_threshold: 1,
            non_theorem_threshold: 1,
        }
    }
}

/// One engine's contribution to a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineVerdict {
    pub engine: String,
    pub verdict: Verdict,
    /// Proof text, kept only for Theorem verdicts
    pub proof: Option<String>,
}

/// Adjudicated outcome for one syllogism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRecord {
    pub syllogism: Syllogism,
    pub verdict: Verdict,
    /// Engines disagreed; the verdict was forced to Unknown
    pub contradiction: bool,
    /// Per-engine verdicts in roster order
    pub engines: Vec<EngineVerdict>,
}

/// Applies a [`ConsensusPolicy`] to gathered engine results
pub struct ConsensusAggregator {
    policy: ConsensusPolicy,
}

impl ConsensusAggregator {
    pub fn new(policy: ConsensusPolicy) -> Self {
        Self { policy }
    }

    /// Create with default thresholds
    pub fn with_defaults() -> Self {
        Self::new(ConsensusPolicy::default())
    }

    pub fn policy(&self) -> &ConsensusPolicy {
        &self.policy
    }

    /// Final verdict and contradiction flag for the given vote counts
    pub fn decide(&self, theorems: usize, non_theorems: usize) -> (Verdict, bool) {
        if theorems > 0 && non_theorems > 0 {
            (Verdict::Unknown, true)
        } else if theorems >= self.policy.theorem_threshold {
            (Verdict::Theorem, false)
        } else if non_theorems >= self.policy.non_theorem_threshold {
            (Verdict::NonTheorem, false)
        } else {
            (Verdict::Unknown, false)
        }
    }

    /// Merge the results of all engines for one syllogism.
    ///
    /// Every result must be for the syllogism's own formula; anything else
    /// means the gathered arrays are misaligned and the run cannot continue.
    pub fn consolidate(
        &self,
        syllogism: &Syllogism,
        results: &[EngineResult],
    ) -> Result<ConsolidatedRecord> {
        if results.is_empty() {
            return Err(Error::alignment(format!(
                "no engine results for {}",
                syllogism.uid
            )));
        }

        if let Some(stray) = results.iter().find(|r| r.formula != syllogism.formula) {
            return Err(Error::alignment(format!(
                "{} returned a result for {} while consolidating {}",
                stray.engine, stray.formula, syllogism
            )));
        }

        let count = |v: Verdict| results.iter().filter(|r| r.verdict == v).count();
        let (verdict, contradiction) = self.decide(count(Verdict::Theorem), count(Verdict::NonTheorem));

        let engines: Vec<EngineVerdict> = results
            .iter()
            .map(|r| EngineVerdict {
                engine: r.engine.clone(),
                verdict: r.verdict,
                proof: r.proof.clone().filter(|_| r.verdict == Verdict::Theorem),
            })
            .collect();

        if contradiction {
            let votes: Vec<String> = engines
                .iter()
                .map(|e| format!("{}={}", e.engine, e.verdict))
                .collect();
            warn!("Contradiction on {}: {}", syllogism.uid, votes.join(", "));
        }

        Ok(ConsolidatedRecord {
            syllogism: syllogism.clone(),
            verdict,
            contradiction,
            engines,
        })
    }

    /// Consolidate a whole chunk from the arrays gathered at a group leader,
    /// one array per engine, each aligned with `chunk`.
    pub fn consolidate_group(
        &self,
        chunk: &[Syllogism],
        gathered: Vec<Vec<EngineResult>>,
        engine_count: usize,
    ) -> Result<Vec<ConsolidatedRecord>> {
        if gathered.len() != engine_count {
            return Err(Error::alignment(format!(
                "expected results from {} engines, got {}",
                engine_count,
                gathered.len()
            )));
        }
        if let Some((i, column)) = gathered
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() != chunk.len())
        {
            return Err(Error::alignment(format!(
                "engine {} returned {} results for a chunk of {}",
                i,
                column.len(),
                chunk.len()
            )));
        }

        let mut columns: Vec<_> = gathered.into_iter().map(Vec::into_iter).collect();
        chunk
            .iter()
            .map(|syllogism| {
                let row: Vec<EngineResult> = columns.iter_mut().filter_map(Iterator::next).collect();
                self.consolidate(syllogism, &row)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllogism::make_instance_from_uid;

    fn result(s: &Syllogism, engine: &str, verdict: Verdict) -> EngineResult {
        EngineResult {
            engine: engine.to_string(),
            formula: s.formula.clone(),
            verdict,
            proof: (verdict == Verdict::Theorem).then(|| format!("proof by {}", engine)),
        }
    }

    fn results(s: &Syllogism, verdicts: &[Verdict]) -> Vec<EngineResult> {
        let names = ["MleanCoP", "MleanTAP", "LEO-III", "TPG"];
        verdicts
            .iter()
            .zip(names)
            .map(|(&v, name)| result(s, name, v))
            .collect()
    }

    fn barbara() -> Syllogism {
        make_instance_from_uid("1A0A0A0").unwrap()
    }

    use Verdict::{NonTheorem as N, Theorem as T, Unknown as U};

    #[test]
    fn test_default_thresholds() {
        let agg = ConsensusAggregator::with_defaults();
        let s = barbara();

        let cases: &[(&[Verdict], Verdict, bool)] = &[
            (&[T, T, U, T], T, false),
            (&[T, N, U, U], U, true),
            (&[T, T, N, U], U, true),
            (&[U, U, U, U], U, false),
            (&[N, U, N, N], N, false),
            (&[U, U, T, U], T, false),
        ];

        for (verdicts, expected, contradiction) in cases {
            let record = agg.consolidate(&s, &results(&s, verdicts)).unwrap();
            assert_eq!(record.verdict, *expected, "votes {:?}", verdicts);
            assert_eq!(record.contradiction, *contradiction, "votes {:?}", verdicts);
            assert_eq!(record.engines.len(), 4);
        }
    }

    #[test]
    fn test_higher_thresholds() {
        let agg = ConsensusAggregator::new(ConsensusPolicy {
            theorem_threshold: 2,
            non_theorem_threshold: 3,
        });
        let s = barbara();

        let verdict = |v: &[Verdict]| agg.consolidate(&s, &results(&s, v)).unwrap().verdict;
        assert_eq!(verdict(&[T, U, U, U]), U);
        assert_eq!(verdict(&[T, T, U, U]), T);
        assert_eq!(verdict(&[N, N, U, U]), U);
        assert_eq!(verdict(&[N, N, N, U]), N);

        let two_of_four = ConsensusAggregator::new(ConsensusPolicy {
            theorem_threshold: 1,
            non_theorem_threshold: 2,
        });
        let record = two_of_four.consolidate(&s, &results(&s, &[N, N, U, U])).unwrap();
        assert_eq!(record.verdict, N);
        assert!(!record.contradiction);
    }

    #[test]
    fn test_contradiction_wins_over_thresholds() {
        let agg = ConsensusAggregator::with_defaults();
        let s = barbara();
        let record = agg.consolidate(&s, &results(&s, &[T, T, T, N])).unwrap();
        assert_eq!(record.verdict, U);
        assert!(record.contradiction);
    }

    #[test]
    fn test_proofs_kept_only_for_theorems() {
        let agg = ConsensusAggregator::with_defaults();
        let s = barbara();
        let mut input = results(&s, &[T, U, U, U]);
        input[1].proof = Some("stale".to_string());

        let record = agg.consolidate(&s, &input).unwrap();
        assert_eq!(record.engines[0].proof.as_deref(), Some("proof by MleanCoP"));
        assert_eq!(record.engines[1].proof, None);
        assert_eq!(record.engines[2].engine, "LEO-III");
    }

    #[test]
    fn test_misaligned_result_is_fatal() {
        let agg = ConsensusAggregator::with_defaults();
        let s = barbara();
        let other = make_instance_from_uid("2E0A0E0").unwrap();

        let mut input = results(&s, &[T, T]);
        input.push(result(&other, "LEO-III", T));

        assert!(matches!(agg.consolidate(&s, &input), Err(Error::Alignment(_))));
        assert!(matches!(agg.consolidate(&s, &[]), Err(Error::Alignment(_))));
    }

    #[test]
    fn test_consolidate_group_transposes_columns() {
        let agg = ConsensusAggregator::with_defaults();
        let chunk = vec![barbara(), make_instance_from_uid("2E0A0E0").unwrap()];

        let gathered = vec![
            vec![result(&chunk[0], "MleanCoP", T), result(&chunk[1], "MleanCoP", N)],
            vec![result(&chunk[0], "MleanTAP", U), result(&chunk[1], "MleanTAP", N)],
        ];

        let records = agg.consolidate_group(&chunk, gathered, 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].syllogism.uid, "1A0A0A0");
        assert_eq!(records[0].verdict, T);
        assert_eq!(records[1].verdict, N);
        assert_eq!(records[1].engines[1].engine, "MleanTAP");
    }

    #[test]
    fn test_consolidate_group_checks_counts() {
        let agg = ConsensusAggregator::with_defaults();
        let chunk = vec![barbara()];

        let short = vec![vec![result(&chunk[0], "MleanCoP", T)]];
        assert!(matches!(
            agg.consolidate_group(&chunk, short, 2),
            Err(Error::Alignment(_))
        ));

        let ragged = vec![vec![result(&chunk[0], "MleanCoP", T)], vec![]];
        assert!(matches!(
            agg.consolidate_group(&chunk, ragged, 2),
            Err(Error::Alignment(_))
        ));

        assert!(agg.consolidate_group(&[], vec![vec![], vec![]], 2).unwrap().is_empty());
    }
}
