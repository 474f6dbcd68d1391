//! Client-side score finalization on top of the decrypted contributions.

use crate::errors::BlindScoreError;
use crate::features::{Category, FeatureVector, REWARD_CAP};
use crate::policy::{ActiveSet, ScoringPolicy};

use serde::Serialize;

use std::fmt;

/// Grade tiers by percentage: ≥80, ≥60, ≥40, otherwise the lowest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Grade {
    pub fn from_percent(percent: i64) -> Grade {
        match percent {
            p if p >= 80 => Grade::Excellent,
            p if p >= 60 => Grade::Good,
            p if p >= 40 => Grade::Fair,
            _ => Grade::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::NeedsImprovement => "Needs improvement",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the per-category breakdown.
///
/// `raw_value` is the client's own plaintext count and is for display only. The contributions
/// are derived from the decrypted server reply, which is the only input to the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub category: Category,
    pub label: &'static str,
    pub raw_value: u64,
    pub weight: u8,
    pub raw_contribution: i64,
    pub capped_contribution: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    raw_total: i64,
    max_possible: u64,
    percent: i64,
    grade: Grade,
}

impl ScoreResult {
    pub fn raw_total(&self) -> i64 {
        self.raw_total
    }

    pub fn max_possible(&self) -> u64 {
        self.max_possible
    }

    pub fn percent(&self) -> i64 {
        self.percent
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }
}

/// Immutable outcome of one scoring request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    breakdown: Vec<BreakdownEntry>,
    total_reward: i64,
    total_penalty: i64,
    result: ScoreResult,
}

impl ScoreReport {
    pub fn breakdown(&self) -> &[BreakdownEntry] {
        &self.breakdown
    }

    /// Sum of the capped reward contributions.
    pub fn total_reward(&self) -> i64 {
        self.total_reward
    }

    /// Sum of the penalty contributions (≤ 0).
    pub fn total_penalty(&self) -> i64 {
        self.total_penalty
    }

    pub fn result(&self) -> &ScoreResult {
        &self.result
    }

    /// Whether this is the all-weights-zero "cannot evaluate" report.
    pub fn is_degenerate(&self) -> bool {
        self.result.max_possible == 0 && self.breakdown.is_empty()
    }
}

/// The report for an empty active set.
///
/// Nothing can be evaluated, so the score is a fixed penalty of every reward category's cap:
/// `raw_total = -(5 × 20)`. `percent` reports that same raw number rather than a ratio, which
/// keeps it distinguishable from a legitimate 0%.
pub fn cannot_evaluate() -> ScoreReport {
    let penalty = -((Category::reward_count() as i64) * REWARD_CAP as i64);
    ScoreReport {
        breakdown: Vec::new(),
        total_reward: 0,
        total_penalty: penalty,
        result: ScoreResult {
            raw_total: penalty,
            max_possible: 0,
            percent: penalty,
            grade: Grade::NeedsImprovement,
        },
    }
}

/// Builds the breakdown and the final score.
///
/// `scored` holds the decrypted `value × weight` per active category. `display` is the
/// client's plaintext vector, used for the `raw_value` column only.
///
/// # Errors
/// `Decryption` when `scored` does not line up with `active` (the reply does not belong to
/// this request) or a decrypted value is too large to be a contribution.
pub fn calculate(
    scored: &[u64],
    display: &FeatureVector,
    policy: &ScoringPolicy,
    active: &ActiveSet,
) -> Result<ScoreReport, BlindScoreError> {
    if scored.len() != active.len() {
        return Err(BlindScoreError::Decryption(format!(
            "{} decrypted contributions for {} active categories",
            scored.len(),
            active.len()
        )));
    }

    let breakdown = active
        .iter()
        .zip(scored)
        .map(|(category, &value)| {
            let magnitude = i64::try_from(value).map_err(|_| {
                BlindScoreError::Decryption(format!(
                    "contribution for `{}` is out of range",
                    category
                ))
            })?;
            let raw_contribution = if category.is_penalty() {
                -magnitude
            } else {
                magnitude
            };
            let capped_contribution = match category.cap() {
                Some(cap) => raw_contribution.min(cap as i64),
                None => raw_contribution,
            };
            Ok(BreakdownEntry {
                category,
                label: category.label(),
                raw_value: display.get(category),
                weight: policy.weight(category),
                raw_contribution,
                capped_contribution,
            })
        })
        .collect::<Result<Vec<_>, BlindScoreError>>()?;

    let total_penalty = breakdown
        .iter()
        .filter(|e| e.category.is_penalty())
        .fold(0i64, |acc, e| acc.saturating_add(e.raw_contribution));
    let total_reward = breakdown
        .iter()
        .filter(|e| !e.category.is_penalty())
        .fold(0i64, |acc, e| acc.saturating_add(e.capped_contribution));

    let raw_total = total_reward.saturating_add(total_penalty).max(0);
    let max_possible = active.reward_count() as u64 * REWARD_CAP;
    let percent = percent_of(raw_total, max_possible);

    Ok(ScoreReport {
        breakdown,
        total_reward,
        total_penalty,
        result: ScoreResult {
            raw_total,
            max_possible,
            percent,
            grade: Grade::from_percent(percent),
        },
    })
}

/// `round(raw / max × 100)` with halves rounded up; 0 when `max` is 0.
fn percent_of(raw_total: i64, max_possible: u64) -> i64 {
    if max_possible == 0 {
        return 0;
    }
    let raw = i128::from(raw_total);
    let max = i128::from(max_possible);
    ((200 * raw + max) / (2 * max)) as i64
}
