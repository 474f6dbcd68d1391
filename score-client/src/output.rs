// Output formatting and report export

use anyhow::{Context, Result};
use blind_score::features::Category;
use blind_score::policy::ScoringPolicy;
use blind_score::score::ScoreReport;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Everything written to `score_report_<timestamp>.json`.
#[derive(Serialize)]
pub struct ScoreExport<'a> {
    pub generated_at: DateTime<Local>,
    pub question: Option<&'a str>,
    pub weights: BTreeMap<&'static str, u8>,
    pub report: &'a ScoreReport,
    pub feedback: Option<&'a str>,
}

impl<'a> ScoreExport<'a> {
    pub fn new(
        question: Option<&'a str>,
        policy: &ScoringPolicy,
        report: &'a ScoreReport,
        feedback: Option<&'a str>,
    ) -> Self {
        Self {
            generated_at: Local::now(),
            question,
            weights: Category::ALL
                .into_iter()
                .map(|c| (c.key(), policy.weight(c)))
                .collect(),
            report,
            feedback,
        }
    }

    /// Writes the export into `dir` and returns the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let timestamp = self.generated_at.format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("score_report_{}.json", timestamp));
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}

pub fn print_report(question: Option<&str>, report: &ScoreReport, feedback: Option<&str>) {
    if let Some(question) = question {
        println!("Question: {question}\n");
    }

    let result = report.result();
    if report.is_degenerate() {
        println!("All weights are 0: nothing to evaluate.");
        println!(
            "Score: {} (grade: {})",
            result.percent(),
            result.grade()
        );
        return;
    }

    println!(
        "{:<26} {:>6} {:>6} {:>8} {:>8}",
        "Category", "Value", "Weight", "Raw", "Capped"
    );
    for entry in report.breakdown() {
        println!(
            "{:<26} {:>6} {:>6} {:>8} {:>8}",
            entry.label,
            entry.raw_value,
            entry.weight,
            entry.raw_contribution,
            entry.capped_contribution
        );
    }
    println!();
    println!("Hesitation deduction: {}", report.total_penalty());
    println!("Reward total:         {}", report.total_reward());
    println!(
        "Score:                {} / {} ({}%)",
        result.raw_total(),
        result.max_possible(),
        result.percent()
    );
    println!("Grade:                {}", result.grade());

    if let Some(feedback) = feedback {
        println!("\nFeedback:\n{feedback}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blind_score::score::cannot_evaluate;

    #[test]
    fn export_lands_in_timestamped_file() {
        let dir = std::env::temp_dir();
        let report = cannot_evaluate();
        let policy = ScoringPolicy::try_with([0; 6]).unwrap();
        let export = ScoreExport::new(Some("Why us?"), &policy, &report, None);

        let path = export.write_to(&dir).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("score_report_"));
        assert!(name.ends_with(".json"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["question"], "Why us?");
        assert_eq!(written["weights"]["hesitation"], 0);
        assert_eq!(written["report"]["result"]["percent"], -100);
        assert!(written["feedback"].is_null());

        std::fs::remove_file(path).unwrap();
    }
}
