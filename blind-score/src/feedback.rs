//! Reviewer prompt built from the numeric analysis only.
//!
//! The answer text never reaches this module: the prompt is assembled from the question, the
//! breakdown and the final result. Producing the actual feedback is up to the caller (the CLI
//! talks to a chat-completion endpoint); whatever goes wrong there, the score stays intact and
//! [`feedback_or_placeholder`] substitutes a fixed message.

use crate::score::ScoreReport;

use serde::Serialize;

use std::fmt::Display;

/// Shown in place of the feedback whenever the collaborator fails.
pub const FEEDBACK_PLACEHOLDER: &str = "Feedback could not be generated.";

const PREAMBLE: &str = "You are an interview coach. You never see the candidate's answer; \
you only receive the numeric analysis below, computed over an encrypted transcript. \
Give short, constructive feedback based on these numbers.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackPrompt {
    text: String,
}

impl FeedbackPrompt {
    pub fn build(question: &str, report: &ScoreReport) -> Self {
        let result = report.result();
        let categories: String = report
            .breakdown()
            .iter()
            .map(|entry| {
                format!(
                    "- {}: value={}, weight={}, raw contribution={}, capped contribution={}\n",
                    entry.label,
                    entry.raw_value,
                    entry.weight,
                    entry.raw_contribution,
                    entry.capped_contribution
                )
            })
            .collect();

        let mut text = format!(
            "{}\n\nInterview question: \"{}\"\n\nPer-category results:\n",
            PREAMBLE, question
        );
        text.push_str(&categories);
        text.push_str(&format!(
            "\n- Hesitation deduction: {}\n\
             - Reward total (each category capped at 20): {}\n\
             - Raw score: {} / {}\n\
             - Percent: {}%\n\
             - Grade: {}\n",
            report.total_penalty(),
            report.total_reward(),
            result.raw_total(),
            result.max_possible(),
            result.percent(),
            result.grade()
        ));
        text.push_str("\nThe answer text was withheld for privacy; do not ask for it.");

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// The feedback text, or [`FEEDBACK_PLACEHOLDER`] when the collaborator failed or answered
/// with nothing.
pub fn feedback_or_placeholder<E: Display>(outcome: Result<String, E>) -> String {
    match outcome {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            log::warn!("feedback collaborator returned an empty reply");
            FEEDBACK_PLACEHOLDER.to_string()
        }
        Err(e) => {
            log::warn!("feedback collaborator failed: {}", e);
            FEEDBACK_PLACEHOLDER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BlindScoreError;
    use crate::features::FeatureVector;
    use crate::policy::ScoringPolicy;
    use crate::score::{calculate, cannot_evaluate};

    #[test]
    fn prompt_carries_numbers_but_not_the_answer() -> Result<(), BlindScoreError> {
        let answer = "저는 열정 이 있습니다";
        let display = FeatureVector::new([4, 1, 0, 0, 0, 0]);
        let policy = ScoringPolicy::default();
        let active = policy.active();
        let report = calculate(&[4, 1, 0, 0, 0, 0], &display, &policy, &active)?;

        let prompt = FeedbackPrompt::build("자기소개를 해주세요.", &report);
        let text = prompt.as_str();
        assert!(text.contains("자기소개를 해주세요."));
        assert!(text.contains("- Positive expressions: value=1, weight=1"));
        assert!(text.contains("- Raw score: 5 / 100"));
        assert!(text.contains("- Grade: Needs improvement"));
        assert!(!text.contains(answer));
        assert!(!text.contains("열정"));
        Ok(())
    }

    #[test]
    fn prompt_sections_appear_in_order() {
        let text = FeedbackPrompt::build("q", &cannot_evaluate()).into_string();
        assert!(text.starts_with(PREAMBLE));
        let positions: Vec<usize> = [
            "Interview question: \"q\"",
            "Per-category results:",
            "- Hesitation deduction: -100",
            "- Reward total (each category capped at 20): 0",
            "- Raw score: -100 / 0",
            "- Percent: -100%",
            "- Grade: Needs improvement",
            "withheld for privacy",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap_or(usize::MAX))
        .collect();
        assert!(positions.iter().all(|&p| p != usize::MAX), "{}", text);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("- Grade: Needs improvement\n\nThe answer text"));
    }

    #[test]
    fn degenerate_report_still_builds() {
        let prompt = FeedbackPrompt::build("q", &cannot_evaluate());
        assert!(prompt.as_str().contains("- Percent: -100%"));
    }

    #[test]
    fn failures_fall_back_to_placeholder() {
        assert_eq!(
            feedback_or_placeholder::<String>(Err("timeout".into())),
            FEEDBACK_PLACEHOLDER
        );
        assert_eq!(
            feedback_or_placeholder::<String>(Ok("  ".into())),
            FEEDBACK_PLACEHOLDER
        );
        assert_eq!(
            feedback_or_placeholder::<String>(Ok("Speak more slowly.".into())),
            "Speak more slowly."
        );
    }
}
