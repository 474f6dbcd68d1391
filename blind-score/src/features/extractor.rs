use crate::errors::BlindScoreError;
use crate::features::{CATEGORY_COUNT, Category, FeatureVector};
use crate::preset::lexicon::Lexicon;

use itertools::Itertools;

/// Trims the answer and rejects it when nothing is left.
pub fn trimmed_answer(text: &str) -> Result<&str, BlindScoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BlindScoreError::EmptyAnswer);
    }
    Ok(trimmed)
}

/// Extracts the per-category counts from an answer.
///
/// Pure and deterministic. Callers are expected to reject empty answers with
/// [`trimmed_answer`] first; an empty text simply yields all zeros here.
///
/// # Algorithm
/// 1. Tokenize on runs of whitespace; `length` is the token count.
/// 2. Count tokens exactly equal to a member of each reward word list, one list at a time.
/// 3. `hesitation` is the number of filler tokens plus the number of maximal runs (length ≥ 2)
///    of one repeated Hangul character in the whitespace-stripped text.
pub fn extract_features(text: &str, lexicon: &Lexicon) -> FeatureVector {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let fillers = Lexicon::count_matches(&lexicon.fillers, &tokens);
    let hesitation = fillers + count_repeated_runs(text);

    let mut values = [0u64; CATEGORY_COUNT];
    values[Category::Length.index()] = tokens.len() as u64;
    values[Category::Positive.index()] = Lexicon::count_matches(&lexicon.positive, &tokens);
    values[Category::Keywords.index()] = Lexicon::count_matches(&lexicon.keywords, &tokens);
    values[Category::Hesitation.index()] = hesitation;
    values[Category::SelfLead.index()] = Lexicon::count_matches(&lexicon.self_lead, &tokens);
    values[Category::Teamwork.index()] = Lexicon::count_matches(&lexicon.teamwork, &tokens);

    log::trace!("extracted {} tokens, hesitation {}", tokens.len(), hesitation);
    FeatureVector::new(values)
}

/// Counts maximal runs of a single repeated Hangul character once whitespace is removed.
/// "응응응" and "응응응응응" each count once; "응응아아" counts twice.
fn count_repeated_runs(text: &str) -> u64 {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .dedup_with_count()
        .filter(|&(run, c)| run >= 2 && is_hangul(c))
        .count() as u64
}

/// Hangul compatibility consonants (ㄱ–ㅎ), vowels (ㅏ–ㅣ) and precomposed syllables (가–힣).
fn is_hangul(c: char) -> bool {
    matches!(c, 'ㄱ'..='ㅎ' | 'ㅏ'..='ㅣ' | '가'..='힣')
}
