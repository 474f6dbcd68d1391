//! Per-category weights and active-category selection.

use crate::errors::BlindScoreError;
use crate::features::{CATEGORY_COUNT, Category};

use serde::Serialize;

/// Largest weight a category may carry.
pub const MAX_WEIGHT: u8 = 5;
pub const DEFAULT_WEIGHT: u8 = 1;

/// Integer weight 0..=5 per category.
///
/// A weight of 0 is a selection, not a multiplier: the category is removed from the request,
/// the breakdown and `max_possible` altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringPolicy {
    weights: [u8; CATEGORY_COUNT],
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: [DEFAULT_WEIGHT; CATEGORY_COUNT],
        }
    }
}

impl ScoringPolicy {
    pub fn try_with(weights: [u8; CATEGORY_COUNT]) -> Result<Self, BlindScoreError> {
        let mut policy = Self::default();
        for (category, weight) in Category::ALL.into_iter().zip(weights) {
            policy.set_weight(category, weight)?;
        }
        Ok(policy)
    }

    pub fn weight(&self, category: Category) -> u8 {
        self.weights[category.index()]
    }

    pub fn weights(&self) -> [u8; CATEGORY_COUNT] {
        self.weights
    }

    pub fn set_weight(&mut self, category: Category, weight: u8) -> Result<(), BlindScoreError> {
        if weight > MAX_WEIGHT {
            return Err(BlindScoreError::InvalidWeight {
                category: category.key(),
                weight,
                max: MAX_WEIGHT,
            });
        }
        self.weights[category.index()] = weight;
        Ok(())
    }

    /// Categories with a non-zero weight, ascending. Recompute for every request.
    pub fn active(&self) -> ActiveSet {
        let categories: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| self.weight(*c) > 0)
            .collect();
        log::debug!(
            "active categories: {:?}",
            categories.iter().map(|c| c.key()).collect::<Vec<_>>()
        );
        ActiveSet(categories)
    }
}

/// Ordered set of the categories included in one scoring request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSet(Vec<Category>);

impl ActiveSet {
    pub fn categories(&self) -> &[Category] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    /// Active categories that are not penalties.
    pub fn reward_count(&self) -> usize {
        self.0.iter().filter(|c| !c.is_penalty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_active() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.weights(), [1; CATEGORY_COUNT]);
        assert_eq!(policy.active().categories(), &Category::ALL);
    }

    #[test]
    fn zero_weight_excludes_category() -> Result<(), BlindScoreError> {
        let policy = ScoringPolicy::try_with([0, 1, 1, 1, 0, 1])?;
        let active = policy.active();
        assert_eq!(
            active.categories(),
            &[
                Category::Positive,
                Category::Keywords,
                Category::Hesitation,
                Category::Teamwork
            ]
        );
        assert!(!active.contains(Category::Length));
        assert_eq!(active.reward_count(), 3);
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_weight() {
        let mut policy = ScoringPolicy::default();
        assert!(policy.set_weight(Category::Keywords, 5).is_ok());
        let err = policy.set_weight(Category::Keywords, 6).unwrap_err();
        assert!(matches!(
            err,
            BlindScoreError::InvalidWeight { category: "keywords", weight: 6, max: 5 }
        ));
        assert_eq!(policy.weight(Category::Keywords), 5);
        assert!(ScoringPolicy::try_with([1, 1, 1, 9, 1, 1]).is_err());
    }

    #[test]
    fn all_zero_is_empty() -> Result<(), BlindScoreError> {
        let policy = ScoringPolicy::try_with([0; CATEGORY_COUNT])?;
        assert!(policy.active().is_empty());
        Ok(())
    }
}
