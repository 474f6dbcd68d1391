//! # Features
//!
//! Scoring categories and the fixed-length count vector extracted from an answer.

pub mod extractor;

pub use extractor::{extract_features, trimmed_answer};

use crate::errors::BlindScoreError;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Number of scoring categories.
pub const CATEGORY_COUNT: usize = 6;

/// Maximum points a single reward category may contribute.
pub const REWARD_CAP: u64 = 20;

/// A scoring category. Declaration order is the wire and vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Positive,
    Keywords,
    Hesitation,
    SelfLead,
    Teamwork,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Length,
        Category::Positive,
        Category::Keywords,
        Category::Hesitation,
        Category::SelfLead,
        Category::Teamwork,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Category> {
        Self::ALL.get(index).copied()
    }

    /// Stable machine key, as used on the command line and in config files.
    pub fn key(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Positive => "positive",
            Category::Keywords => "keywords",
            Category::Hesitation => "hesitation",
            Category::SelfLead => "selflead",
            Category::Teamwork => "teamwork",
        }
    }

    /// Human-readable label for breakdown tables.
    pub fn label(self) -> &'static str {
        match self {
            Category::Length => "Word count",
            Category::Positive => "Positive expressions",
            Category::Keywords => "Job keywords",
            Category::Hesitation => "Hesitation",
            Category::SelfLead => "Self-leadership keywords",
            Category::Teamwork => "Teamwork keywords",
        }
    }

    /// Penalty categories are subtracted from the total and never capped.
    pub fn is_penalty(self) -> bool {
        matches!(self, Category::Hesitation)
    }

    /// Per-category contribution cap; `None` for penalty categories.
    pub fn cap(self) -> Option<u64> {
        if self.is_penalty() {
            None
        } else {
            Some(REWARD_CAP)
        }
    }

    /// Number of reward (non-penalty) categories.
    pub fn reward_count() -> usize {
        Self::ALL.iter().filter(|c| !c.is_penalty()).count()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = BlindScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| BlindScoreError::Codec(format!("unknown category `{}`", s)))
    }
}

/// Per-category counts. Every value is a non-negative count, including the penalty category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector([u64; CATEGORY_COUNT]);

impl FeatureVector {
    pub fn new(values: [u64; CATEGORY_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, category: Category) -> u64 {
        self.0[category.index()]
    }

    pub fn values(&self) -> [u64; CATEGORY_COUNT] {
        self.0
    }
}

impl Index<Category> for FeatureVector {
    type Output = u64;

    fn index(&self, category: Category) -> &u64 {
        &self.0[category.index()]
    }
}
