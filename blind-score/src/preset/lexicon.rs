use lazy_static::lazy_static;

use serde::{Deserialize, Serialize};

lazy_static! {
    /// Default Korean interview vocabulary.
    static ref DEFAULT_LEXICON: Lexicon = Lexicon {
        fillers: words(&["음", "어", "그", "저"]),
        positive: words(&["열정", "성실", "책임감", "도전"]),
        keywords: words(&["AI", "머신러닝", "프로그래밍", "데이터"]),
        self_lead: words(&["주도", "기획", "자발적", "리드"]),
        teamwork: words(&["팀", "협업", "소통", "의사소통"]),
    };
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Word lists the feature extractor matches tokens against. Matching is exact: no stemming,
/// no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Stand-alone filler tokens counted as hesitation.
    pub fillers: Vec<String>,
    pub positive: Vec<String>,
    pub keywords: Vec<String>,
    pub self_lead: Vec<String>,
    pub teamwork: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        DEFAULT_LEXICON.clone()
    }
}

impl Lexicon {
    pub(crate) fn count_matches(list: &[String], tokens: &[&str]) -> u64 {
        tokens
            .iter()
            .filter(|t| list.iter().any(|w| w == *t))
            .count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_are_populated() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.fillers.len(), 4);
        assert!(lexicon.keywords.contains(&"AI".to_string()));
        assert!(lexicon.teamwork.contains(&"의사소통".to_string()));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let lexicon: Lexicon = serde_json::from_str(r#"{ "positive": ["eager"] }"#).unwrap();
        assert_eq!(lexicon.positive, vec!["eager".to_string()]);
        assert_eq!(lexicon.fillers, Lexicon::default().fillers);
    }

    #[test]
    fn matching_is_exact() {
        let list = words(&["팀"]);
        assert_eq!(Lexicon::count_matches(&list, &["팀", "팀워크", "팀", "TEAM"]), 2);
    }
}
