//! 照合結果の集計

use crate::types::{MatchResult, SuffixFlag};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 照合結果の統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// 末尾一致（Y）の件数
    pub suffix_matches: usize,
    /// キーワードごとのヒット数
    pub keyword_hits: HashMap<String, usize>,
}

impl MatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };

        for r in results {
            match &r.matched_keyword {
                Some(keyword) => {
                    summary.matched += 1;
                    *summary.keyword_hits.entry(keyword.clone()).or_insert(0) += 1;
                    if r.is_suffix == Some(SuffixFlag::Yes) {
                        summary.suffix_matches += 1;
                    }
                }
                None => summary.unmatched += 1,
            }
        }

        summary
    }

    /// ヒット数の多い順に上位n件（同数はキーワード順）
    pub fn top_keywords(&self, n: usize) -> Vec<(&str, usize)> {
        let mut hits: Vec<(&str, usize)> = self
            .keyword_hits
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        hits.truncate(n);
        hits
    }

    /// 一致率（0.0-1.0）
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}
