//! キーワード照合エンジン
//!
//! 辞書をキーワード長の降順に走査し、レコード中に含まれる最長のキーワードを選ぶ。
//! 同じ長さの候補が複数ある場合は `TieBreak` で決める（既定は右端優先）。
//!
//! 辞書が長さ降順であることを前提に、最良候補より短いキーワードに達した時点で走査を打ち切る。

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::types::{KeywordEntry, MatchResult};
use serde::{Deserialize, Serialize};

/// 同じ長さの候補の優先規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// 出現開始位置が最も右の候補を採用（各キーワードは最後の出現位置で比較）
    #[default]
    Rightmost,
    /// 出現開始位置が最も左の候補を採用（各キーワードは最初の出現位置で比較）
    Leftmost,
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rightmost" | "right" | "r" => Ok(TieBreak::Rightmost),
            "leftmost" | "left" | "l" => Ok(TieBreak::Leftmost),
            _ => Err(format!("Unknown tie-break: {}. Use rightmost or leftmost", s)),
        }
    }
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreak::Rightmost => write!(f, "rightmost"),
            TieBreak::Leftmost => write!(f, "leftmost"),
        }
    }
}

/// 照合エンジン
///
/// 状態を持たないため、複数スレッドから参照で共有できる。
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine<'a> {
    dictionary: &'a Dictionary,
    tie_break: TieBreak,
}

impl<'a> MatchEngine<'a> {
    pub fn new(dictionary: &'a Dictionary, tie_break: TieBreak) -> Self {
        Self {
            dictionary,
            tie_break,
        }
    }

    pub fn dictionary(&self) -> &'a Dictionary {
        self.dictionary
    }

    /// 1レコードを照合する
    pub fn match_one(&self, source: &str) -> MatchResult {
        match self.find_best(source) {
            Some(entry) => MatchResult::matched(source, entry),
            None => MatchResult::no_match(source),
        }
    }

    /// 最良のエントリを探す
    fn find_best(&self, source: &str) -> Option<&'a KeywordEntry> {
        let mut best_len = 0usize;
        // バイト位置だが、同一レコード内の比較なので文字位置と大小関係は一致する
        let mut best_start = 0usize;
        let mut best: Option<&'a KeywordEntry> = None;

        for entry in self.dictionary.entries() {
            let len = entry.char_len();
            if len < best_len {
                break;
            }

            let found = match self.tie_break {
                TieBreak::Rightmost => source.rfind(entry.keyword.as_str()),
                TieBreak::Leftmost => source.find(entry.keyword.as_str()),
            };
            let Some(start) = found else {
                continue;
            };

            let better = match best {
                None => true,
                Some(_) if len > best_len => true,
                Some(_) => match self.tie_break {
                    TieBreak::Rightmost => start > best_start,
                    TieBreak::Leftmost => start < best_start,
                },
            };

            if better {
                best_len = len;
                best_start = start;
                best = Some(entry);
            }
        }

        best
    }

    /// 全レコードを順に照合する
    ///
    /// 空辞書の場合は照合前に `InvalidDictionary` を返す。
    /// 出力は入力と同じ順序・同じ件数。
    pub fn match_all<S: AsRef<str>>(&self, sources: &[S]) -> Result<Vec<MatchResult>> {
        self.dictionary.ensure_usable()?;
        Ok(sources.iter().map(|s| self.match_one(s.as_ref())).collect())
    }

    /// 全レコードを並列に照合する（出力順は入力順）
    #[cfg(feature = "parallel")]
    pub fn match_all_par<S: AsRef<str> + Sync>(&self, sources: &[S]) -> Result<Vec<MatchResult>> {
        use rayon::prelude::*;

        self.dictionary.ensure_usable()?;
        Ok(sources
            .par_iter()
            .map(|s| self.match_one(s.as_ref()))
            .collect())
    }
}
