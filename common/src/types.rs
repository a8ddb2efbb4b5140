//! 照合の型定義
//!
//! CLIと照合エンジンで共有される型:
//! - KeywordEntry: 辞書の1エントリ（キーワード + ラベル列）
//! - SourceRecord: ラベル付け対象の1レコード
//! - MatchResult: 1レコードの照合結果

use serde::{Deserialize, Serialize};

/// 辞書エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordEntry {
    /// 検索キーワード（空でない）
    pub keyword: String,
    /// ラベル（列順を保持、欠損はNone）
    pub labels: Vec<Option<String>>,
    /// 元データの行番号（1始まり）
    #[serde(default)]
    pub row: usize,
}

impl KeywordEntry {
    pub fn new(keyword: impl Into<String>, labels: Vec<Option<String>>) -> Self {
        Self {
            keyword: keyword.into(),
            labels,
            row: 0,
        }
    }

    /// キーワード長（文字数）
    pub fn char_len(&self) -> usize {
        self.keyword.chars().count()
    }
}

/// ラベル付け対象レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// 元データの行番号（1始まり）
    pub row: usize,
    pub text: String,
}

/// 末尾一致フラグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuffixFlag {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl SuffixFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuffixFlag::Yes => "Y",
            SuffixFlag::No => "N",
        }
    }
}

impl From<bool> for SuffixFlag {
    fn from(b: bool) -> Self {
        if b { SuffixFlag::Yes } else { SuffixFlag::No }
    }
}

impl std::fmt::Display for SuffixFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 照合結果
///
/// `matched_keyword` が `None` ならどの辞書キーワードも含まれていない。
/// その場合 `labels`・`is_suffix` も必ず `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub source: String,
    pub matched_keyword: Option<String>,
    pub labels: Option<Vec<Option<String>>>,
    pub is_suffix: Option<SuffixFlag>,
}

impl MatchResult {
    /// 一致なしの結果
    pub fn no_match(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            matched_keyword: None,
            labels: None,
            is_suffix: None,
        }
    }

    /// 一致ありの結果（末尾一致フラグはここで算出）
    pub fn matched(source: impl Into<String>, entry: &KeywordEntry) -> Self {
        let source = source.into();
        let is_suffix = SuffixFlag::from(source.ends_with(entry.keyword.as_str()));
        Self {
            source,
            matched_keyword: Some(entry.keyword.clone()),
            labels: Some(entry.labels.clone()),
            is_suffix: Some(is_suffix),
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched_keyword.is_some()
    }

    /// 指定列のラベル（一致なし・欠損時は None）
    pub fn label(&self, column: usize) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(column))
            .and_then(|l| l.as_deref())
    }
}
