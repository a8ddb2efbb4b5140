//! 辞書の診断情報
//!
//! 空キーワード・1文字キーワード・重複キーワードは処理を止めず、
//! すべてここに記録して呼び出し側へ返す。

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 診断対象の辞書行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRow {
    /// 元データの行番号（1始まり）
    pub row: usize,
    /// キーワード（空キーワードの場合はNone）
    pub keyword: Option<String>,
    pub labels: Vec<Option<String>>,
}

/// 重複により破棄した辞書行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRow {
    pub row: usize,
    pub keyword: String,
    pub labels: Vec<Option<String>>,
    /// 採用された（最初に出現した）行
    pub kept_row: usize,
}

/// 辞書列の統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryStats {
    /// 入力行数（不正行を含む）
    pub total_rows: usize,
    pub keyword_non_null: usize,
    pub keyword_null: usize,
    /// ラベル列ごとの非空件数
    pub label_non_null: Vec<usize>,
    /// ラベル列ごとの空件数
    pub label_null: Vec<usize>,
    /// 漢字1文字だけのキーワード数
    pub single_cjk_keywords: usize,
    /// 漢字1文字だけのラベルセル数
    pub single_cjk_labels: usize,
}

/// 辞書構築時の診断レポート
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub null_keywords: Vec<DiagnosticRow>,
    pub single_char_keywords: Vec<DiagnosticRow>,
    /// 1文字キーワードを辞書に残したか
    pub single_char_retained: bool,
    pub duplicates: Vec<DuplicateRow>,
    /// 変換できずスキップした行
    pub malformed: Vec<String>,
    pub stats: DictionaryStats,
}

impl DiagnosticsReport {
    pub fn null_keyword_count(&self) -> usize {
        self.null_keywords.len()
    }

    pub fn single_char_count(&self) -> usize {
        self.single_char_keywords.len()
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// 報告すべき内容があるか
    pub fn has_findings(&self) -> bool {
        !self.null_keywords.is_empty()
            || !self.single_char_keywords.is_empty()
            || !self.duplicates.is_empty()
            || !self.malformed.is_empty()
    }

    /// 表示用の要約
    pub fn summary_lines(&self) -> Vec<String> {
        let s = &self.stats;
        let mut lines = vec![
            format!(
                "字典列: 非空 {}件 / 空 {}件 / 漢字1文字 {}件",
                s.keyword_non_null, s.keyword_null, s.single_cjk_keywords
            ),
        ];
        for (i, (non_null, null)) in s.label_non_null.iter().zip(&s.label_null).enumerate() {
            lines.push(format!("标签列{}: 非空 {}件 / 空 {}件", i + 1, non_null, null));
        }
        lines.push(format!("漢字1文字のラベル: {}件", s.single_cjk_labels));
        lines.push(format!("空キーワード（除外）: {}件", self.null_keyword_count()));
        lines.push(format!(
            "1文字キーワード（{}）: {}件",
            if self.single_char_retained { "保持" } else { "除外" },
            self.single_char_count()
        ));
        lines.push(format!("重複キーワード（破棄）: {}件", self.duplicate_count()));
        if !self.malformed.is_empty() {
            lines.push(format!("不正行（スキップ）: {}件", self.malformed.len()));
        }
        lines
    }
}

lazy_static::lazy_static! {
    static ref SINGLE_CJK: Regex = Regex::new(r"^[\x{4e00}-\x{9fff}]$").unwrap();
}

/// 漢字（CJK統合漢字）1文字だけのセルか
pub fn is_single_cjk(s: &str) -> bool {
    SINGLE_CJK.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_single_cjk() {
        assert!(is_single_cjk("茶"));
        assert!(!is_single_cjk("茶叶"));
        assert!(!is_single_cjk("a"));
        assert!(!is_single_cjk(""));
        assert!(!is_single_cjk("ア"));
    }

    #[test]
    fn test_empty_report_has_no_findings() {
        let report = DiagnosticsReport::default();
        assert!(!report.has_findings());
        assert_eq!(report.duplicate_count(), 0);
    }

    #[test]
    fn test_summary_lines_include_counts() {
        let report = DiagnosticsReport {
            duplicates: vec![DuplicateRow {
                row: 3,
                keyword: "x".into(),
                labels: vec![Some("L2".into())],
                kept_row: 1,
            }],
            stats: DictionaryStats {
                total_rows: 3,
                keyword_non_null: 3,
                label_non_null: vec![3],
                label_null: vec![0],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(report.has_findings());
        let lines = report.summary_lines();
        assert!(lines.iter().any(|l| l.contains("重複キーワード（破棄）: 1件")));
        assert!(lines.iter().any(|l| l.starts_with("标签列1")));
    }
}
