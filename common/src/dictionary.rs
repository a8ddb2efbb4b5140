//! 辞書の構築
//!
//! 生の辞書行（キーワード + ラベル列）を正規化し、照合用の `Dictionary` を作る。
//!
//! ## 処理フロー
//! 1. キーワード・ラベルを文字列化（変換できない行は不正行として記録）
//! 2. 空キーワードを除外、1文字キーワードを記録（除外するかはオプション）
//! 3. 重複キーワードを除去（最初の出現を採用）
//! 4. キーワード長の降順に並べ替え（照合の優先順）

use crate::diagnostics::{
    is_single_cjk, DiagnosticRow, DiagnosticsReport, DictionaryStats, DuplicateRow,
};
use crate::error::{Error, Result};
use crate::types::KeywordEntry;
use crate::value::{is_blank, CellValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 生の辞書行
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawDictionaryRow {
    /// 元データの行番号（1始まり）
    pub row: usize,
    pub keyword: CellValue,
    pub labels: Vec<CellValue>,
}

impl RawDictionaryRow {
    pub fn new(row: usize, keyword: impl Into<CellValue>, labels: Vec<CellValue>) -> Self {
        Self {
            row,
            keyword: keyword.into(),
            labels,
        }
    }
}

/// 1文字キーワードの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleCharPolicy {
    /// 診断に記録した上で辞書に残す
    #[default]
    Retain,
    /// 診断に記録し、辞書から除外する
    Exclude,
}

/// 辞書構築オプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    pub single_char: SingleCharPolicy,
}

/// 照合用辞書（構築後は不変）
///
/// キーワードは一意で、キーワード長（文字数）の降順に並ぶ。
/// デシリアライズ時も同じ正規化を通す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredDictionary")]
pub struct Dictionary {
    entries: Vec<KeywordEntry>,
}

/// 保存形式の辞書（正規化前）
#[derive(Deserialize)]
struct StoredDictionary {
    entries: Vec<KeywordEntry>,
}

impl From<StoredDictionary> for Dictionary {
    fn from(stored: StoredDictionary) -> Self {
        let candidates = stored
            .entries
            .into_iter()
            .filter(|e| !is_blank(&e.keyword))
            .collect();
        let mut entries = dedup_first_wins(candidates, &mut Vec::new());
        sort_by_priority(&mut entries);
        Dictionary { entries }
    }
}

impl Dictionary {
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ラベル列数（エントリ中の最大）
    pub fn label_columns(&self) -> usize {
        self.entries.iter().map(|e| e.labels.len()).max().unwrap_or(0)
    }

    /// 照合に使えるか（空辞書は致命的エラー）
    pub fn ensure_usable(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::InvalidDictionary(
                "空キーワードを除外した結果、有効なキーワードが0件です".into(),
            ));
        }
        Ok(())
    }
}

/// 辞書ビルダー
#[derive(Debug, Clone, Default)]
pub struct DictionaryBuilder {
    options: BuildOptions,
}

/// 文字列化済みの辞書行
struct CoercedRow {
    row: usize,
    keyword: Option<String>,
    labels: Vec<Option<String>>,
}

impl DictionaryBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// 辞書を構築する
    ///
    /// 診断対象の条件ではエラーにしない。空辞書かどうかは
    /// `Dictionary::ensure_usable` で照合前に確認する。
    pub fn build(&self, rows: Vec<RawDictionaryRow>) -> (Dictionary, DiagnosticsReport) {
        let mut report = DiagnosticsReport {
            single_char_retained: self.options.single_char == SingleCharPolicy::Retain,
            ..Default::default()
        };
        report.stats.total_rows = rows.len();

        let coerced = coerce_rows(rows, &mut report.malformed);
        report.stats = collect_stats(&coerced, report.stats.total_rows);

        let mut candidates = Vec::with_capacity(coerced.len());
        for row in coerced {
            let keyword = match row.keyword {
                Some(k) if !is_blank(&k) => k,
                _ => {
                    report.null_keywords.push(DiagnosticRow {
                        row: row.row,
                        keyword: None,
                        labels: row.labels,
                    });
                    continue;
                }
            };

            if keyword.chars().count() == 1 {
                report.single_char_keywords.push(DiagnosticRow {
                    row: row.row,
                    keyword: Some(keyword.clone()),
                    labels: row.labels.clone(),
                });
                if self.options.single_char == SingleCharPolicy::Exclude {
                    continue;
                }
            }

            candidates.push(KeywordEntry {
                keyword,
                labels: row.labels,
                row: row.row,
            });
        }

        let mut entries = dedup_first_wins(candidates, &mut report.duplicates);
        sort_by_priority(&mut entries);

        (Dictionary { entries }, report)
    }
}

/// 照合の優先順に並べる（安定ソート: 同じ長さは最初の出現順を保つ）
fn sort_by_priority(entries: &mut [KeywordEntry]) {
    entries.sort_by(|a, b| b.char_len().cmp(&a.char_len()));
}

fn coerce_rows(rows: Vec<RawDictionaryRow>, malformed: &mut Vec<String>) -> Vec<CoercedRow> {
    let mut out = Vec::with_capacity(rows.len());

    for raw in rows {
        if raw.labels.is_empty() {
            malformed.push(
                Error::MalformedInput {
                    row: raw.row,
                    reason: "ラベル列がありません".into(),
                }
                .to_string(),
            );
            continue;
        }

        let keyword = match raw.keyword.coerce_at(raw.row) {
            Ok(k) => k,
            Err(e) => {
                malformed.push(e.to_string());
                continue;
            }
        };

        let labels: Result<Vec<Option<String>>> =
            raw.labels.iter().map(|l| l.coerce_at(raw.row)).collect();
        match labels {
            Ok(labels) => out.push(CoercedRow {
                row: raw.row,
                keyword,
                labels,
            }),
            Err(e) => malformed.push(e.to_string()),
        }
    }

    out
}

fn collect_stats(rows: &[CoercedRow], total_rows: usize) -> DictionaryStats {
    let columns = rows.iter().map(|r| r.labels.len()).max().unwrap_or(0);
    let mut stats = DictionaryStats {
        total_rows,
        label_non_null: vec![0; columns],
        label_null: vec![0; columns],
        ..Default::default()
    };

    for row in rows {
        match row.keyword.as_deref() {
            Some(k) if !is_blank(k) => {
                stats.keyword_non_null += 1;
                if is_single_cjk(k) {
                    stats.single_cjk_keywords += 1;
                }
            }
            _ => stats.keyword_null += 1,
        }

        for col in 0..columns {
            match row.labels.get(col).and_then(|l| l.as_deref()) {
                Some(l) if !is_blank(l) => {
                    stats.label_non_null[col] += 1;
                    if is_single_cjk(l) {
                        stats.single_cjk_labels += 1;
                    }
                }
                _ => stats.label_null[col] += 1,
            }
        }
    }

    stats
}

/// 重複キーワードを除去（入力順で最初の出現を採用）
fn dedup_first_wins(
    candidates: Vec<KeywordEntry>,
    duplicates: &mut Vec<DuplicateRow>,
) -> Vec<KeywordEntry> {
    let mut kept_rows: HashMap<String, usize> = HashMap::new();
    let mut entries = Vec::with_capacity(candidates.len());

    for entry in candidates {
        if let Some(&kept_row) = kept_rows.get(&entry.keyword) {
            duplicates.push(DuplicateRow {
                row: entry.row,
                keyword: entry.keyword,
                labels: entry.labels,
                kept_row,
            });
            continue;
        }
        kept_rows.insert(entry.keyword.clone(), entry.row);
        entries.push(entry);
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize, keyword: &str, label: &str) -> RawDictionaryRow {
        RawDictionaryRow::new(n, keyword, vec![CellValue::from(label)])
    }

    fn keywords(dict: &Dictionary) -> Vec<&str> {
        dict.entries().iter().map(|e| e.keyword.as_str()).collect()
    }

    #[test]
    fn test_duplicate_first_occurrence_wins() {
        let (dict, report) =
            DictionaryBuilder::default().build(vec![row(1, "x", "L1"), row(2, "x", "L2")]);

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.entries()[0].labels, vec![Some("L1".to_string())]);
        assert_eq!(report.duplicate_count(), 1);
        assert_eq!(report.duplicates[0].row, 2);
        assert_eq!(report.duplicates[0].kept_row, 1);
    }

    #[test]
    fn test_sorted_by_length_descending() {
        let (dict, _) = DictionaryBuilder::default().build(vec![
            row(1, "ab", "L1"),
            row(2, "abcd", "L2"),
            row(3, "abc", "L3"),
            row(4, "cd", "L4"),
        ]);
        assert_eq!(keywords(&dict), vec!["abcd", "abc", "ab", "cd"]);
    }

    #[test]
    fn test_length_is_measured_in_characters() {
        // "苹果" は2文字（6バイト）、"abc" は3文字
        let (dict, _) =
            DictionaryBuilder::default().build(vec![row(1, "苹果", "L1"), row(2, "abc", "L2")]);
        assert_eq!(keywords(&dict), vec!["abc", "苹果"]);
    }

    #[test]
    fn test_null_and_blank_keywords_excluded() {
        let (dict, report) = DictionaryBuilder::default().build(vec![
            RawDictionaryRow::new(1, CellValue::Empty, vec![CellValue::from("L1")]),
            row(2, "", "L2"),
            row(3, "  ", "L3"),
            row(4, "ok", "L4"),
        ]);
        assert_eq!(keywords(&dict), vec!["ok"]);
        assert_eq!(report.null_keyword_count(), 3);
        assert_eq!(report.stats.keyword_null, 3);
        assert_eq!(report.stats.keyword_non_null, 1);
    }

    #[test]
    fn test_all_null_keywords_yield_empty_dictionary() {
        let (dict, report) = DictionaryBuilder::default().build(vec![
            RawDictionaryRow::new(1, CellValue::Empty, vec![CellValue::from("L1")]),
            row(2, "", "L2"),
        ]);
        assert!(dict.is_empty());
        assert_eq!(report.null_keyword_count(), 2);
        assert!(matches!(dict.ensure_usable(), Err(Error::InvalidDictionary(_))));
    }

    #[test]
    fn test_single_char_retained_by_default() {
        let (dict, report) =
            DictionaryBuilder::default().build(vec![row(1, "茶", "L1"), row(2, "茶叶", "L2")]);
        assert_eq!(keywords(&dict), vec!["茶叶", "茶"]);
        assert_eq!(report.single_char_count(), 1);
        assert!(report.single_char_retained);
        assert_eq!(report.stats.single_cjk_keywords, 1);
    }

    #[test]
    fn test_single_char_excluded_by_policy() {
        let builder = DictionaryBuilder::new(BuildOptions {
            single_char: SingleCharPolicy::Exclude,
        });
        let (dict, report) = builder.build(vec![row(1, "茶", "L1"), row(2, "茶叶", "L2")]);
        assert_eq!(keywords(&dict), vec!["茶叶"]);
        assert_eq!(report.single_char_count(), 1);
        assert!(!report.single_char_retained);
    }

    #[test]
    fn test_numeric_keywords_coerced() {
        let (dict, _) = DictionaryBuilder::default().build(vec![RawDictionaryRow::new(
            1,
            CellValue::Float(2024.0),
            vec![CellValue::from("年份")],
        )]);
        assert_eq!(keywords(&dict), vec!["2024"]);
    }

    #[test]
    fn test_multiple_label_columns_keep_order_and_nulls() {
        let (dict, report) = DictionaryBuilder::default().build(vec![RawDictionaryRow::new(
            1,
            "绿茶",
            vec![CellValue::from("饮料"), CellValue::Empty, CellValue::from("茶")],
        )]);
        assert_eq!(
            dict.entries()[0].labels,
            vec![Some("饮料".to_string()), None, Some("茶".to_string())]
        );
        assert_eq!(dict.label_columns(), 3);
        assert_eq!(report.stats.label_non_null, vec![1, 0, 1]);
        assert_eq!(report.stats.label_null, vec![0, 1, 0]);
        assert_eq!(report.stats.single_cjk_labels, 1);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let (dict, report) = DictionaryBuilder::default().build(vec![
            RawDictionaryRow::new(1, CellValue::Error("#REF!".into()), vec![CellValue::from("L")]),
            RawDictionaryRow::new(2, "no-label", vec![]),
            RawDictionaryRow::new(3, "bad-label", vec![CellValue::Error("#N/A".into())]),
            row(4, "fine", "L4"),
        ]);
        assert_eq!(keywords(&dict), vec!["fine"]);
        assert_eq!(report.malformed.len(), 3);
        assert_eq!(report.stats.total_rows, 4);
    }

    #[test]
    fn test_equal_length_keeps_input_order() {
        let (dict, _) = DictionaryBuilder::default().build(vec![
            row(1, "ab", "L1"),
            row(2, "xy", "L2"),
            row(3, "mn", "L3"),
        ]);
        assert_eq!(keywords(&dict), vec!["ab", "xy", "mn"]);
    }

    #[test]
    fn test_deserialize_normalizes_entries() {
        let json = r#"{"entries":[
            {"keyword":"ab","labels":["L1"]},
            {"keyword":"a","labels":["L2"]},
            {"keyword":"","labels":["L3"]},
            {"keyword":"abc","labels":["L4"]},
            {"keyword":"abc","labels":["L5"]}
        ]}"#;
        let dict: Dictionary = serde_json::from_str(json).unwrap();

        assert_eq!(keywords(&dict), vec!["abc", "ab", "a"]);
        assert_eq!(dict.entries()[0].labels, vec![Some("L4".to_string())]);

        let r = crate::matcher::MatchEngine::new(&dict, crate::matcher::TieBreak::Rightmost)
            .match_one("xxabc");
        assert_eq!(r.matched_keyword.as_deref(), Some("abc"));
    }

    #[test]
    fn test_serialize_then_deserialize_keeps_order() {
        let (dict, _) = DictionaryBuilder::default().build(vec![
            row(1, "ab", "L1"),
            row(2, "abcd", "L2"),
            row(3, "xy", "L3"),
        ]);
        let json = serde_json::to_string(&dict).unwrap();
        let restored: Dictionary = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, dict);
    }
}
