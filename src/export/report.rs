//! 実行レポート（JSON）

use crate::error::Result;
use kwtag_common::{DiagnosticsReport, MatchSummary, SingleCharPolicy, TieBreak};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 照合対象側の前処理結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStats {
    pub records: usize,
    pub dropped_blank: usize,
    pub malformed: Vec<String>,
}

/// 実行レポート
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub generated_at: String,
    pub source_path: String,
    pub dictionary_path: String,
    pub output_path: String,
    pub tie_break: TieBreak,
    pub single_char: SingleCharPolicy,
    pub dictionary_entries: usize,
    pub from_cache: bool,
    pub source: SourceStats,
    pub diagnostics: DiagnosticsReport,
    pub summary: MatchSummary,
}

/// 現在時刻（レポート用）
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// レポートをJSONで保存
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
