//! 出力シートのレイアウト定義
//!
//! 列幅は Excel の文字幅単位

// ============================================
// シート名
// ============================================

pub const RESULT_SHEET: &str = "结果";
pub const DIAGNOSTICS_SHEET: &str = "诊断";

// ============================================
// 列幅
// ============================================

pub const SOURCE_COL_WIDTH: f64 = 48.0;
pub const KEYWORD_COL_WIDTH: f64 = 18.0;
pub const LABEL_COL_WIDTH: f64 = 16.0;
pub const SUFFIX_COL_WIDTH: f64 = 10.0;

// ============================================
// 診断シート
// ============================================

/// 診断シートの列
#[derive(Debug, Clone, Copy)]
pub struct ColumnDefinition {
    pub title: &'static str,
    pub width: f64,
}

pub const DIAGNOSTIC_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition { title: "类型", width: 14.0 },
    ColumnDefinition { title: "行号", width: 8.0 },
    ColumnDefinition { title: "字典", width: 18.0 },
    ColumnDefinition { title: "标签", width: 24.0 },
    ColumnDefinition { title: "说明", width: 40.0 },
];

/// 診断行の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    NullKeyword,
    SingleChar,
    Duplicate,
    Malformed,
}

impl DiagnosticKind {
    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticKind::NullKeyword => "空关键词",
            DiagnosticKind::SingleChar => "单字关键词",
            DiagnosticKind::Duplicate => "重复关键词",
            DiagnosticKind::Malformed => "格式错误",
        }
    }
}

/// ラベル列をセル表示用に連結（欠損は空文字）
pub fn join_labels(labels: &[Option<String>]) -> String {
    labels
        .iter()
        .map(|l| l.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" / ")
}
