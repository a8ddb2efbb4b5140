//! Excel生成
//!
//! 照合結果シートと辞書診断シートを持つブックを出力する。

use super::layout::{
    join_labels, DiagnosticKind, DIAGNOSTICS_SHEET, DIAGNOSTIC_COLUMNS, KEYWORD_COL_WIDTH,
    LABEL_COL_WIDTH, RESULT_SHEET, SOURCE_COL_WIDTH, SUFFIX_COL_WIDTH,
};
use crate::config::Headers;
use crate::error::{KwTagError, Result};
use kwtag_common::{DiagnosticsReport, MatchResult};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};
use std::path::Path;

fn excel_err(context: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> KwTagError + '_ {
    move |e| KwTagError::ExcelGeneration(format!("{}: {}", context, e))
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA))
}

/// 照合結果をExcelに出力
///
/// # Arguments
/// * `results` - 照合結果（入力順）
/// * `label_columns` - ラベル列数（辞書の最大列数）
/// * `diagnostics` - 辞書診断（指定時は診断シートを追加）
pub fn write_results(
    results: &[MatchResult],
    label_columns: usize,
    headers: &Headers,
    diagnostics: Option<&DiagnosticsReport>,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(RESULT_SHEET)
            .map_err(excel_err("シート名設定エラー"))?;
        write_result_sheet(worksheet, results, label_columns.max(1), headers)?;
    }

    if let Some(report) = diagnostics {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(DIAGNOSTICS_SHEET)
            .map_err(excel_err("シート名設定エラー"))?;
        write_diagnostics_sheet(worksheet, report)?;
    }

    workbook
        .save(output_path)
        .map_err(excel_err("Excel保存エラー"))
}

fn write_result_sheet(
    worksheet: &mut Worksheet,
    results: &[MatchResult],
    label_columns: usize,
    headers: &Headers,
) -> Result<()> {
    let format = header_format();
    let label_titles = headers.label_titles(label_columns);
    let suffix_col = (2 + label_columns) as u16;

    // 見出し行
    worksheet
        .write_string_with_format(0, 0, &headers.source, &format)
        .map_err(excel_err("見出し書き込みエラー"))?;
    worksheet
        .write_string_with_format(0, 1, &headers.keyword, &format)
        .map_err(excel_err("見出し書き込みエラー"))?;
    for (i, title) in label_titles.iter().enumerate() {
        worksheet
            .write_string_with_format(0, (2 + i) as u16, title, &format)
            .map_err(excel_err("見出し書き込みエラー"))?;
    }
    worksheet
        .write_string_with_format(0, suffix_col, &headers.suffix, &format)
        .map_err(excel_err("見出し書き込みエラー"))?;

    // 列幅
    worksheet
        .set_column_width(0, SOURCE_COL_WIDTH)
        .map_err(excel_err("列幅設定エラー"))?;
    worksheet
        .set_column_width(1, KEYWORD_COL_WIDTH)
        .map_err(excel_err("列幅設定エラー"))?;
    for i in 0..label_columns {
        worksheet
            .set_column_width((2 + i) as u16, LABEL_COL_WIDTH)
            .map_err(excel_err("列幅設定エラー"))?;
    }
    worksheet
        .set_column_width(suffix_col, SUFFIX_COL_WIDTH)
        .map_err(excel_err("列幅設定エラー"))?;
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(excel_err("ウィンドウ枠固定エラー"))?;

    // 一致なしの行はキーワード・ラベル・末尾フラグを空セルのままにする
    for (i, result) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_string(row, 0, &result.source)
            .map_err(excel_err("値書き込みエラー"))?;

        let Some(keyword) = &result.matched_keyword else {
            continue;
        };
        worksheet
            .write_string(row, 1, keyword)
            .map_err(excel_err("値書き込みエラー"))?;

        for col in 0..label_columns {
            if let Some(label) = result.label(col) {
                worksheet
                    .write_string(row, (2 + col) as u16, label)
                    .map_err(excel_err("値書き込みエラー"))?;
            }
        }

        if let Some(flag) = result.is_suffix {
            worksheet
                .write_string(row, suffix_col, flag.as_str())
                .map_err(excel_err("値書き込みエラー"))?;
        }
    }

    Ok(())
}

/// 診断シートの1行
struct DiagnosticLine {
    kind: DiagnosticKind,
    row: Option<usize>,
    keyword: String,
    labels: String,
    note: String,
}

fn diagnostic_lines(report: &DiagnosticsReport) -> Vec<DiagnosticLine> {
    let mut lines = Vec::new();

    for r in &report.null_keywords {
        lines.push(DiagnosticLine {
            kind: DiagnosticKind::NullKeyword,
            row: Some(r.row),
            keyword: String::new(),
            labels: join_labels(&r.labels),
            note: "已排除".into(),
        });
    }

    let single_note = if report.single_char_retained { "已保留" } else { "已排除" };
    for r in &report.single_char_keywords {
        lines.push(DiagnosticLine {
            kind: DiagnosticKind::SingleChar,
            row: Some(r.row),
            keyword: r.keyword.clone().unwrap_or_default(),
            labels: join_labels(&r.labels),
            note: single_note.into(),
        });
    }

    for d in &report.duplicates {
        lines.push(DiagnosticLine {
            kind: DiagnosticKind::Duplicate,
            row: Some(d.row),
            keyword: d.keyword.clone(),
            labels: join_labels(&d.labels),
            note: format!("已丢弃，保留第{}行", d.kept_row),
        });
    }

    for m in &report.malformed {
        lines.push(DiagnosticLine {
            kind: DiagnosticKind::Malformed,
            row: None,
            keyword: String::new(),
            labels: String::new(),
            note: m.clone(),
        });
    }

    lines
}

fn write_diagnostics_sheet(worksheet: &mut Worksheet, report: &DiagnosticsReport) -> Result<()> {
    let format = header_format();

    for (col, column) in DIAGNOSTIC_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, column.title, &format)
            .map_err(excel_err("見出し書き込みエラー"))?;
        worksheet
            .set_column_width(col as u16, column.width)
            .map_err(excel_err("列幅設定エラー"))?;
    }

    for (i, line) in diagnostic_lines(report).iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_string(row, 0, line.kind.title())
            .map_err(excel_err("値書き込みエラー"))?;
        if let Some(source_row) = line.row {
            worksheet
                .write_number(row, 1, source_row as f64)
                .map_err(excel_err("値書き込みエラー"))?;
        }
        worksheet
            .write_string(row, 2, &line.keyword)
            .map_err(excel_err("値書き込みエラー"))?;
        worksheet
            .write_string(row, 3, &line.labels)
            .map_err(excel_err("値書き込みエラー"))?;
        worksheet
            .write_string(row, 4, &line.note)
            .map_err(excel_err("値書き込みエラー"))?;
    }

    Ok(())
}
