//! スプレッドシート読み込みモジュール
//!
//! 先頭シートのA列を照合対象、A列をキーワード・B列以降をラベルとする辞書として読む。
//! xlsx / xls / ods は拡張子から自動判別する。

mod cell;

pub use cell::to_cell_value;

use crate::error::{KwTagError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use kwtag_common::{CellValue, RawDictionaryRow};
use std::path::Path;

/// 先頭シートを読み込む
fn first_sheet(path: &Path) -> Result<Range<Data>> {
    if !path.exists() {
        return Err(KwTagError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| KwTagError::ExcelRead(format!("{}: {}", path.display(), e)))?;

    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| KwTagError::SheetNotFound(path.display().to_string()))?
        .map_err(|e| KwTagError::ExcelRead(format!("{}: {}", path.display(), e)))
}

/// 使用範囲の最終位置 (行, 列)。空シートは None
fn used_end(range: &Range<Data>) -> Option<(u32, u32)> {
    if range.is_empty() {
        None
    } else {
        range.end()
    }
}

fn cell_at(range: &Range<Data>, row: u32, col: u32) -> CellValue {
    range
        .get_value((row, col))
        .map(to_cell_value)
        .unwrap_or(CellValue::Empty)
}

/// 先頭データ行のインデックス（0始まり）
fn first_data_row(header: bool) -> u32 {
    if header { 1 } else { 0 }
}

/// 照合対象（先頭シートのA列）を読み込む
///
/// 戻り値の先頭要素はスプレッドシートの `first_data_row + 1` 行目に対応する。
pub fn read_sources(path: &Path, header: bool) -> Result<Vec<CellValue>> {
    let range = first_sheet(path)?;
    let Some((last_row, _)) = used_end(&range) else {
        return Ok(Vec::new());
    };

    Ok((first_data_row(header)..=last_row)
        .map(|row| cell_at(&range, row, 0))
        .collect())
}

/// 照合対象の先頭行番号（1始まり）
pub fn source_first_row(header: bool) -> usize {
    first_data_row(header) as usize + 1
}

/// 辞書（A列: キーワード、B列以降: ラベル）を読み込む
///
/// シート幅が1列しかない場合、各行はラベルなしになり辞書構築時に不正行として報告される。
pub fn read_dictionary(path: &Path, header: bool) -> Result<Vec<RawDictionaryRow>> {
    let range = first_sheet(path)?;
    let Some((last_row, last_col)) = used_end(&range) else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for row in first_data_row(header)..=last_row {
        let keyword = cell_at(&range, row, 0);
        let labels: Vec<CellValue> = (1..=last_col).map(|col| cell_at(&range, row, col)).collect();

        // 完全な空行は読み飛ばす
        if keyword == CellValue::Empty && labels.iter().all(|l| *l == CellValue::Empty) {
            continue;
        }

        rows.push(RawDictionaryRow {
            row: row as usize + 1,
            keyword,
            labels,
        });
    }

    Ok(rows)
}

/// ファイル内容のバイト列（キャッシュのフィンガープリント用）
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(KwTagError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read(path)?)
}
