//! 照合対象レコードの前処理

use crate::error::Error;
use crate::types::SourceRecord;
use crate::value::{is_blank, CellValue};

/// 前処理済みのレコード群
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    /// 照合対象（入力順）
    pub records: Vec<SourceRecord>,
    /// 空白のため除外した件数
    pub dropped_blank: usize,
    /// 変換できずスキップした行
    pub malformed: Vec<Error>,
}

impl SourceBatch {
    pub fn texts(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.text.as_str()).collect()
    }
}

/// セル値を文字列化し、空白を除外する
///
/// `first_row` は先頭セルの行番号（ヘッダー行をスキップした場合は2）。
pub fn prepare_sources(raw: Vec<CellValue>, first_row: usize) -> SourceBatch {
    let mut batch = SourceBatch::default();

    for (i, cell) in raw.into_iter().enumerate() {
        let row = first_row + i;
        match cell.coerce_at(row) {
            Ok(Some(text)) if !is_blank(&text) => {
                batch.records.push(SourceRecord { row, text });
            }
            Ok(_) => batch.dropped_blank += 1,
            Err(e) => batch.malformed.push(e),
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_dropped() {
        let raw = vec![
            CellValue::from("苹果"),
            CellValue::Empty,
            CellValue::from("   "),
            CellValue::Float(12.0),
        ];
        let batch = prepare_sources(raw, 1);
        assert_eq!(batch.texts(), vec!["苹果", "12"]);
        assert_eq!(batch.dropped_blank, 2);
        assert!(batch.malformed.is_empty());
    }

    #[test]
    fn test_rows_keep_spreadsheet_numbering() {
        let raw = vec![CellValue::Empty, CellValue::from("a"), CellValue::from("b")];
        let batch = prepare_sources(raw, 2);
        assert_eq!(batch.records[0].row, 3);
        assert_eq!(batch.records[1].row, 4);
    }

    #[test]
    fn test_error_cells_reported_and_skipped() {
        let raw = vec![
            CellValue::from("a"),
            CellValue::Error("#DIV/0!".into()),
            CellValue::from("b"),
        ];
        let batch = prepare_sources(raw, 1);
        assert_eq!(batch.texts(), vec!["a", "b"]);
        assert_eq!(batch.malformed.len(), 1);
        assert!(matches!(batch.malformed[0], Error::MalformedInput { row: 2, .. }));
    }
}
