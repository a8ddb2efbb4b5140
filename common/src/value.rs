//! セル値の文字列化
//!
//! スプレッドシートのセルは数値・真偽値・エラー値などを持ちうるため、
//! 照合前にすべて文字列へ寄せる。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// スプレッドシートのセル値
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// `#N/A` などのエラー値
    Error(String),
}

impl CellValue {
    /// 文字列に変換する
    ///
    /// 空セルは `None`、エラー値は `MalformedInput`（行番号は呼び出し側で付け直す）。
    pub fn coerce(&self) -> Result<Option<String>> {
        match self {
            CellValue::Empty => Ok(None),
            CellValue::Text(s) => Ok(Some(s.clone())),
            CellValue::Int(i) => Ok(Some(i.to_string())),
            CellValue::Float(f) => Ok(Some(format_float(*f))),
            CellValue::Bool(b) => Ok(Some(if *b { "TRUE" } else { "FALSE" }.to_string())),
            CellValue::Error(code) => Err(Error::MalformedInput {
                row: 0,
                reason: format!("セルがエラー値です ({})", code),
            }),
        }
    }

    /// 行番号付きで文字列に変換する
    pub fn coerce_at(&self, row: usize) -> Result<Option<String>> {
        self.coerce().map_err(|e| match e {
            Error::MalformedInput { reason, .. } => Error::MalformedInput { row, reason },
            other => other,
        })
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// 整数値の浮動小数は小数部なしで出力（Excelは数値をすべてf64で持つ）
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// 空白のみ（または空）の文字列か
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_text_and_empty() {
        assert_eq!(CellValue::from("苹果").coerce().unwrap(), Some("苹果".to_string()));
        assert_eq!(CellValue::Empty.coerce().unwrap(), None);
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(CellValue::Int(42).coerce().unwrap(), Some("42".to_string()));
        assert_eq!(CellValue::Float(3.0).coerce().unwrap(), Some("3".to_string()));
        assert_eq!(CellValue::Float(2.5).coerce().unwrap(), Some("2.5".to_string()));
        assert_eq!(CellValue::Float(-7.0).coerce().unwrap(), Some("-7".to_string()));
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(CellValue::Bool(true).coerce().unwrap(), Some("TRUE".to_string()));
        assert_eq!(CellValue::Bool(false).coerce().unwrap(), Some("FALSE".to_string()));
    }

    #[test]
    fn test_coerce_error_value_carries_row() {
        let err = CellValue::Error("#N/A".into()).coerce_at(7).unwrap_err();
        match err {
            Error::MalformedInput { row, reason } => {
                assert_eq!(row, 7);
                assert!(reason.contains("#N/A"));
            }
            other => panic!("想定外のエラー: {:?}", other),
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
    }
}
