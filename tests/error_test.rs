//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use kwtag::error::KwTagError;
use kwtag::reader;
use std::path::Path;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_read_nonexistent_file() {
    let result = reader::read_sources(Path::new("/nonexistent/path/12345.xlsx"), false);
    assert!(matches!(result, Err(KwTagError::FileNotFound(_))));
}

/// KwTagErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        KwTagError::Config("テスト設定エラー".to_string()),
        KwTagError::FileNotFound("a.xlsx".to_string()),
        KwTagError::SheetNotFound("b.xlsx".to_string()),
        KwTagError::ExcelRead("読み込み失敗".to_string()),
        KwTagError::ExcelGeneration("Excel生成エラー".to_string()),
        KwTagError::Prompt("入力失敗".to_string()),
        KwTagError::NoSourceRecords("a.xlsx".to_string()),
        KwTagError::Cancelled,
        KwTagError::Signal("登録失敗".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: KwTagError = io_err.into();

    assert!(matches!(err, KwTagError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: KwTagError = json_err.into();

    assert!(matches!(err, KwTagError::JsonParse(_)));
}

/// kwtag_common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let common_err = kwtag_common::Error::InvalidDictionary("空".to_string());
    let err: KwTagError = common_err.into();

    assert!(matches!(err, KwTagError::Common(_)));
}

/// エラーチェーン（透過的エラー）
#[test]
fn test_error_chain_transparent() {
    let common_err = kwtag_common::Error::MalformedInput {
        row: 3,
        reason: "#N/A".to_string(),
    };
    let err: KwTagError = common_err.into();

    // 透過的エラーなのでメッセージがそのまま表示される
    let display = format!("{}", err);
    assert!(display.contains("3行目"));
    assert!(display.contains("#N/A"));
}
