//! エラー型定義

use thiserror::Error;

/// 照合エンジンのエラー型
///
/// 重複キーワード・1文字キーワードはエラーではなく診断情報として扱う
/// （`DiagnosticsReport` を参照）。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// 空キーワード除外後に有効な辞書エントリが1件もない（照合前に致命的）
    #[error("辞書が不正です: {0}")]
    InvalidDictionary(String),

    /// 行単位の入力不正（該当行はスキップされ、処理は継続する）
    #[error("{row}行目の入力が不正です: {reason}")]
    MalformedInput { row: usize, reason: String },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
