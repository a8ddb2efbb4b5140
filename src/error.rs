use thiserror::Error;

#[derive(Error, Debug)]
pub enum KwTagError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("Excel読み込みエラー: {0}")]
    ExcelRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("照合対象のレコードがありません: {0}")]
    NoSourceRecords(String),

    #[error("処理が中断されました")]
    Cancelled,

    #[error("シグナルハンドラ登録エラー: {0}")]
    Signal(String),

    #[error(transparent)]
    Common(#[from] kwtag_common::Error),
}

pub type Result<T> = std::result::Result<T, KwTagError>;
