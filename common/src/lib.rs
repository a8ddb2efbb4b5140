//! Keyword Tagger Common Library
//!
//! 辞書の正規化とキーワード照合エンジン（ファイルI/Oを含まない）

pub mod types;
pub mod value;
pub mod error;
pub mod source;
pub mod diagnostics;
pub mod dictionary;
pub mod matcher;
pub mod summary;

pub use types::{KeywordEntry, MatchResult, SourceRecord, SuffixFlag};
pub use value::{is_blank, CellValue};
pub use error::{Error, Result};
pub use source::{prepare_sources, SourceBatch};
pub use diagnostics::{DiagnosticRow, DiagnosticsReport, DictionaryStats, DuplicateRow};
pub use dictionary::{BuildOptions, Dictionary, DictionaryBuilder, RawDictionaryRow, SingleCharPolicy};
pub use matcher::{MatchEngine, TieBreak};
pub use summary::MatchSummary;
