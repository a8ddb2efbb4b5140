//! 読み込みから照合までの一連の処理
//!
//! ## 処理フロー
//! 1. 辞書ファイル読み込み → 辞書構築（診断情報を収集）
//! 2. 空辞書チェック（照合前に中止）
//! 3. 照合対象読み込み → 空白除外
//! 4. バッチ照合（キャッシュ有効時はヒットすればスキップ）

use crate::cache::{fingerprint, CacheFile, CachedRun, FingerprintOptions};
use crate::error::{KwTagError, Result};
use crate::export::report::SourceStats;
use crate::reader;
use crate::runner::{run_batches, CancelFlag, RunOptions};
use indicatif::ProgressBar;
use kwtag_common::{
    prepare_sources, BuildOptions, DiagnosticsReport, Dictionary, DictionaryBuilder, MatchEngine,
    MatchResult, SingleCharPolicy, TieBreak,
};
use std::path::Path;

/// ラベル付けのオプション
#[derive(Debug, Clone, Copy)]
pub struct TagOptions {
    pub tie_break: TieBreak,
    pub single_char: SingleCharPolicy,
    pub source_header: bool,
    pub dictionary_header: bool,
    pub run: RunOptions,
    pub use_cache: bool,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Rightmost,
            single_char: SingleCharPolicy::Retain,
            source_header: false,
            dictionary_header: false,
            run: RunOptions::default(),
            use_cache: false,
        }
    }
}

/// ラベル付けの結果
#[derive(Debug, Clone)]
pub struct TagOutcome {
    pub results: Vec<MatchResult>,
    pub diagnostics: DiagnosticsReport,
    pub dictionary_entries: usize,
    pub label_columns: usize,
    pub source: SourceStats,
    pub from_cache: bool,
}

/// 辞書ファイルを読み込んで構築する（照合はしない）
pub fn load_dictionary(
    path: &Path,
    header: bool,
    single_char: SingleCharPolicy,
) -> Result<(Dictionary, DiagnosticsReport)> {
    let rows = reader::read_dictionary(path, header)?;
    Ok(DictionaryBuilder::new(BuildOptions { single_char }).build(rows))
}

/// 照合対象と辞書のファイルからラベル付け結果を作る
pub fn tag_files(
    source_path: &Path,
    dictionary_path: &Path,
    options: &TagOptions,
    progress: Option<&ProgressBar>,
    cancel: &CancelFlag,
) -> Result<TagOutcome> {
    let cache_dir = source_path.parent().unwrap_or_else(|| Path::new("."));
    let cache_key = if options.use_cache {
        let source_bytes = reader::read_bytes(source_path)?;
        let dictionary_bytes = reader::read_bytes(dictionary_path)?;
        Some(fingerprint(
            &source_bytes,
            &dictionary_bytes,
            &FingerprintOptions {
                tie_break: options.tie_break,
                single_char: options.single_char,
                source_header: options.source_header,
                dictionary_header: options.dictionary_header,
            },
        ))
    } else {
        None
    };

    if let Some(key) = &cache_key {
        if let Some(run) = CacheFile::load(cache_dir).get(key) {
            return Ok(TagOutcome {
                results: run.results.clone(),
                diagnostics: run.diagnostics.clone(),
                dictionary_entries: run.dictionary_entries,
                label_columns: run.label_columns,
                source: run.source.clone(),
                from_cache: true,
            });
        }
    }

    let (dictionary, diagnostics) =
        load_dictionary(dictionary_path, options.dictionary_header, options.single_char)?;
    dictionary.ensure_usable()?;

    let raw_sources = reader::read_sources(source_path, options.source_header)?;
    let batch = prepare_sources(raw_sources, reader::source_first_row(options.source_header));
    if batch.records.is_empty() {
        return Err(KwTagError::NoSourceRecords(source_path.display().to_string()));
    }
    let source = SourceStats {
        records: batch.records.len(),
        dropped_blank: batch.dropped_blank,
        malformed: batch.malformed.iter().map(|e| e.to_string()).collect(),
    };

    let engine = MatchEngine::new(&dictionary, options.tie_break);
    let texts = batch.texts();
    let hidden;
    let progress = match progress {
        Some(p) => p,
        None => {
            hidden = ProgressBar::hidden();
            &hidden
        }
    };
    let results = run_batches(&engine, &texts, options.run, progress, cancel)?;

    let outcome = TagOutcome {
        results,
        diagnostics,
        dictionary_entries: dictionary.len(),
        label_columns: dictionary.label_columns(),
        source,
        from_cache: false,
    };

    if let Some(key) = cache_key {
        let mut cache = CacheFile::load(cache_dir);
        cache.insert(
            key,
            CachedRun {
                source_name: file_name(source_path),
                dictionary_name: file_name(dictionary_path),
                dictionary_entries: outcome.dictionary_entries,
                label_columns: outcome.label_columns,
                source: outcome.source.clone(),
                diagnostics: outcome.diagnostics.clone(),
                results: outcome.results.clone(),
            },
        );
        // キャッシュ保存の失敗は結果に影響させない
        if let Err(e) = cache.save(cache_dir) {
            eprintln!("⚠ キャッシュ保存エラー: {}", e);
        }
    }

    Ok(outcome)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
