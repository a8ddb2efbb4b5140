//! 照合結果キャッシュモジュール
//!
//! 入力ファイル2つの内容と照合オプションのSHA-256をキーにして結果をキャッシュし、
//! 同じ入力での再照合をスキップする。

use crate::error::Result;
use crate::export::report::SourceStats;
use kwtag_common::{DiagnosticsReport, MatchResult, SingleCharPolicy, TieBreak};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".kwtag-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// フィンガープリント → 照合結果のマップ
    entries: HashMap<String, CachedRun>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRun {
    pub source_name: String,
    pub dictionary_name: String,
    pub dictionary_entries: usize,
    pub label_columns: usize,
    pub source: SourceStats,
    pub diagnostics: DiagnosticsReport,
    pub results: Vec<MatchResult>,
}

/// フィンガープリントに含める照合オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerprintOptions {
    pub tie_break: TieBreak,
    pub single_char: SingleCharPolicy,
    pub source_header: bool,
    pub dictionary_header: bool,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（存在しない・破損・バージョン不一致は空扱い）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) => {
                if cache.version != Self::CURRENT_VERSION {
                    eprintln!("キャッシュバージョン不一致、再生成します");
                    return Self::default();
                }
                cache
            }
            Err(_) => Self::default(),
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除（削除した場合true）
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn get(&self, fingerprint: &str) -> Option<&CachedRun> {
        self.entries.get(fingerprint)
    }

    /// エントリを追加する
    ///
    /// 同じ照合対象・辞書ファイル名の古いエントリは置き換える。
    pub fn insert(&mut self, fingerprint: String, run: CachedRun) {
        self.entries.retain(|key, old| {
            *key == fingerprint
                || old.source_name != run.source_name
                || old.dictionary_name != run.dictionary_name
        });
        self.entries.insert(fingerprint, run);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 入力内容とオプションのフィンガープリント（SHA-256, hex）
pub fn fingerprint(source: &[u8], dictionary: &[u8], options: &FingerprintOptions) -> String {
    let mut hasher = Sha256::new();
    // 長さを前置して境界を曖昧にしない
    hasher.update((source.len() as u64).to_le_bytes());
    hasher.update(source);
    hasher.update((dictionary.len() as u64).to_le_bytes());
    hasher.update(dictionary);
    hasher.update(options.tie_break.to_string().as_bytes());
    hasher.update(match options.single_char {
        SingleCharPolicy::Retain => b"retain".as_slice(),
        SingleCharPolicy::Exclude => b"exclude".as_slice(),
    });
    hasher.update([options.source_header as u8, options.dictionary_header as u8]);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> FingerprintOptions {
        FingerprintOptions {
            tie_break: TieBreak::Rightmost,
            single_char: SingleCharPolicy::Retain,
            source_header: false,
            dictionary_header: false,
        }
    }

    #[test]
    fn test_fingerprint_stable() {
        let a = fingerprint(b"source", b"dict", &options());
        let b = fingerprint(b"source", b"dict", &options());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_inputs_and_options() {
        let base = fingerprint(b"source", b"dict", &options());
        assert_ne!(base, fingerprint(b"source2", b"dict", &options()));
        assert_ne!(base, fingerprint(b"source", b"dict2", &options()));
        // 境界の移動も区別する
        assert_ne!(base, fingerprint(b"sourced", b"ict", &options()));

        let leftmost = FingerprintOptions {
            tie_break: TieBreak::Leftmost,
            ..options()
        };
        assert_ne!(base, fingerprint(b"source", b"dict", &leftmost));

        let header = FingerprintOptions {
            source_header: true,
            ..options()
        };
        assert_ne!(base, fingerprint(b"source", b"dict", &header));
    }
}
