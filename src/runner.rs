//! バッチ照合
//!
//! レコードを連続したバッチに分割して照合し、バッチごとに進捗を更新する。
//! 中断フラグはバッチの境界でのみ確認する。

use crate::error::{KwTagError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use kwtag_common::{MatchEngine, MatchResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 協調的な中断フラグ
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Ctrl+Cで中断フラグを立てる（登録はプロセスで1回のみ）
pub fn cancel_on_ctrl_c(cancel: &CancelFlag) -> Result<()> {
    let flag = cancel.clone();
    ctrlc::set_handler(move || flag.cancel())
        .map_err(|e| KwTagError::Signal(e.to_string()))
}

/// バッチ照合オプション
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub batch_size: usize,
    /// バッチ内をrayonで並列処理する
    pub parallel: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            parallel: true,
        }
    }
}

/// 照合用プログレスバー（経過時間・残り時間つき）
pub fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template(
        "  処理進捗 [{bar:40.cyan/blue}] {pos}/{len} | 経過 {elapsed_precise} | 残り {eta_precise}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=>-");
    bar.set_style(style);
    bar
}

/// 全レコードをバッチ単位で照合する
///
/// 出力は入力と同じ順序・同じ件数。空辞書は照合前にエラー。
pub fn run_batches<S: AsRef<str> + Sync>(
    engine: &MatchEngine<'_>,
    records: &[S],
    options: RunOptions,
    progress: &ProgressBar,
    cancel: &CancelFlag,
) -> Result<Vec<MatchResult>> {
    engine.dictionary().ensure_usable()?;

    let batch_size = options.batch_size.max(1);
    progress.set_length(records.len() as u64);
    let mut results = Vec::with_capacity(records.len());

    for batch in records.chunks(batch_size) {
        if cancel.is_cancelled() {
            progress.abandon();
            return Err(KwTagError::Cancelled);
        }

        let batch_results = if options.parallel {
            engine.match_all_par(batch)?
        } else {
            engine.match_all(batch)?
        };

        results.extend(batch_results);
        progress.inc(batch.len() as u64);
    }

    progress.finish_and_clear();
    Ok(results)
}
