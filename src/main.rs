use clap::Parser;
use kwtag::{cache, cli, config, error, export, pipeline, runner};
use cli::{Cli, Commands};
use config::Config;
use dialoguer::Confirm;
use error::{KwTagError, Result};
use kwtag_common::{DiagnosticsReport, MatchResult, MatchSummary, SingleCharPolicy};
use std::path::PathBuf;

fn main() {
    if let Err(e) = run() {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Tag {
            source,
            dictionary,
            output,
            tie_break,
            exclude_single_char,
            batch_size,
            source_header,
            dictionary_header,
            report,
            preview,
            use_cache,
            sequential,
            yes,
        } => {
            println!("🏷  kwtag - ラベル付け\n");

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let output_path = export::output_path_for(&output_dir, &config.output_file_name);

            if output_path.exists() && !yes {
                let overwrite = Confirm::new()
                    .with_prompt(format!("{} は既に存在します。上書きしますか？", output_path.display()))
                    .default(false)
                    .interact()
                    .map_err(|e| KwTagError::Prompt(e.to_string()))?;
                if !overwrite {
                    println!("中止しました");
                    return Ok(());
                }
            }

            let single_char = if exclude_single_char {
                SingleCharPolicy::Exclude
            } else {
                config.single_char_policy()
            };
            let options = pipeline::TagOptions {
                tie_break: tie_break.unwrap_or(config.tie_break),
                single_char,
                source_header,
                dictionary_header,
                run: runner::RunOptions {
                    batch_size: batch_size.unwrap_or(config.batch_size),
                    parallel: !sequential,
                },
                use_cache,
            };

            if cli.verbose {
                println!("  照合対象: {}", source.display());
                println!("  辞書: {}", dictionary.display());
                println!("  優先規則: {}", options.tie_break);
                println!("  バッチサイズ: {}", options.run.batch_size);
            }

            // 1. 読み込み・照合
            println!("[1/3] 照合中...{}", if use_cache { " (キャッシュ有効)" } else { "" });
            let progress = runner::progress_bar(0);
            let cancel = runner::CancelFlag::new();
            if let Err(e) = runner::cancel_on_ctrl_c(&cancel) {
                eprintln!("⚠ {}", e);
            }
            let outcome =
                pipeline::tag_files(&source, &dictionary, &options, Some(&progress), &cancel)?;
            progress.finish_and_clear();
            if outcome.from_cache {
                println!("✔ キャッシュから結果を取得");
            }
            println!(
                "✔ 辞書 {}件 / 照合対象 {}件 (空白除外 {}件)\n",
                outcome.dictionary_entries, outcome.source.records, outcome.source.dropped_blank
            );
            for m in &outcome.source.malformed {
                eprintln!("⚠ {}", m);
            }
            print_diagnostics(&outcome.diagnostics, cli.verbose);

            // 2. プレビュー
            let preview_rows = preview.unwrap_or(config.preview_rows);
            if preview_rows > 0 {
                println!("[2/3] 先頭{}件の結果:", preview_rows.min(outcome.results.len()));
                print_preview(&outcome.results, preview_rows);
                println!();
            }

            // 3. 出力
            println!("[3/3] Excelを出力中...");
            export::excel::write_results(
                &outcome.results,
                outcome.label_columns,
                &config.headers,
                Some(&outcome.diagnostics),
                &output_path,
            )?;
            println!("✔ Excel出力: {}", output_path.display());

            let summary = MatchSummary::from_results(&outcome.results);
            if let Some(report_path) = report {
                let run_report = export::report::RunReport {
                    generated_at: export::report::timestamp(),
                    source_path: source.display().to_string(),
                    dictionary_path: dictionary.display().to_string(),
                    output_path: output_path.display().to_string(),
                    tie_break: options.tie_break,
                    single_char: options.single_char,
                    dictionary_entries: outcome.dictionary_entries,
                    from_cache: outcome.from_cache,
                    source: outcome.source.clone(),
                    diagnostics: outcome.diagnostics.clone(),
                    summary: summary.clone(),
                };
                export::report::write_report(&run_report, &report_path)?;
                println!("✔ レポート出力: {}", report_path.display());
            }

            println!(
                "\n✅ 共处理了 {} 条源数据，匹配到 {} 条结果。",
                summary.total, summary.matched
            );
            println!("  一致率: {:.1}%", summary.match_rate() * 100.0);
            if cli.verbose {
                println!("  末尾一致: {}件", summary.suffix_matches);
                for (keyword, hits) in summary.top_keywords(5) {
                    println!("  {}: {}件", keyword, hits);
                }
            }
        }

        Commands::Inspect {
            dictionary,
            dictionary_header,
            exclude_single_char,
        } => {
            println!("🔍 kwtag - 辞書検査\n");

            let single_char = if exclude_single_char {
                SingleCharPolicy::Exclude
            } else {
                config.single_char_policy()
            };
            let (dict, report) =
                pipeline::load_dictionary(&dictionary, dictionary_header, single_char)?;
            println!("✔ 有効なキーワード: {}件 (ラベル列 {})\n", dict.len(), dict.label_columns());
            print_diagnostics(&report, true);
            dict.ensure_usable()?;
        }

        Commands::Config {
            set_tie_break,
            set_batch_size,
            set_exclude_single_char,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(tie_break) = set_tie_break {
                config.tie_break = tie_break;
                changed = true;
            }
            if let Some(batch_size) = set_batch_size {
                config.set_batch_size(batch_size)?;
                changed = true;
            }
            if let Some(exclude) = set_exclude_single_char {
                config.exclude_single_char = exclude;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定: {}", Config::config_path()?.display());
                println!("  優先規則: {}", config.tie_break);
                println!(
                    "  1文字キーワード: {}",
                    if config.exclude_single_char { "除外" } else { "保持" }
                );
                println!("  バッチサイズ: {}", config.batch_size);
                println!("  プレビュー件数: {}", config.preview_rows);
                println!("  出力ファイル名: {}", config.output_file_name);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = cache::CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = cache::CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match cache::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// 辞書の診断情報を表示
fn print_diagnostics(report: &DiagnosticsReport, verbose: bool) {
    println!("辞書の統計:");
    for line in report.summary_lines() {
        println!("  {}", line);
    }
    if !report.has_findings() {
        println!("  ✔ 問題は見つかりませんでした");
    }

    if verbose {
        for r in &report.null_keywords {
            println!("  - 空キーワード: {}行目", r.row);
        }
        for r in &report.single_char_keywords {
            println!(
                "  - 1文字キーワード: {}行目 「{}」",
                r.row,
                r.keyword.as_deref().unwrap_or("")
            );
        }
        for d in &report.duplicates {
            println!("  - 重複: {}行目 「{}」（{}行目を採用）", d.row, d.keyword, d.kept_row);
        }
    }
    for m in &report.malformed {
        eprintln!("⚠ {}", m);
    }
    println!();
}

/// 先頭n件の結果を表示
fn print_preview(results: &[MatchResult], n: usize) {
    for r in results.iter().take(n) {
        let labels = r
            .labels
            .as_ref()
            .map(|labels| export::layout::join_labels(labels))
            .unwrap_or_default();
        println!(
            "  {} | {} | {} | {}",
            r.source,
            r.matched_keyword.as_deref().unwrap_or("-"),
            labels,
            r.is_suffix.map(|f| f.as_str()).unwrap_or("-")
        );
    }
}
