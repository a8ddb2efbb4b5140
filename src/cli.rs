use clap::{Parser, Subcommand};
use kwtag_common::TieBreak;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kwtag")]
#[command(about = "辞書キーワードによるテキストレコードのラベル付けツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 照合対象ファイルに辞書のラベルを付けてExcelを出力
    Tag {
        /// 照合対象ファイル（先頭シートのA列）
        #[arg(required = true)]
        source: PathBuf,

        /// 辞書ファイル（A列: キーワード、B列以降: ラベル）
        #[arg(required = true)]
        dictionary: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: ./output.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 同じ長さの候補の優先規則 (rightmost/leftmost)
        #[arg(long)]
        tie_break: Option<TieBreak>,

        /// 1文字キーワードを辞書から除外
        #[arg(long)]
        exclude_single_char: bool,

        /// バッチサイズ（進捗更新・中断確認の単位）
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// 照合対象ファイルの1行目を見出しとして読み飛ばす
        #[arg(long)]
        source_header: bool,

        /// 辞書ファイルの1行目を見出しとして読み飛ばす
        #[arg(long)]
        dictionary_header: bool,

        /// 実行レポート（JSON）の出力先
        #[arg(long)]
        report: Option<PathBuf>,

        /// 先頭N件の結果を表示
        #[arg(long)]
        preview: Option<usize>,

        /// キャッシュを使用（同じ入力の再照合をスキップ）
        #[arg(long)]
        use_cache: bool,

        /// 並列処理を無効化
        #[arg(long)]
        sequential: bool,

        /// 出力ファイルが存在しても確認せず上書き
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 辞書ファイルを検査して診断情報を表示
    Inspect {
        /// 辞書ファイル
        #[arg(required = true)]
        dictionary: PathBuf,

        /// 1行目を見出しとして読み飛ばす
        #[arg(long)]
        dictionary_header: bool,

        /// 1文字キーワードを辞書から除外
        #[arg(long)]
        exclude_single_char: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 同じ長さの候補の優先規則を設定 (rightmost/leftmost)
        #[arg(long)]
        set_tie_break: Option<TieBreak>,

        /// バッチサイズを設定
        #[arg(long)]
        set_batch_size: Option<usize>,

        /// 1文字キーワードの除外を設定 (true/false)
        #[arg(long)]
        set_exclude_single_char: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
