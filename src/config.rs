use crate::error::{KwTagError, Result};
use kwtag_common::{SingleCharPolicy, TieBreak};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 出力シートの列見出し
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Headers {
    pub source: String,
    pub keyword: String,
    pub label: String,
    pub suffix: String,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            source: "源数据".into(),
            keyword: "字典".into(),
            label: "标签".into(),
            suffix: "是否结尾".into(),
        }
    }
}

impl Headers {
    /// ラベル列の見出し（1列なら「标签」、複数列なら「标签1」「标签2」…）
    pub fn label_titles(&self, columns: usize) -> Vec<String> {
        if columns <= 1 {
            vec![self.label.clone()]
        } else {
            (1..=columns).map(|i| format!("{}{}", self.label, i)).collect()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tie_break: TieBreak,
    pub exclude_single_char: bool,
    pub batch_size: usize,
    pub preview_rows: usize,
    pub output_file_name: String,
    pub headers: Headers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Rightmost,
            exclude_single_char: false,
            batch_size: 1000,
            preview_rows: 10,
            output_file_name: "output.xlsx".into(),
            headers: Headers::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| KwTagError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("kwtag").join("config.json"))
    }

    pub fn single_char_policy(&self) -> SingleCharPolicy {
        if self.exclude_single_char {
            SingleCharPolicy::Exclude
        } else {
            SingleCharPolicy::Retain
        }
    }

    pub fn set_batch_size(&mut self, batch_size: usize) -> Result<()> {
        if batch_size == 0 {
            return Err(KwTagError::Config("バッチサイズは1以上を指定してください".into()));
        }
        self.batch_size = batch_size;
        Ok(())
    }
}
