pub mod excel;
pub mod layout;
pub mod report;

use std::path::{Path, PathBuf};

/// 出力先を解決する
///
/// ディレクトリまたは拡張子なしのパスには既定のファイル名を付ける。
pub fn output_path_for(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempdir().unwrap();
        let path = output_path_for(dir.path(), "output.xlsx");
        assert_eq!(path, dir.path().join("output.xlsx"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for(Path::new("out/tagged.xlsx"), "output.xlsx");
        assert_eq!(path, PathBuf::from("out/tagged.xlsx"));
    }
}
