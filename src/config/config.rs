use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use crate::utils::error::{ConvertError, ConvertResult};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "heic_to_png",
    about = "將資料夾中的 HEIC 影像批次轉換為 PNG",
    long_about = "掃描指定資料夾（不含子資料夾）中副檔名為 .heic 的檔案（不分大小寫），\n於同一資料夾輸出同名的 .png 檔案（非交錯），原始檔案保持不變。\n不帶任何參數執行時進入互動模式，提示輸入資料夾路徑。"
)]
pub struct Cli {
    /// 要轉換的資料夾
    #[arg(value_name = "DIR")]
    pub input: Option<PathBuf>,
    /// 同 DIR，以旗標形式指定
    #[arg(long = "input-dir", value_name = "DIR", conflicts_with = "input")]
    pub input_dir: Option<PathBuf>,
    /// 目標 PNG 已存在時的處理方式
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,
    /// 單一檔案失敗時繼續處理其餘檔案
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,
    /// 同時轉換的檔案數，1 為逐一處理
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: Option<String>,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

impl Cli {
    /// 位置參數與 --input-dir 擇一
    pub fn folder(&self) -> Option<PathBuf> {
        self.input.clone().or_else(|| self.input_dir.clone())
    }
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug, Default)]
pub enum ConflictPolicy {
    /// 直接覆寫既有檔案
    #[default]
    Overwrite,
    /// 保留既有檔案並跳過
    SkipExisting,
    /// 任一目標已存在即中止，不寫入任何檔案
    FailOnConflict,
}

pub fn validate_input_dir(input: &Path) -> ConvertResult<&Path> {
    if !input.exists() {
        log::error!("輸入路徑不存在：{}", input.display());
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }
    if !input.is_dir() {
        log::error!("輸入路徑不是資料夾：{}", input.display());
        return Err(ConvertError::NotADirectory(input.to_path_buf()));
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_and_flag_are_interchangeable() {
        let cli = Cli::parse_from(["heic_to_png", "photos"]);
        assert_eq!(cli.folder(), Some(PathBuf::from("photos")));

        let cli = Cli::parse_from(["heic_to_png", "--input-dir", "photos"]);
        assert_eq!(cli.folder(), Some(PathBuf::from("photos")));
    }

    #[test]
    fn positional_conflicts_with_flag() {
        let parsed = Cli::try_parse_from(["heic_to_png", "a", "--input-dir", "b"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn parses_conflict_policy() {
        let cli = Cli::parse_from(["heic_to_png", "dir", "--on-conflict", "skip-existing"]);
        assert_eq!(cli.on_conflict, Some(ConflictPolicy::SkipExisting));
    }

    #[test]
    fn rejects_zero_jobs() {
        assert!(Cli::try_parse_from(["heic_to_png", "dir", "--jobs", "0"]).is_err());
    }

    #[test]
    fn validate_rejects_missing_and_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_input_dir(dir.path()).is_ok());

        let missing = dir.path().join("missing");
        assert!(matches!(validate_input_dir(&missing), Err(ConvertError::InputNotFound(_))));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(validate_input_dir(&file), Err(ConvertError::NotADirectory(_))));
    }
}
