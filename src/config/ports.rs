use std::path::PathBuf;
use crate::config::config::ConflictPolicy;
use crate::utils::error::ConvertResult;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub input_dir: Option<PathBuf>,
    pub conflict_policy: ConflictPolicy,
    pub continue_on_error: bool,
    pub jobs: usize,
    pub no_progress: bool,
    pub log_level: String,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> ConvertResult<AppConfig>;
}

// 資料夾選擇的 Port，None 表示使用者未選擇
pub trait FolderPort: Send + Sync {
    fn select_folder(&self) -> ConvertResult<Option<PathBuf>>;
}
