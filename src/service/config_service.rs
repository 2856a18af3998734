use std::path::PathBuf;
use crate::config::config::ConflictPolicy;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::utils::error::ConvertResult;

pub const DEFAULT_JOBS: usize = 1;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> ConvertResult<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：覆寫既有檔案、遇錯即停、逐一處理
pub struct DefaultConfigAdapter {
    input_dir: Option<PathBuf>,
}

impl DefaultConfigAdapter {
    pub fn new(input_dir: Option<PathBuf>) -> Self {
        DefaultConfigAdapter { input_dir }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> ConvertResult<AppConfig> {
        Ok(AppConfig {
            input_dir: self.input_dir.clone(),
            conflict_policy: ConflictPolicy::Overwrite,
            continue_on_error: false,
            jobs: DEFAULT_JOBS,
            no_progress: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_unguarded_fail_fast_behavior() {
        let service = ConfigService::new(Box::new(DefaultConfigAdapter::new(None)));
        let config = service.get_config().unwrap();
        assert_eq!(config.conflict_policy, ConflictPolicy::Overwrite);
        assert!(!config.continue_on_error);
        assert_eq!(config.jobs, 1);
        assert!(config.input_dir.is_none());
    }
}
