use dialoguer::Input;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use crate::action::cli::build_converter;
use crate::config::ports::FolderPort;
use crate::facade::traits::i_conversion::BatchConverterTrait;
use crate::models::conversion::RunOutcome;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::error::ConvertResult;
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> ConvertResult<RunOutcome> {
    let config = ConfigService::new(Box::new(DefaultConfigAdapter::new(None))).get_config()?;
    setup_logging(&config.log_level)?;
    println!("=== HEIC 轉 PNG 互動模式 ===");

    let converter = build_converter(config, Box::new(InteractiveFolderAdapter::new()))?;
    converter.run()
}

/// 驗證輸入：留空代表取消，否則必須是既有資料夾
pub fn validate_folder_answer(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || Path::new(trimmed).is_dir() {
        Ok(())
    } else {
        Err(format!("'{}' 不是資料夾", trimmed))
    }
}

pub fn get_input_folder() -> ConvertResult<Option<PathBuf>> {
    let answer: String = Input::new()
        .with_prompt("請輸入 HEIC 影像所在的資料夾（留空則取消）")
        .allow_empty(true)
        .validate_with(|input: &String| validate_folder_answer(input))
        .interact_text()?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(answer)))
    }
}

// 互動式資料夾選擇，非終端機環境視為未選擇
pub struct InteractiveFolderAdapter;

impl InteractiveFolderAdapter {
    pub fn new() -> Self {
        InteractiveFolderAdapter
    }
}

impl Default for InteractiveFolderAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderPort for InteractiveFolderAdapter {
    fn select_folder(&self) -> ConvertResult<Option<PathBuf>> {
        if !io::stdin().is_terminal() {
            log::info!("標準輸入不是終端機，無法提示選擇資料夾");
            return Ok(None);
        }
        get_input_folder()
    }
}
