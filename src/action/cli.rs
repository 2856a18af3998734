use std::path::PathBuf;
use clap::Parser;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::Cli;
use crate::config::ports::{AppConfig, ConfigPort, FolderPort};
use crate::facade::conversion_facade::BatchConverter;
use crate::facade::traits::i_conversion::BatchConverterTrait;
use crate::models::conversion::RunOutcome;
use crate::service::config_service::{ConfigService, DEFAULT_JOBS, DEFAULT_LOG_LEVEL};
use crate::service::file::FileService;
use crate::service::traits::i_service::ImageCodecTrait;
use crate::utils::error::ConvertResult;
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> ConvertResult<RunOutcome> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode(Cli::parse_from(args))
    }
}

pub fn process_cli_mode(cli: Cli) -> ConvertResult<RunOutcome> {
    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli.clone())));
    let config = config_service.get_config()?;
    setup_logging(&config.log_level)?;
    log::debug!("命令列參數：{:?}", cli);

    let folder_port = Box::new(StaticFolderAdapter::new(config.input_dir.clone()));
    let converter = build_converter(config.clone(), folder_port)?;
    let outcome = converter.run()?;

    // 若啟用 --show-config，在轉換後顯示配置
    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    Ok(outcome)
}

/// 依編譯時啟用的 feature 選擇編解碼器
#[cfg(feature = "libvips")]
pub fn create_codec() -> ConvertResult<Box<dyn ImageCodecTrait>> {
    Ok(Box::new(crate::service::vips::VipsCodec::new()?))
}

#[cfg(not(feature = "libvips"))]
pub fn create_codec() -> ConvertResult<Box<dyn ImageCodecTrait>> {
    log::warn!("以 --no-default-features 編譯，未包含 libvips，無法解碼 HEIC");
    Ok(Box::new(crate::service::codec::ImageCrateCodec::new()))
}

pub fn build_converter(config: AppConfig, folder_port: Box<dyn FolderPort>) -> ConvertResult<BatchConverter> {
    Ok(BatchConverter::new(
        config,
        folder_port,
        Box::new(FileService::new()),
        create_codec()?,
    ))
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> ConvertResult<AppConfig> {
        Ok(AppConfig {
            input_dir: self.cli.folder(),
            conflict_policy: self.cli.on_conflict.unwrap_or_default(),
            continue_on_error: self.cli.continue_on_error,
            jobs: self.cli.jobs.map(usize::from).unwrap_or(DEFAULT_JOBS),
            no_progress: self.cli.no_progress,
            log_level: self.cli.log_level.clone().unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

// 命令列提供的資料夾，沒有提供即視為未選擇
pub struct StaticFolderAdapter {
    folder: Option<PathBuf>,
}

impl StaticFolderAdapter {
    pub fn new(folder: Option<PathBuf>) -> Self {
        StaticFolderAdapter { folder }
    }
}

impl FolderPort for StaticFolderAdapter {
    fn select_folder(&self) -> ConvertResult<Option<PathBuf>> {
        Ok(self.folder.clone())
    }
}
