use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 轉換流程中所有可能的錯誤
///
/// 「未選擇資料夾」與「找不到 HEIC 檔案」屬於正常結束，不在此列，
/// 請見 `RunOutcome`。
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input path '{0}' does not exist")]
    InputNotFound(PathBuf),

    #[error("input path '{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to list directory: {0}")]
    Listing(#[from] walkdir::Error),

    #[error("failed to initialise image codec: {0}")]
    CodecInit(String),

    #[error("failed to decode '{path}': {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to encode '{path}' as PNG: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("target '{0}' already exists")]
    TargetExists(PathBuf),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type ConvertResult<T> = Result<T, ConvertError>;

impl ConvertError {
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn decode<P: Into<PathBuf>, T: ToString>(path: P, reason: T) -> Self {
        Self::Decode { path: path.into(), reason: reason.to_string() }
    }

    pub fn encode<P: Into<PathBuf>, T: ToString>(path: P, reason: T) -> Self {
        Self::Encode { path: path.into(), reason: reason.to_string() }
    }
}
