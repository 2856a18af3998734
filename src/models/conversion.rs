use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const NO_FOLDER_MESSAGE: &str = "No folder selected. Exiting.";
pub const NO_CANDIDATES_MESSAGE: &str = "No HEIC files found in the selected folder.";
pub const COMPLETED_MESSAGE: &str = "Conversion completed!";

/// 單一檔案的轉換工作：來源 HEIC 與同資料夾的目標 PNG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl ConversionJob {
    pub fn new(source: PathBuf) -> Self {
        let target = png_target_for(&source);
        ConversionJob { source, target }
    }
}

/// 只替換最後一段副檔名：`my.photo.heic` -> `my.photo.png`
///
/// 以 `OsStr` 處理，非 UTF-8 檔名的主檔名維持原樣。
pub fn png_target_for(source: &Path) -> PathBuf {
    let name = source.file_name().unwrap_or_default();
    let mut base: OsString = match source.extension() {
        Some(_) => source.file_stem().unwrap_or_default().to_os_string(),
        // `.heic` 這類只有副檔名的檔名，整段都是副檔名
        None if name.as_encoded_bytes().first() == Some(&b'.') => OsString::new(),
        None => name.to_os_string(),
    };
    base.push(".png");
    source.with_file_name(base)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Converted { bytes: usize },
    Skipped,
}

#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub converted: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub bytes_written: usize,
    pub elapsed: Duration,
}

impl ConversionSummary {
    pub fn record(&mut self, job: &ConversionJob, status: JobStatus) {
        match status {
            JobStatus::Converted { bytes } => {
                self.converted.push(job.target.clone());
                self.bytes_written += bytes;
            }
            JobStatus::Skipped => self.skipped.push(job.source.clone()),
        }
    }

    pub fn record_failure(&mut self, job: &ConversionJob, reason: String) {
        self.failed.push((job.source.clone(), reason));
    }
}

/// 一次執行的結果，對應給操作者的訊息與結束碼
#[derive(Debug)]
pub enum RunOutcome {
    NoFolderSelected,
    NoCandidates,
    Completed(ConversionSummary),
}

impl RunOutcome {
    pub fn message(&self) -> String {
        match self {
            RunOutcome::NoFolderSelected => NO_FOLDER_MESSAGE.to_string(),
            RunOutcome::NoCandidates => NO_CANDIDATES_MESSAGE.to_string(),
            RunOutcome::Completed(summary) if summary.failed.is_empty() => COMPLETED_MESSAGE.to_string(),
            RunOutcome::Completed(summary) => {
                format!("Conversion completed with {} failure(s).", summary.failed.len())
            }
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Completed(summary) if !summary.failed.is_empty() => 2,
            _ => 0,
        }
    }
}
