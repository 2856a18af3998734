use std::io::Write;
use std::time::{Duration, Instant};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use crate::utils::error::{ConvertError, ConvertResult};

/// 候選檔案的副檔名規則，不分大小寫
pub const CANDIDATE_PATTERN: &str = r"(?i)\.heic$";

pub fn setup_logging(log_level: &str) -> ConvertResult<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| ConvertError::Logging(e.to_string()))
}

pub fn create_candidate_regex() -> Regex {
    Regex::new(CANDIDATE_PATTERN).expect("candidate pattern is a valid regex")
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn set_current(&self, index: usize, total: usize, name: &str) {
        if self.no_progress {
            return;
        }
        self.pb.set_message(format!("轉換 {}/{}：{}", index, total, name));
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn abandon(&self) {
        self.pb.abandon();
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(&self, converted: usize, skipped: usize, failed: usize) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!(
            "完成，轉換 {} 個、跳過 {} 個、失敗 {} 個，耗時 {:.1} 秒",
            converted,
            skipped,
            failed,
            self.elapsed().as_secs_f64()
        ));
    }
}

pub fn create_progress_bar(total: u64, no_progress: bool) -> ProgressManager {
    ProgressManager::new(total, no_progress)
}

pub fn format_file_size(size: usize) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}
