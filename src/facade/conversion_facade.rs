use std::collections::HashMap;
use std::path::{Path, PathBuf};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use crate::config::config::{validate_input_dir, ConflictPolicy};
use crate::config::ports::{AppConfig, FolderPort};
use crate::facade::traits::i_conversion::BatchConverterTrait;
use crate::models::conversion::{ConversionJob, ConversionSummary, JobStatus, RunOutcome};
use crate::models::file::FileCollectInput;
use crate::models::image::{ExportFormat, PngOptions};
use crate::service::file::{file_size, write_output_file};
use crate::service::traits::i_service::{FileServiceTrait, ImageCodecTrait};
use crate::utils::error::{ConvertError, ConvertResult};
use crate::utils::utils::{create_progress_bar, format_file_size, ProgressManager};

/// 輸出一律為非交錯 PNG
const PNG_OPTIONS: PngOptions = PngOptions { interlaced: false };

pub struct BatchConverter {
    config: AppConfig,
    folder_port: Box<dyn FolderPort>,
    file_service: Box<dyn FileServiceTrait>,
    codec: Box<dyn ImageCodecTrait>,
}

impl BatchConverter {
    pub fn new(
        config: AppConfig,
        folder_port: Box<dyn FolderPort>,
        file_service: Box<dyn FileServiceTrait>,
        codec: Box<dyn ImageCodecTrait>,
    ) -> Self {
        BatchConverter {
            config,
            folder_port,
            file_service,
            codec,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 取得要處理的資料夾，提供的路徑必須是既有資料夾
    pub fn select_folder(&self) -> ConvertResult<Option<PathBuf>> {
        match self.folder_port.select_folder()? {
            Some(folder) => {
                validate_input_dir(&folder)?;
                Ok(Some(folder))
            }
            None => Ok(None),
        }
    }

    pub fn list_candidates(&self, folder: &Path) -> ConvertResult<Vec<PathBuf>> {
        let output = self.file_service.list_candidates(FileCollectInput {
            folder: folder.to_path_buf(),
        })?;
        if output.skipped_dirs > 0 {
            info!("略過 {} 個名稱符合的資料夾", output.skipped_dirs);
        }
        info!("在 {} 找到 {} 個 HEIC 檔案", folder.display(), output.files.len());
        Ok(output.files)
    }

    /// 建立轉換工作並套用衝突策略；fail-on-conflict 在任何寫入前檢查
    ///
    /// 多個來源對應同一輸出時只保留排序在後者，fail-on-conflict 則直接中止。
    pub fn plan_jobs(&self, candidates: Vec<PathBuf>) -> ConvertResult<Vec<ConversionJob>> {
        let fail_on_conflict = self.config.conflict_policy == ConflictPolicy::FailOnConflict;
        let mut slots: Vec<Option<ConversionJob>> = Vec::with_capacity(candidates.len());
        let mut by_target: HashMap<PathBuf, usize> = HashMap::new();

        for source in candidates {
            let job = ConversionJob::new(source);
            if let Some(previous) = by_target.insert(job.target.clone(), slots.len()) {
                if fail_on_conflict {
                    error!("多個來源對應到同一個輸出：{}", job.target.display());
                    return Err(ConvertError::TargetExists(job.target));
                }
                if let Some(dropped) = slots[previous].take() {
                    warn!(
                        "多個來源對應到同一個輸出：{}，略過 {}",
                        job.target.display(),
                        dropped.source.display()
                    );
                }
            }
            slots.push(Some(job));
        }
        let jobs: Vec<ConversionJob> = slots.into_iter().flatten().collect();

        if fail_on_conflict {
            if let Some(job) = jobs.iter().find(|job| job.target.exists()) {
                error!("輸出檔案已存在：{}", job.target.display());
                return Err(ConvertError::TargetExists(job.target.clone()));
            }
        }

        Ok(jobs)
    }

    /// 開啟、輸出 PNG、寫檔，最後關閉文件（不保存任何變更）
    pub fn convert_one(&self, job: &ConversionJob) -> ConvertResult<JobStatus> {
        if self.config.conflict_policy == ConflictPolicy::SkipExisting && job.target.exists() {
            info!("輸出檔案已存在，略過：{}", job.target.display());
            return Ok(JobStatus::Skipped);
        }

        debug!(
            "開啟 {}（{}）",
            job.source.display(),
            format_file_size(file_size(&job.source)? as usize)
        );
        let document = self.codec.open(&job.source)?;
        let (width, height) = document.dimensions();
        let bytes = document.export(ExportFormat::Png, &PNG_OPTIONS)?;
        write_output_file(&job.target, &bytes)?;
        drop(document);

        info!(
            "已轉換 {} -> {}，{}x{}，{}",
            job.source.display(),
            job.target.display(),
            width,
            height,
            format_file_size(bytes.len())
        );
        Ok(JobStatus::Converted { bytes: bytes.len() })
    }

    pub fn convert_all(&self, jobs: &[ConversionJob]) -> ConvertResult<ConversionSummary> {
        let total = jobs.len();
        let progress = create_progress_bar(total as u64, self.config.no_progress);
        let mut summary = ConversionSummary::default();

        if self.config.jobs > 1 {
            debug!("使用 {} 個執行緒轉換", self.config.jobs);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()?;
            let results: Vec<ConvertResult<JobStatus>> = if self.config.continue_on_error {
                pool.install(|| {
                    jobs.par_iter()
                        .enumerate()
                        .map(|(i, job)| self.convert_tracked(i, total, job, &progress))
                        .collect()
                })
            } else {
                // 任一失敗即中止收集
                let statuses = pool.install(|| {
                    jobs.par_iter()
                        .enumerate()
                        .map(|(i, job)| self.convert_tracked(i, total, job, &progress))
                        .collect::<ConvertResult<Vec<JobStatus>>>()
                });
                match statuses {
                    Ok(statuses) => statuses.into_iter().map(Ok).collect(),
                    Err(e) => {
                        progress.abandon();
                        error!("轉換失敗，停止處理：{}", e);
                        return Err(e);
                    }
                }
            };
            for (job, result) in jobs.iter().zip(results) {
                self.record(&mut summary, job, result, &progress)?;
            }
        } else {
            for (i, job) in jobs.iter().enumerate() {
                let result = self.convert_tracked(i, total, job, &progress);
                self.record(&mut summary, job, result, &progress)?;
            }
        }

        summary.elapsed = progress.elapsed();
        progress.finish(summary.converted.len(), summary.skipped.len(), summary.failed.len());
        info!(
            "共轉換 {} 個、跳過 {} 個、失敗 {} 個，寫入 {}",
            summary.converted.len(),
            summary.skipped.len(),
            summary.failed.len(),
            format_file_size(summary.bytes_written)
        );
        Ok(summary)
    }

    fn convert_tracked(
        &self,
        index: usize,
        total: usize,
        job: &ConversionJob,
        progress: &ProgressManager,
    ) -> ConvertResult<JobStatus> {
        let name = job
            .source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        progress.set_current(index + 1, total, &name);
        let result = self.convert_one(job);
        progress.inc();
        result
    }

    fn record(
        &self,
        summary: &mut ConversionSummary,
        job: &ConversionJob,
        result: ConvertResult<JobStatus>,
        progress: &ProgressManager,
    ) -> ConvertResult<()> {
        match result {
            Ok(status) => summary.record(job, status),
            Err(e) if self.config.continue_on_error => {
                error!("處理檔案 {} 失敗: {}", job.source.display(), e);
                summary.record_failure(job, e.to_string());
            }
            Err(e) => {
                progress.abandon();
                error!("轉換失敗，停止處理：{}", e);
                return Err(e);
            }
        }
        Ok(())
    }
}

impl BatchConverterTrait for BatchConverter {
    fn run(&self) -> ConvertResult<RunOutcome> {
        let folder = match self.select_folder()? {
            Some(folder) => folder,
            None => {
                info!("未選擇資料夾，結束");
                return Ok(RunOutcome::NoFolderSelected);
            }
        };

        let candidates = self.list_candidates(&folder)?;
        if candidates.is_empty() {
            warn!("{} 中沒有 HEIC 檔案", folder.display());
            return Ok(RunOutcome::NoCandidates);
        }

        info!("開始轉換，資料夾：{}，編解碼器：{}", folder.display(), self.codec.name());
        let jobs = self.plan_jobs(candidates)?;
        let summary = self.convert_all(&jobs)?;
        Ok(RunOutcome::Completed(summary))
    }
}
