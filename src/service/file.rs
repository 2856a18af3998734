use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use log::{debug, warn};
use regex::Regex;
use walkdir::WalkDir;
use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::error::{ConvertError, ConvertResult};
use crate::utils::utils::create_candidate_regex;

/// File 服務，只掃描資料夾第一層
pub struct FileService {
    pattern: Regex,
}

impl FileService {
    pub fn new() -> Self {
        FileService { pattern: create_candidate_regex() }
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileServiceTrait for FileService {
    fn list_candidates(&self, input: FileCollectInput) -> ConvertResult<FileCollectOutput> {
        let mut files = Vec::new();
        let mut skipped_dirs = 0;

        let walker = WalkDir::new(&input.folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy();
            if !self.pattern.is_match(&name) {
                continue;
            }
            // 名稱符合但不是一般檔案（例如 foo.heic/ 資料夾）一律略過
            if !entry.file_type().is_file() {
                warn!("略過非檔案項目：{}", entry.path().display());
                skipped_dirs += 1;
                continue;
            }
            debug!("找到候選檔案：{}", entry.path().display());
            files.push(entry.into_path());
        }

        Ok(FileCollectOutput { files, skipped_dirs })
    }
}

/// 寫入轉換後的資料，既有檔案會被覆寫
pub fn write_output_file(path: &Path, data: &[u8]) -> ConvertResult<()> {
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(data).map_err(|e| ConvertError::io(path, e))?;
    writer.flush().map_err(|e| ConvertError::io(path, e))?;
    Ok(())
}

pub fn file_size(path: &Path) -> ConvertResult<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| ConvertError::io(path, e))
}
