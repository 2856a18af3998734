use std::path::Path;
use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::models::image::{ExportFormat, PngOptions};
use crate::utils::error::ConvertResult;

// File 服務接口，負責列出候選檔案
pub trait FileServiceTrait: Send + Sync {
    /// 列出資料夾第一層中副檔名為 .heic（不分大小寫）的一般檔案
    /// # 參數
    /// - input: 要掃描的資料夾
    /// # 回傳
    /// - 依檔名排序的候選檔案與略過的同名資料夾數量
    fn list_candidates(&self, input: FileCollectInput) -> ConvertResult<FileCollectOutput>;
}

// 影像編解碼接口，負責開啟影像文件
pub trait ImageCodecTrait: Send + Sync {
    fn name(&self) -> &'static str;

    /// 將來源檔案解碼為記憶體中的文件
    fn open(&self, path: &Path) -> ConvertResult<Box<dyn ImageDocument>>;
}

// 已開啟的影像文件，drop 即關閉且不保存任何變更
pub trait ImageDocument {
    fn dimensions(&self) -> (u32, u32);

    /// 以指定格式輸出為位元組
    fn export(&self, format: ExportFormat, options: &PngOptions) -> ConvertResult<Vec<u8>>;
}
