//! 以 libvips 實作的編解碼器，HEIC 解碼由 libvips 內建的 libheif 載入器負責。

use std::path::{Path, PathBuf};
use libvips::{ops, VipsApp, VipsImage};
use log::debug;
use crate::models::image::{ExportFormat, PngOptions};
use crate::service::traits::i_service::{ImageCodecTrait, ImageDocument};
use crate::utils::error::{ConvertError, ConvertResult};

/// `VipsApp` 的生命週期守衛，drop 時關閉 libvips。
///
/// # Safety
/// libvips 支援多執行緒同時使用；各執行緒只操作自己建立的 `VipsImage`。
struct VipsAppGuard(VipsApp);

unsafe impl Send for VipsAppGuard {}
unsafe impl Sync for VipsAppGuard {}

pub struct VipsCodec {
    _vips: VipsAppGuard,
}

impl VipsCodec {
    pub fn new() -> ConvertResult<Self> {
        let vips = VipsApp::new("heic_to_png", false)
            .map_err(|e| ConvertError::CodecInit(format!("libvips: {}", e)))?;
        // 0 = 由 libvips 依 CPU 核心數決定
        vips.concurrency_set(0);
        Ok(VipsCodec { _vips: VipsAppGuard(vips) })
    }
}

impl ImageCodecTrait for VipsCodec {
    fn name(&self) -> &'static str {
        "libvips"
    }

    fn open(&self, path: &Path) -> ConvertResult<Box<dyn ImageDocument>> {
        let image = VipsImage::new_from_file(vips_path(path)?)
            .map_err(|e| ConvertError::decode(path, e))?;
        debug!("libvips 已載入：{}，{}x{}", path.display(), image.get_width(), image.get_height());
        Ok(Box::new(VipsDocument { path: path.to_path_buf(), image }))
    }
}

/// libvips 只接受 UTF-8 路徑，無法轉換時不嘗試開啟
fn vips_path(path: &Path) -> ConvertResult<&str> {
    path.to_str()
        .ok_or_else(|| ConvertError::decode(path, "path is not valid UTF-8"))
}

struct VipsDocument {
    path: PathBuf,
    image: VipsImage,
}

impl ImageDocument for VipsDocument {
    fn dimensions(&self) -> (u32, u32) {
        (self.image.get_width() as u32, self.image.get_height() as u32)
    }

    fn export(&self, format: ExportFormat, options: &PngOptions) -> ConvertResult<Vec<u8>> {
        match format {
            ExportFormat::Png => {
                let opts = ops::PngsaveBufferOptions {
                    interlace: options.interlaced,
                    ..ops::PngsaveBufferOptions::default()
                };
                ops::pngsave_buffer_with_opts(&self.image, &opts)
                    .map_err(|e| ConvertError::encode(&self.path, e))
            }
        }
    }
}
