use std::path::Path;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageReader};
use log::debug;
use crate::models::image::{ExportFormat, PngOptions};
use crate::service::traits::i_service::{ImageCodecTrait, ImageDocument};
use crate::utils::error::{ConvertError, ConvertResult};

/// 以 `image` crate 實作的編解碼器
///
/// 依檔案內容判斷格式，不依副檔名；無法辨識 HEIC，
/// 需要 HEIC 解碼時請啟用 `libvips` feature。
pub struct ImageCrateCodec;

impl ImageCrateCodec {
    pub fn new() -> Self {
        ImageCrateCodec
    }
}

impl Default for ImageCrateCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCodecTrait for ImageCrateCodec {
    fn name(&self) -> &'static str {
        "image"
    }

    fn open(&self, path: &Path) -> ConvertResult<Box<dyn ImageDocument>> {
        let reader = ImageReader::open(path)
            .map_err(|e| ConvertError::io(path, e))?
            .with_guessed_format()
            .map_err(|e| ConvertError::io(path, e))?;
        let format = reader.format();
        let image = reader.decode().map_err(|e| {
            ConvertError::decode(path, format!("{} (HEIC decoding requires the `libvips` feature)", e))
        })?;
        debug!("以 {:?} 格式解碼：{}，{}x{}", format, path.display(), image.width(), image.height());
        Ok(Box::new(ImageCrateDocument { path: path.to_path_buf(), image }))
    }
}

struct ImageCrateDocument {
    path: std::path::PathBuf,
    image: DynamicImage,
}

impl ImageDocument for ImageCrateDocument {
    fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    fn export(&self, format: ExportFormat, options: &PngOptions) -> ConvertResult<Vec<u8>> {
        match format {
            ExportFormat::Png => {
                // PngEncoder 只輸出非交錯 PNG
                if options.interlaced {
                    return Err(ConvertError::encode(&self.path, "interlaced PNG output is not supported"));
                }
                let mut buffer = Vec::new();
                let encoder = PngEncoder::new_with_quality(
                    &mut buffer,
                    CompressionType::Default,
                    FilterType::Adaptive,
                );
                self.image
                    .write_with_encoder(encoder)
                    .map_err(|e| ConvertError::encode(&self.path, e))?;
                Ok(buffer)
            }
        }
    }
}
