//! 模板图片 - 基础设施层
//!
//! 读取并解码模板图片，产出可直接写入 PDF 的图像数据

use crate::error::{AppError, AppResult};
use image::{ColorType, GenericImageView, ImageFormat};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 写入 PDF 的图像编码
#[derive(Debug, Clone, PartialEq)]
pub enum ImageEncoding {
    /// 原样嵌入的 JPEG（DCTDecode）
    Jpeg { color_space: &'static str },
    /// 未压缩的 8 位 RGB 像素
    RawRgb,
}

/// 已加载的模板图片
#[derive(Debug, Clone)]
pub struct TemplateImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub encoding: ImageEncoding,
    pub data: Vec<u8>,
}

impl TemplateImage {
    /// 从文件加载模板图片，任何失败都带上路径
    pub fn load(path: &Path) -> AppResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::template_load_failed(path.display().to_string(), e))?;
        Self::from_bytes(path, bytes)
    }

    /// 从内存数据构造（`path` 只用于标识和报错）
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> AppResult<Self> {
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| AppError::template_load_failed(path.display().to_string(), e))?;
        let (width, height) = decoded.dimensions();

        let is_jpeg = matches!(image::guess_format(&bytes), Ok(ImageFormat::Jpeg));
        let jpeg_color_space = match decoded.color() {
            ColorType::L8 => Some("DeviceGray"),
            ColorType::Rgb8 => Some("DeviceRGB"),
            _ => None,
        };

        let (encoding, data) = match (is_jpeg, jpeg_color_space) {
            (true, Some(color_space)) => (ImageEncoding::Jpeg { color_space }, bytes),
            _ => (ImageEncoding::RawRgb, decoded.to_rgb8().into_raw()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            encoding,
            data,
        })
    }

    /// 缓存键
    pub fn key(&self) -> String {
        self.path.display().to_string()
    }
}

/// 按路径缓存已加载的模板
///
/// 每个工作表的 PDF 各持有一份，模板在第一次用到时才读取
#[derive(Debug, Default)]
pub struct TemplateStore {
    loaded: HashMap<PathBuf, TemplateImage>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出模板，未加载时从磁盘读取
    pub fn get_or_load(&mut self, path: &Path) -> AppResult<&TemplateImage> {
        match self.loaded.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let image = TemplateImage::load(path)?;
                tracing::debug!(
                    "已加载模板 {} ({}x{})",
                    path.display(),
                    image.width,
                    image.height
                );
                Ok(&*entry.insert(image))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 6, Rgb([250, 250, 250])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_jpeg_passthrough() {
        let bytes = encode(ImageFormat::Jpeg);
        let img = TemplateImage::from_bytes(Path::new("master_omr.jpg"), bytes.clone()).unwrap();
        assert_eq!((img.width, img.height), (4, 6));
        assert_eq!(
            img.encoding,
            ImageEncoding::Jpeg {
                color_space: "DeviceRGB"
            }
        );
        assert_eq!(img.data, bytes);
    }

    #[test]
    fn test_png_decoded_to_rgb() {
        let img = TemplateImage::from_bytes(Path::new("t.png"), encode(ImageFormat::Png)).unwrap();
        assert_eq!(img.encoding, ImageEncoding::RawRgb);
        assert_eq!(img.data.len(), 4 * 6 * 3);
    }

    #[test]
    fn test_store_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master_omr.jpg");
        std::fs::write(&path, encode(ImageFormat::Jpeg)).unwrap();

        let mut store = TemplateStore::new();
        assert_eq!(store.get_or_load(&path).unwrap().width, 4);
        // 文件删除后仍可从缓存取出
        std::fs::remove_file(&path).unwrap();
        assert_eq!(store.get_or_load(&path).unwrap().height, 6);
    }

    #[test]
    fn test_load_failure_names_path() {
        let err = TemplateImage::load(Path::new("/nonexistent/child_omr.jpg")).unwrap_err();
        assert!(err.to_string().contains("child_omr.jpg"));

        let err = TemplateImage::from_bytes(Path::new("broken.jpg"), b"garbage".to_vec())
            .unwrap_err();
        assert!(err.to_string().contains("broken.jpg"));
    }
}
