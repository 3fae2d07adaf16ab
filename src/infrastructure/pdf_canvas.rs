//! PDF 画布 - 基础设施层
//!
//! 持有一份正在生成的 PDF 文档，只暴露绘图能力：
//! 图片、实心圆、文字、线框、换页、序列化。
//! 不认识学生、学号或模板类型。

use crate::error::{AppError, AppResult, RenderError};
use crate::infrastructure::template_image::{ImageEncoding, TemplateImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};

/// 页面使用的唯一字体资源名
const FONT_NAME: &str = "F1";

/// 圆的贝塞尔近似系数
const KAPPA: f64 = 0.552_284_749_8;

/// Helvetica-Bold 字宽（1/1000 em），覆盖 ASCII 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Helvetica-Bold 下的字符串宽度（点）
pub fn text_width(text: &str, font_size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                HELVETICA_BOLD_WIDTHS[(code - 32) as usize] as u32
            } else {
                556
            }
        })
        .sum();
    units as f64 * font_size / 1000.0
}

/// 标准 Type1 字体只能输出单字节编码，超出 Latin-1 的字符替换为 '?'
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(c as u32).unwrap_or(b'?'))
        .collect()
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

/// PDF 画布
pub struct PdfCanvas {
    doc: Document,
    page_width: f64,
    page_height: f64,
    pages_id: ObjectId,
    font_id: ObjectId,
    /// 缓存键 → (资源名, 对象 ID)
    images: HashMap<String, (String, ObjectId)>,
    page_ids: Vec<ObjectId>,
    operations: Vec<Operation>,
    page_images: BTreeMap<String, ObjectId>,
}

impl PdfCanvas {
    /// 创建指定页面尺寸（点）的空白文档
    pub fn new(page_width: f64, page_height: f64) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        Self {
            doc,
            page_width,
            page_height,
            pages_id,
            font_id,
            images: HashMap::new(),
            page_ids: Vec::new(),
            operations: Vec::new(),
            page_images: BTreeMap::new(),
        }
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// 已完成的页数
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// 图片是否已嵌入（按缓存键）
    pub fn has_image(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// 嵌入图片，同一缓存键只嵌入一次；返回资源名
    pub fn add_image(&mut self, image: &TemplateImage) -> String {
        let key = image.key();
        if let Some((name, _)) = self.images.get(&key) {
            return name.clone();
        }

        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "BitsPerComponent" => 8,
        };
        let stream = match image.encoding {
            ImageEncoding::Jpeg { color_space } => {
                dict.set("ColorSpace", color_space);
                dict.set("Filter", "DCTDecode");
                Stream::new(dict, image.data.clone()).with_compression(false)
            }
            ImageEncoding::RawRgb => {
                dict.set("ColorSpace", "DeviceRGB");
                Stream::new(dict, image.data.clone())
            }
        };

        let id = self.doc.add_object(stream);
        let name = format!("Im{}", self.images.len() + 1);
        self.images.insert(key, (name.clone(), id));
        name
    }

    /// 绘制已嵌入的图片到矩形区域
    pub fn draw_image(&mut self, key: &str, x: f64, y: f64, width: f64, height: f64) -> AppResult<()> {
        let (name, id) = self.images.get(key).cloned().ok_or_else(|| {
            AppError::Render(RenderError::UnknownImage {
                name: key.to_string(),
            })
        })?;

        self.page_images.insert(name.clone(), id);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![real(width), real(0.0), real(0.0), real(height), real(x), real(y)],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        Ok(())
    }

    /// 设置填充灰度（0 为黑）
    pub fn set_fill_gray(&mut self, gray: f64) {
        self.push("g", vec![real(gray)]);
    }

    /// 设置描边灰度（0 为黑）
    pub fn set_stroke_gray(&mut self, gray: f64) {
        self.push("G", vec![real(gray)]);
    }

    /// 实心圆，无描边
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) {
        let k = KAPPA * r;
        self.push("m", vec![real(cx + r), real(cy)]);
        self.curve((cx + r, cy + k), (cx + k, cy + r), (cx, cy + r));
        self.curve((cx - k, cy + r), (cx - r, cy + k), (cx - r, cy));
        self.curve((cx - r, cy - k), (cx - k, cy - r), (cx, cy - r));
        self.curve((cx + k, cy - r), (cx + r, cy - k), (cx + r, cy));
        self.push("f", vec![]);
    }

    /// 左对齐文字（基线坐标）
    pub fn draw_string(&mut self, x: f64, y: f64, text: &str, font_size: f64) {
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![Object::Name(FONT_NAME.as_bytes().to_vec()), real(font_size)],
        );
        self.push("Td", vec![real(x), real(y)]);
        self.push("Tj", vec![Object::string_literal(encode_text(text))]);
        self.push("ET", vec![]);
    }

    /// 以 `center_x` 为中心水平居中的文字
    pub fn draw_centred_string(&mut self, center_x: f64, y: f64, text: &str, font_size: f64) {
        let x = center_x - text_width(text, font_size) / 2.0;
        self.draw_string(x, y, text, font_size);
    }

    /// 矩形描边
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, line_width: f64) {
        self.push("w", vec![real(line_width)]);
        self.push("re", vec![real(x), real(y), real(width), real(height)]);
        self.push("S", vec![]);
    }

    /// 直线
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), line_width: f64) {
        self.push("w", vec![real(line_width)]);
        self.push("m", vec![real(from.0), real(from.1)]);
        self.push("l", vec![real(to.0), real(to.1)]);
        self.push("S", vec![]);
    }

    /// 结束当前页并开始新的一页
    pub fn show_page(&mut self) -> AppResult<()> {
        let operations = std::mem::take(&mut self.operations);
        let content = Content { operations }.encode().map_err(|e| {
            AppError::Render(RenderError::ContentEncodeFailed {
                source: Box::new(e),
            })
        })?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));

        let mut xobjects = Dictionary::new();
        for (name, id) in std::mem::take(&mut self.page_images) {
            xobjects.set(name, id);
        }

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(self.page_width), real(self.page_height)],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { FONT_NAME => self.font_id },
                "XObject" => xobjects,
            },
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// 构建页树并序列化为 PDF 字节
    ///
    /// 未调用 `show_page` 的绘图内容会被丢弃
    pub fn finish(mut self, label: &str) -> AppResult<Vec<u8>> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| AppError::pdf_save_failed(label, e))?;
        Ok(bytes)
    }

    fn curve(&mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) {
        self.push(
            "c",
            vec![real(c1.0), real(c1.1), real(c2.0), real(c2.1), real(end.0), real(end.1)],
        );
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_text_width() {
        assert!((text_width("000", 14.0) - 3.0 * 556.0 * 14.0 / 1000.0).abs() < 1e-9);
        assert!((text_width("A", 10.0) - 7.22).abs() < 1e-9);
    }

    #[test]
    fn test_encode_text_replaces_non_latin1() {
        assert_eq!(encode_text("Zoë"), b"Zo\xeb".to_vec());
        assert_eq!(encode_text("अ"), b"?".to_vec());
    }

    #[test]
    fn test_pages_in_order() {
        let mut canvas = PdfCanvas::new(595.0, 842.0);
        for label in ["one", "two", "three"] {
            canvas.draw_string(10.0, 10.0, label, 12.0);
            canvas.fill_circle(100.0, 100.0, 5.0);
            canvas.show_page().unwrap();
        }
        assert_eq!(canvas.page_count(), 3);

        let bytes = canvas.finish("test").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 3);

        let contents: Vec<Vec<u8>> = pages
            .values()
            .map(|id| doc.get_page_content(*id).unwrap())
            .collect();
        assert!(contains(&contents[0], b"(one)"));
        assert!(contains(&contents[2], b"(three)"));
    }

    #[test]
    fn test_draw_unknown_image_fails() {
        let mut canvas = PdfCanvas::new(595.0, 842.0);
        let err = canvas.draw_image("missing.jpg", 0.0, 0.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            AppError::Render(RenderError::UnknownImage { .. })
        ));
    }

    #[test]
    fn test_empty_document_serializes() {
        let canvas = PdfCanvas::new(595.0, 842.0);
        let bytes = canvas.finish("empty").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }
}
