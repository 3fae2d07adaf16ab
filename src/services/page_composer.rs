//! 页面绘制服务 - 业务能力层
//!
//! 只负责把"一页的内容"画到画布上：背景模板、学号气泡、学号文字、信息表格。
//! 不关心数据从哪一行来，也不决定使用哪个模板。

use crate::error::AppResult;
use crate::infrastructure::{PdfCanvas, TemplateImage};
use crate::models::calibration::CM;
use crate::models::{BubbleLayout, RollNumber};
use crate::services::bubble_geometry::{BubbleGeometry, RollStamp};
use tracing::trace;

/// 信息表格宽度占页面宽度的比例
const TABLE_WIDTH_RATIO: f64 = 0.7;
/// 表格上边缘距页面顶部（厘米）
const TABLE_TOP_OFFSET_CM: f64 = 4.5;
const TABLE_FONT_SIZE: f64 = 11.0;
const TABLE_LEADING: f64 = TABLE_FONT_SIZE * 1.2;
const TABLE_PADDING_X: f64 = 10.0;
const TABLE_PADDING_Y: f64 = 5.0;
const TABLE_BOX_WIDTH: f64 = 0.8;
const TABLE_GRID_WIDTH: f64 = 0.5;

/// 信息表格的内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoBlock {
    pub student_name: String,
    pub school_name: String,
    pub class: String,
    pub division: String,
}

impl InfoBlock {
    /// 表格的四行文字，空值显示为一个空格
    pub fn rows(&self) -> [String; 4] {
        [
            format!("Student Name: {}", or_space(&self.student_name)),
            format!("School: {}", or_space(&self.school_name)),
            format!(
                "Class: {}      Division: {}",
                or_space(&self.class),
                or_space(&self.division)
            ),
            "Question Paper Set: _____________".to_string(),
        ]
    }
}

fn or_space(s: &str) -> &str {
    if s.is_empty() {
        " "
    } else {
        s
    }
}

/// 一页答题卡的内容
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub roll_no: RollNumber,
    pub info: InfoBlock,
}

/// 表格在页面上的位置（点）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub row_height: f64,
    pub rows: usize,
}

impl TableFrame {
    /// 水平居中、上边缘距页顶 4.5 cm
    pub fn for_page(page_width: f64, page_height: f64, rows: usize) -> Self {
        let width = page_width * TABLE_WIDTH_RATIO;
        let row_height = TABLE_LEADING + 2.0 * TABLE_PADDING_Y;
        let height = row_height * rows as f64;
        Self {
            x: (page_width - width) / 2.0,
            y: page_height - TABLE_TOP_OFFSET_CM * CM - height,
            width,
            row_height,
            rows,
        }
    }

    pub fn height(&self) -> f64 {
        self.row_height * self.rows as f64
    }

    /// 第 `row` 行（从上往下，0 开始）的文字基线，垂直居中
    pub fn baseline(&self, row: usize) -> f64 {
        let row_bottom = self.y + self.height() - (row + 1) as f64 * self.row_height;
        row_bottom + (self.row_height + TABLE_LEADING) / 2.0 - TABLE_FONT_SIZE
    }
}

/// 背景图等比缩放并在页面内居中后的矩形 (x, y, w, h)
pub fn fit_background(
    image_width: u32,
    image_height: u32,
    page_width: f64,
    page_height: f64,
) -> (f64, f64, f64, f64) {
    let scale = (page_width / image_width as f64).min(page_height / image_height as f64);
    let width = image_width as f64 * scale;
    let height = image_height as f64 * scale;
    (
        (page_width - width) / 2.0,
        (page_height - height) / 2.0,
        width,
        height,
    )
}

/// 页面绘制服务
pub struct PageComposer;

impl PageComposer {
    /// 绘制一页并换页
    pub fn compose(
        canvas: &mut PdfCanvas,
        template: &TemplateImage,
        layout: &BubbleLayout,
        content: &PageContent,
    ) -> AppResult<()> {
        Self::draw_background(canvas, template)?;

        let stamp = BubbleGeometry::new(layout).stamp(&content.roll_no);
        trace!(
            "学号 {}: {} 个气泡",
            content.roll_no,
            stamp.bubbles.len()
        );
        Self::draw_roll_stamp(canvas, &stamp);
        Self::draw_info_table(canvas, &content.info);

        canvas.show_page()
    }

    fn draw_background(canvas: &mut PdfCanvas, template: &TemplateImage) -> AppResult<()> {
        let key = template.key();
        if !canvas.has_image(&key) {
            canvas.add_image(template);
        }
        let (x, y, w, h) = fit_background(
            template.width,
            template.height,
            canvas.page_width(),
            canvas.page_height(),
        );
        canvas.draw_image(&key, x, y, w, h)
    }

    fn draw_roll_stamp(canvas: &mut PdfCanvas, stamp: &RollStamp) {
        canvas.set_fill_gray(0.0);
        for bubble in &stamp.bubbles {
            canvas.fill_circle(bubble.x, bubble.y, bubble.radius);
        }
        for label in &stamp.labels {
            canvas.draw_centred_string(
                label.center_x,
                label.baseline_y,
                &label.ch.to_string(),
                stamp.font_size,
            );
        }
    }

    fn draw_info_table(canvas: &mut PdfCanvas, info: &InfoBlock) {
        let rows = info.rows();
        let frame = TableFrame::for_page(canvas.page_width(), canvas.page_height(), rows.len());

        canvas.set_stroke_gray(0.0);
        canvas.stroke_rect(frame.x, frame.y, frame.width, frame.height(), TABLE_BOX_WIDTH);
        for i in 1..frame.rows {
            let y = frame.y + i as f64 * frame.row_height;
            canvas.line((frame.x, y), (frame.x + frame.width, y), TABLE_GRID_WIDTH);
        }

        canvas.set_fill_gray(0.0);
        for (i, text) in rows.iter().enumerate() {
            canvas.draw_string(
                frame.x + TABLE_PADDING_X,
                frame.baseline(i),
                text,
                TABLE_FONT_SIZE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calibration::{PAGE_HEIGHT, PAGE_WIDTH};
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use lopdf::content::Content;
    use lopdf::Document;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use std::path::Path;

    fn template() -> TemplateImage {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 11, Rgb([255, 255, 255])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
        TemplateImage::from_bytes(Path::new("master_omr.jpg"), buf.into_inner()).unwrap()
    }

    #[test]
    fn test_compose_draws_roll_stamp() {
        let layout = BubbleLayout::master();
        let content = PageContent {
            roll_no: RollNumber::from_padded("307"),
            info: InfoBlock::default(),
        };
        let mut canvas = PdfCanvas::new(PAGE_WIDTH, PAGE_HEIGHT);
        PageComposer::compose(&mut canvas, &template(), &layout, &content).unwrap();
        assert_eq!(canvas.page_count(), 1);

        let doc = Document::load_mem(&canvas.finish("stamp").unwrap()).unwrap();
        let page = *doc.get_pages().values().next().unwrap();
        let ops = Content::decode(&doc.get_page_content(page).unwrap())
            .unwrap()
            .operations;

        // 每位数字一个实心圆
        assert_eq!(ops.iter().filter(|op| op.operator == "f").count(), 3);

        // 学号文字先于表格文字绘制
        let shown: Vec<Vec<u8>> = ops
            .iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect();
        assert_eq!(
            shown[..3].to_vec(),
            vec![b"3".to_vec(), b"0".to_vec(), b"7".to_vec()]
        );
        assert_eq!(shown[3], b"Student Name:  ".to_vec());

        // 第一个圆从 (cx + r, cy) 起笔：第 0 列、数字 3
        let start = ops.iter().find(|op| op.operator == "m").unwrap();
        let x = start.operands[0].as_float().unwrap() as f64;
        let y = start.operands[1].as_float().unwrap() as f64;
        assert!((x - (10.1 * CM / 2.2 + 0.24 * CM)).abs() < 0.01, "x = {}", x);
        assert!((y - 17.57 * CM).abs() < 0.01, "y = {}", y);
    }

    #[test]
    fn test_info_rows() {
        let info = InfoBlock {
            student_name: "Asha".to_string(),
            school_name: String::new(),
            class: "7".to_string(),
            division: "B".to_string(),
        };
        assert_eq!(
            info.rows(),
            [
                "Student Name: Asha".to_string(),
                "School:  ".to_string(),
                "Class: 7      Division: B".to_string(),
                "Question Paper Set: _____________".to_string(),
            ]
        );
    }

    #[test]
    fn test_table_frame_geometry() {
        let frame = TableFrame::for_page(PAGE_WIDTH, PAGE_HEIGHT, 4);
        assert!((frame.width - PAGE_WIDTH * 0.7).abs() < 1e-9);
        assert!((frame.x * 2.0 + frame.width - PAGE_WIDTH).abs() < 1e-9);
        assert!((frame.y + frame.height() - (PAGE_HEIGHT - 4.5 * CM)).abs() < 1e-9);
        // 每行基线都落在该行内部，且从上往下递减
        for row in 0..4 {
            let top = frame.y + frame.height() - row as f64 * frame.row_height;
            let baseline = frame.baseline(row);
            assert!(baseline < top && baseline > top - frame.row_height);
        }
        assert!(frame.baseline(0) > frame.baseline(3));
    }

    #[test]
    fn test_fit_background_preserves_aspect() {
        // 宽图：上下留白
        let (x, y, w, h) = fit_background(200, 100, 100.0, 100.0);
        assert_eq!((x, y, w, h), (0.0, 25.0, 100.0, 50.0));
        // 高图：左右留白
        let (x, y, w, h) = fit_background(100, 400, 100.0, 100.0);
        assert_eq!((x, y, w, h), (37.5, 0.0, 25.0, 100.0));
    }
}
