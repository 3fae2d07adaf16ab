//! 气泡校准数据
//!
//! 所有常量都与具体的模板图片绑定，是经验值而不是推导值。
//! 更换模板图片时必须重新校准整张表。

use crate::models::TemplateVariant;
use serde::{Deserialize, Serialize};

/// 1 厘米对应的 PDF 点数
pub const CM: f64 = 72.0 / 2.54;

/// A4 页面宽度（点）
pub const PAGE_WIDTH: f64 = 21.0 * CM;

/// A4 页面高度（点）
pub const PAGE_HEIGHT: f64 = 29.7 * CM;

const CHILD_SHIFT_X_CM: f64 = 6.0;
const CHILD_SHIFT_Y_CM: f64 = -0.3;

/// 单个模板的气泡布局（单位：厘米）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleLayout {
    /// 三个数字列的横坐标
    pub column_x_cm: [f64; 3],
    /// 三个数字列"0"所在行的纵坐标基准
    pub column_y_top_cm: [f64; 3],
    /// 相邻数字行的间距
    pub row_spacing_cm: f64,
    /// 气泡半径
    pub radius_cm: f64,
    /// 固定下移量
    pub vertical_offset_cm: f64,
    /// 模板专属微调
    pub fine_tune_cm: f64,
    /// 横坐标缩放除数（模板图片在页面上的缩放）
    pub x_scale_divisor: f64,
    /// 学号文字相对第 0 列基准的下移量
    pub text_offset_cm: f64,
    /// 学号文字字号
    pub text_font_size: f64,
}

impl BubbleLayout {
    pub fn master() -> Self {
        Self {
            column_x_cm: [10.1, 11.5, 12.9],
            column_y_top_cm: [22.0, 22.0, 22.0],
            row_spacing_cm: 0.62,
            radius_cm: 0.24,
            vertical_offset_cm: 2.6,
            fine_tune_cm: 0.03,
            x_scale_divisor: 2.2,
            text_offset_cm: 2.1,
            text_font_size: 14.0,
        }
    }

    pub fn child() -> Self {
        Self {
            column_x_cm: [
                9.9 + CHILD_SHIFT_X_CM,
                11.3 + CHILD_SHIFT_X_CM,
                12.6 + CHILD_SHIFT_X_CM,
            ],
            column_y_top_cm: [
                21.5 + CHILD_SHIFT_Y_CM,
                21.5 + CHILD_SHIFT_Y_CM,
                21.5 + CHILD_SHIFT_Y_CM,
            ],
            row_spacing_cm: 0.61,
            radius_cm: 0.23,
            vertical_offset_cm: 2.6,
            fine_tune_cm: 0.2,
            x_scale_divisor: 2.2,
            text_offset_cm: 2.0,
            text_font_size: 14.0,
        }
    }

    /// 检查数值是否可用
    pub fn validate(&self, variant: &str) -> Result<(), (String, String)> {
        let values = self
            .column_x_cm
            .iter()
            .chain(self.column_y_top_cm.iter())
            .chain([
                &self.row_spacing_cm,
                &self.radius_cm,
                &self.vertical_offset_cm,
                &self.fine_tune_cm,
                &self.text_offset_cm,
            ]);
        if values.into_iter().any(|v| !v.is_finite()) {
            return Err((variant.to_string(), "存在非有限数值".to_string()));
        }
        if self.x_scale_divisor <= 0.0 || !self.x_scale_divisor.is_finite() {
            return Err((
                format!("{}.x_scale_divisor", variant),
                "必须为正数".to_string(),
            ));
        }
        if self.radius_cm <= 0.0 {
            return Err((format!("{}.radius_cm", variant), "必须为正数".to_string()));
        }
        if self.text_font_size <= 0.0 || !self.text_font_size.is_finite() {
            return Err((
                format!("{}.text_font_size", variant),
                "必须为正数".to_string(),
            ));
        }
        Ok(())
    }
}

/// 两套模板的完整校准表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub master: BubbleLayout,
    pub child: BubbleLayout,
}

impl Calibration {
    pub fn layout(&self, variant: TemplateVariant) -> &BubbleLayout {
        match variant {
            TemplateVariant::Master => &self.master,
            TemplateVariant::Child => &self.child,
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            master: BubbleLayout::master(),
            child: BubbleLayout::child(),
        }
    }
}
