//! 气泡坐标计算服务 - 业务能力层
//!
//! 输入学号和布局，输出页面坐标（点）。不依赖任何渲染组件，同样的输入永远得到同样的输出。

use crate::models::calibration::CM;
use crate::models::{BubbleLayout, RollNumber};

/// 一个实心圆
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleMark {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// 一个居中绘制的学号字符
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitLabel {
    pub center_x: f64,
    pub baseline_y: f64,
    pub ch: char,
}

/// 一张答题卡上与学号有关的全部绘制指令
#[derive(Debug, Clone, PartialEq)]
pub struct RollStamp {
    pub bubbles: Vec<BubbleMark>,
    pub labels: Vec<DigitLabel>,
    pub font_size: f64,
}

/// 气泡坐标计算
pub struct BubbleGeometry<'a> {
    layout: &'a BubbleLayout,
}

impl<'a> BubbleGeometry<'a> {
    pub fn new(layout: &'a BubbleLayout) -> Self {
        Self { layout }
    }

    /// 第 `column` 列的横坐标（已除以缩放除数）
    pub fn column_x(&self, column: usize) -> f64 {
        self.layout.column_x_cm[column] * CM / self.layout.x_scale_divisor
    }

    /// 第 `column` 列数字 `digit` 对应气泡的圆心纵坐标
    pub fn bubble_y(&self, column: usize, digit: u32) -> f64 {
        let l = self.layout;
        l.column_y_top_cm[column] * CM - digit as f64 * l.row_spacing_cm * CM
            - l.vertical_offset_cm * CM
            + l.fine_tune_cm * CM
    }

    /// 学号文字的基线纵坐标
    pub fn text_baseline_y(&self) -> f64 {
        self.layout.column_y_top_cm[0] * CM - self.layout.text_offset_cm * CM
    }

    /// 需要涂黑的气泡，从左到右；非数字位跳过
    pub fn bubbles(&self, roll: &RollNumber) -> Vec<BubbleMark> {
        let radius = self.layout.radius_cm * CM;
        roll.digits()
            .enumerate()
            .filter_map(|(column, digit)| {
                digit.map(|d| BubbleMark {
                    x: self.column_x(column),
                    y: self.bubble_y(column, d),
                    radius,
                })
            })
            .collect()
    }

    /// 学号文字，每一位居中画在所在列上方
    pub fn labels(&self, roll: &RollNumber) -> Vec<DigitLabel> {
        let baseline_y = self.text_baseline_y();
        roll.as_str()
            .chars()
            .enumerate()
            .map(|(column, ch)| DigitLabel {
                center_x: self.column_x(column),
                baseline_y,
                ch,
            })
            .collect()
    }

    pub fn stamp(&self, roll: &RollNumber) -> RollStamp {
        RollStamp {
            bubbles: self.bubbles(roll),
            labels: self.labels(roll),
            font_size: self.layout.text_font_size,
        }
    }
}
