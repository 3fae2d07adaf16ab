//! 数据行处理上下文
//!
//! 封装"我正在处理哪个工作表的第几行"这一信息

use std::fmt::Display;

/// 数据行处理上下文
#[derive(Debug, Clone)]
pub struct RowCtx {
    /// 工作表名
    pub sheet_name: String,

    /// 工作表序号（从1开始，仅用于日志显示）
    pub sheet_index: usize,

    /// 数据行序号（从1开始，不含表头）
    pub row_index: usize,
}

impl RowCtx {
    /// 创建新的数据行上下文
    pub fn new(sheet_name: impl Into<String>, sheet_index: usize, row_index: usize) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            sheet_index,
            row_index,
        }
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[工作表 #{} {} 第 {} 行]",
            self.sheet_index, self.sheet_name, self.row_index
        )
    }
}
