//! 流程层（Workflow）
//!
//! 定义"一行学生数据"的完整处理流程：取值 → 规范化 → 选模板 → 绘制

pub mod row_ctx;
pub mod row_flow;

pub use row_ctx::RowCtx;
pub use row_flow::{extract_record, RowFlow, RowOutcome};
