//! # OMR Sheet Generator
//!
//! 一个把学生名单表格批量生成为 OMR 答题卡 PDF 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源，只暴露能力
//! - `PdfCanvas` - 单个进行中的 PDF 文档，提供画图、写字、换页能力
//! - `TemplateImage` / `TemplateStore` - 模板图片及按工作表缓存
//! - `ArchiveWriter` - 内存中的 zip 压缩包
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个值或单页
//! - `ColumnResolver` - 表头到标准字段的映射
//! - `normalizer` / `grade_parser` - 学号、文件名、年级的规范化
//! - `BubbleGeometry` - 学号气泡坐标计算
//! - `PageComposer` - 绘制一页答题卡
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一行数据"的完整处理流程
//! - `RowCtx` - 上下文封装（工作表 + 行号）
//! - `RowFlow` - 流程编排（取字段 → 学号 → 选模板 → 绘制）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，管理资源并打包输出
//! - `orchestrator/sheet_processor` - 单个工作表处理器，遍历数据行
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ArchiveWriter, PdfCanvas, TemplateImage};
pub use models::{Calibration, Workbook, Worksheet};
pub use orchestrator::{generate_archive, process_sheet, App};
pub use workflow::{RowCtx, RowFlow};
