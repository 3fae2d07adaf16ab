//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量工作簿处理器
//! - 管理应用生命周期（初始化、运行）
//! - 前置检查模板、解析 Logo、加载校准表
//! - 加载工作簿（Vec<Worksheet>）
//! - 把所有 PDF 打包成一个压缩包，成功后才写盘
//! - 输出全局统计信息
//!
//! ### `sheet_processor` - 单个工作表处理器
//! - 解析表头得到列映射
//! - 遍历工作表的所有数据行（每行一页）
//! - 创建画布和模板缓存，复用 RowFlow
//! - 输出单个工作表的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Worksheet>)
//!     ↓
//! sheet_processor (处理 Vec<Row>)
//!     ↓
//! workflow::RowFlow (处理单行)
//!     ↓
//! services (能力层：列映射 / 规范化 / 年级 / 气泡几何 / 页面绘制)
//!     ↓
//! infrastructure (基础设施：PdfCanvas / TemplateStore / ArchiveWriter)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，sheet_processor 管单个工作表
//! 2. **资源隔离**：画布和压缩包缓冲区只在编排层创建
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod batch_processor;
pub mod sheet_processor;

// 重新导出主要类型
pub use batch_processor::{generate_archive, App, BatchStats};
pub use sheet_processor::{process_sheet, SheetPdf, SheetStats};
