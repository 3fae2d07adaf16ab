//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责整个工作簿的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化运行日志、检查模板、解析 Logo、加载校准表
//! 2. **加载工作簿**：读取表格文件（`Workbook`）
//! 3. **逐表处理**：按文件顺序委托 `sheet_processor` 生成 PDF
//! 4. **打包输出**：所有 PDF 写入同一个压缩包，全部成功后才落盘
//! 5. **全局统计**：汇总工作表数、页数
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单行数据的细节
//! - **全有或全无**：任一模板加载失败即终止，不产生部分压缩包
//! - **阻塞任务隔离**：生成过程放在 `spawn_blocking` 中执行

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{ArchiveWriter, OutputArchive};
use crate::models::{load_calibration, load_workbook, Calibration, Workbook};
use crate::orchestrator::sheet_processor::{self, SheetStats};
use crate::services::{check_templates, resolve_logo, sanitize_filename, LogoSource, TemplatePaths};
use crate::utils::logging;
use crate::workflow::RowFlow;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// 压缩包内 PDF 的扩展名
const PDF_EXT: &str = ".pdf";

/// 批量处理统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub sheets: usize,
    pub pages: usize,
    pub master_pages: usize,
    pub child_pages: usize,
}

impl BatchStats {
    fn add(&mut self, sheet: &SheetStats) {
        self.sheets += 1;
        self.pages += sheet.pages;
        self.master_pages += sheet.master_pages;
        self.child_pages += sheet.child_pages;
    }
}

/// 将整个工作簿生成为压缩包（同步，纯内存）
///
/// 每个工作表一份 PDF，条目名为清理后的工作表名 + ".pdf"，顺序与工作表顺序一致
pub fn generate_archive(
    workbook: &Workbook,
    calibration: &Calibration,
    templates: &TemplatePaths,
) -> AppResult<(OutputArchive, BatchStats)> {
    let flow = RowFlow::new(calibration, templates);
    let mut archive = ArchiveWriter::new();
    let mut stats = BatchStats::default();

    for (idx, sheet) in workbook.sheets.iter().enumerate() {
        let pdf = sheet_processor::process_sheet(sheet, idx + 1, &flow)?;

        let entry = archive.unique_name(&sanitize_filename(&pdf.sheet_name), PDF_EXT);
        archive.add(&entry, &pdf.bytes)?;
        info!("[工作表 {}] 📦 已写入压缩包: {}", idx + 1, entry);

        stats.add(&pdf.stats);
    }

    if archive.is_empty() {
        warn!("⚠️ 没有任何工作表，压缩包为空");
    } else {
        info!("📦 压缩包共 {} 个条目", archive.len());
    }

    Ok((archive.finish()?, stats))
}

/// 应用主结构
pub struct App {
    config: Config,
    calibration: Calibration,
    templates: TemplatePaths,
    logo: LogoSource,
}

impl App {
    /// 初始化应用
    ///
    /// 模板缺失时直接失败，处理不会开始
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(&config);

        let templates = TemplatePaths::new(config.master_template_path(), config.child_template_path());
        check_templates(&templates).context("❌ OMR 模板文件缺失，请确认 child_omr.jpg 与 master_omr.jpg 存在")?;

        let logo = resolve_logo(&config.logo_path());

        let calibration = load_calibration(config.calibration_file.as_deref()).await?;

        Ok(Self {
            config,
            calibration,
            templates,
            logo,
        })
    }

    pub fn logo(&self) -> &LogoSource {
        &self.logo
    }

    /// 运行应用主逻辑，返回写出的压缩包路径
    pub async fn run(&self) -> Result<PathBuf> {
        info!("\n📁 正在读取表格: {}", self.config.input.display());
        let workbook = load_workbook(&self.config.input)
            .await
            .with_context(|| format!("无法读取表格文件: {}", self.config.input.display()))?;

        logging::log_workbook_loaded(workbook.sheets.len(), workbook.page_count());

        // 生成过程是纯同步计算，放到阻塞线程池中执行
        let calibration = self.calibration.clone();
        let templates = self.templates.clone();
        let (archive, stats) = tokio::task::spawn_blocking(move || {
            generate_archive(&workbook, &calibration, &templates)
        })
        .await
        .context("生成任务异常退出")??;

        tokio::fs::write(&self.config.output, &archive.bytes)
            .await
            .with_context(|| format!("无法写入压缩包: {}", self.config.output.display()))?;

        logging::print_final_stats(&stats, &archive.entries, &self.config);
        logging::append_run_summary(&self.config.output_log_file, &stats, &archive.entries, &self.config.output)?;

        Ok(self.config.output.clone())
    }
}
