//! 单个工作表处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责把一个工作表的全部数据行生成为一份 PDF，是工作表级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **列映射**：根据表头构建 `ColumnMapping`，未匹配字段给出警告
//! 2. **遍历数据行**：按原顺序逐行调用 `RowFlow`，每行一页
//! 3. **序列化**：全部行完成后输出 PDF 字节
//! 4. **统计输出**：记录页数及各模板用量

use crate::error::{classify, AppResult, Disposition, Issue};
use crate::infrastructure::{PdfCanvas, TemplateStore};
use crate::models::calibration::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::models::{CanonicalField, TemplateVariant, Worksheet};
use crate::services::{ColumnMapping, ColumnResolver};
use crate::workflow::{extract_record, RowCtx, RowFlow};
use tracing::{info, warn};

/// 工作表处理统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetStats {
    pub pages: usize,
    pub master_pages: usize,
    pub child_pages: usize,
    pub unmapped: Vec<CanonicalField>,
}

/// 生成的单个工作表 PDF
#[derive(Debug, Clone)]
pub struct SheetPdf {
    pub sheet_name: String,
    pub bytes: Vec<u8>,
    pub stats: SheetStats,
}

/// 处理单个工作表
///
/// # 参数
/// - `sheet`: 工作表数据
/// - `sheet_index`: 工作表序号（从1开始，用于日志）
/// - `flow`: 单行处理流程
///
/// # 返回
/// 返回该工作表的 PDF；模板加载失败时直接返回错误
pub fn process_sheet(sheet: &Worksheet, sheet_index: usize, flow: &RowFlow) -> AppResult<SheetPdf> {
    log_sheet_start(sheet_index, sheet);

    let mapping = ColumnResolver::resolve(&sheet.headers);
    let unmapped = report_mapping(sheet_index, sheet, &mapping);

    let mut canvas = PdfCanvas::new(PAGE_WIDTH, PAGE_HEIGHT);
    let mut store = TemplateStore::new();
    let mut stats = SheetStats {
        unmapped,
        ..Default::default()
    };

    // ========== 按原顺序遍历数据行，一行一页 ==========
    for row in 0..sheet.rows.len() {
        let ctx = RowCtx::new(sheet.name.clone(), sheet_index, row + 1);
        let record = extract_record(sheet, &mapping, row);
        let outcome = flow.run(&mut canvas, &mut store, &record, &ctx)?;

        stats.pages += 1;
        match outcome.variant {
            TemplateVariant::Master => stats.master_pages += 1,
            TemplateVariant::Child => stats.child_pages += 1,
        }
    }

    if stats.pages == 0 {
        warn!(
            "[工作表 {}] ⚠️ {} 没有数据行，将生成空白 PDF",
            sheet_index, sheet.name
        );
    }

    let bytes = canvas.finish(&sheet.name)?;
    log_sheet_complete(sheet_index, &stats, bytes.len());

    Ok(SheetPdf {
        sheet_name: sheet.name.clone(),
        bytes,
        stats,
    })
}

/// 输出列映射结果，返回未匹配的字段
fn report_mapping(
    sheet_index: usize,
    sheet: &Worksheet,
    mapping: &ColumnMapping,
) -> Vec<CanonicalField> {
    for field in CanonicalField::ALL {
        if let Some(column) = mapping.get(field) {
            info!(
                "[工作表 {}] {} ← \"{}\" ({:?})",
                sheet_index, field, column.label, column.rule
            );
        }
    }

    let unmapped = mapping.unmapped();
    for field in &unmapped {
        if let Disposition::Recovered(fallback) = classify(&Issue::UnmappedColumn { field: *field })
        {
            warn!(
                "[工作表 {}] ⚠️ {} 中找不到 {} 对应的列，按 {:?} 处理",
                sheet_index, sheet.name, field, fallback
            );
        }
    }
    unmapped
}

// ========== 日志辅助函数 ==========

fn log_sheet_start(sheet_index: usize, sheet: &Worksheet) {
    info!("\n{}", "─".repeat(60));
    info!("[工作表 {}] 开始处理: {}", sheet_index, sheet.name);
    info!(
        "[工作表 {}] 表头 {} 列, 数据 {} 行",
        sheet_index,
        sheet.headers.len(),
        sheet.rows.len()
    );
}

fn log_sheet_complete(sheet_index: usize, stats: &SheetStats, size: usize) {
    info!(
        "[工作表 {}] 页数统计: Master {}, Child {}, 总计 {} ({} 字节)",
        sheet_index, stats.master_pages, stats.child_pages, stats.pages, size
    );
    info!("[工作表 {}] ✅ 工作表处理完成", sheet_index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Calibration, CellValue};
    use crate::services::TemplatePaths;

    #[test]
    fn test_empty_sheet_yields_empty_pdf() {
        let calibration = Calibration::default();
        let templates = TemplatePaths::new("/nonexistent/m.jpg", "/nonexistent/c.jpg");
        let flow = RowFlow::new(&calibration, &templates);
        let sheet = Worksheet::new("Blank", vec!["Notes".to_string()], vec![]);

        let pdf = process_sheet(&sheet, 1, &flow).unwrap();
        assert_eq!(pdf.stats.pages, 0);
        assert_eq!(pdf.stats.unmapped.len(), 5);
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_template_failure_propagates() {
        let calibration = Calibration::default();
        let templates = TemplatePaths::new("/nonexistent/m.jpg", "/nonexistent/c.jpg");
        let flow = RowFlow::new(&calibration, &templates);
        let sheet = Worksheet::new(
            "One",
            vec!["Roll No".to_string()],
            vec![vec![CellValue::Number(1.0)]],
        );

        assert!(process_sheet(&sheet, 1, &flow).is_err());
    }
}
