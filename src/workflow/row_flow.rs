//! 单行处理流程
//!
//! 取字段 → 规范化学号 → 解析年级选模板 → 加载模板 → 绘制一页

use crate::error::{classify, AppError, AppResult, AssetError, Disposition, Fallback, Issue};
use crate::infrastructure::{PdfCanvas, TemplateStore};
use crate::models::{
    CanonicalField, CellValue, Calibration, Grade, RollNumber, StudentRecord, TemplateVariant,
    Worksheet,
};
use crate::services::{
    normalize_roll_number, parse_grade, ColumnMapping, InfoBlock, PageComposer, PageContent,
    TemplatePaths,
};
use crate::workflow::RowCtx;
use tracing::{debug, error};

/// 单行处理结果
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    pub roll_no: RollNumber,
    pub grade: Grade,
    pub variant: TemplateVariant,
}

/// 按列映射从某一行取出学生记录，未映射的字段为空
pub fn extract_record(sheet: &Worksheet, mapping: &ColumnMapping, row: usize) -> StudentRecord {
    let field = |f: CanonicalField| -> CellValue {
        mapping
            .index_of(f)
            .map(|col| sheet.cell(row, col).clone())
            .unwrap_or_default()
    };

    StudentRecord {
        student_name: field(CanonicalField::StudentName),
        school_name: field(CanonicalField::SchoolName),
        class: field(CanonicalField::Class),
        division: field(CanonicalField::Division),
        roll_no: field(CanonicalField::RollNo),
    }
}

/// 单行处理流程
///
/// 校准表和模板路径在整个批次内只读
pub struct RowFlow<'a> {
    calibration: &'a Calibration,
    templates: &'a TemplatePaths,
}

impl<'a> RowFlow<'a> {
    pub fn new(calibration: &'a Calibration, templates: &'a TemplatePaths) -> Self {
        Self {
            calibration,
            templates,
        }
    }

    /// 规范化学号，空值按统一策略回退
    pub fn roll_number(&self, record: &StudentRecord, ctx: &RowCtx) -> RollNumber {
        if record.roll_no.is_blank() {
            if let Disposition::Recovered(Fallback::RollNumber(default)) =
                classify(&Issue::BlankRollNumber)
            {
                debug!("{} 学号为空，使用 {}", ctx, default);
                return default;
            }
        }
        normalize_roll_number(&record.roll_no)
    }

    /// 解析年级并选择模板，无法识别的年级按统一策略回退
    pub fn variant(&self, record: &StudentRecord, ctx: &RowCtx) -> (Grade, TemplateVariant) {
        let grade = parse_grade(&record.class);
        if grade == Grade::Unknown {
            let issue = Issue::UnknownGrade {
                raw: record.class.display_text(),
            };
            if let Disposition::Recovered(Fallback::Variant(variant)) = classify(&issue) {
                debug!("{} 年级无法识别 ({:?})，使用 {} 模板", ctx, issue, variant);
                return (grade, variant);
            }
        }
        (grade, TemplateVariant::select(grade))
    }

    /// 执行一行的完整流程，向画布追加一页
    pub fn run(
        &self,
        canvas: &mut PdfCanvas,
        store: &mut TemplateStore,
        record: &StudentRecord,
        ctx: &RowCtx,
    ) -> AppResult<RowOutcome> {
        let roll_no = self.roll_number(record, ctx);
        let (grade, variant) = self.variant(record, ctx);

        let path = self.templates.for_variant(variant);
        let template = match store.get_or_load(path) {
            Ok(template) => template,
            Err(e) => {
                error!("{} ❌ 模板加载失败: {}", ctx, e);
                let issue = Issue::TemplateLoad {
                    path: path.display().to_string(),
                    reason: match &e {
                        AppError::Asset(AssetError::TemplateLoadFailed { source, .. }) => {
                            source.to_string()
                        }
                        other => other.to_string(),
                    },
                };
                return Err(issue.into_error().unwrap_or(e));
            }
        };

        let content = PageContent {
            roll_no: roll_no.clone(),
            info: InfoBlock {
                student_name: record.student_name.display_text(),
                school_name: record.school_name.display_text(),
                class: record.class.display_text(),
                division: record.division.display_text(),
            },
        };

        PageComposer::compose(canvas, template, self.calibration.layout(variant), &content)?;
        debug!("{} ✓ 学号 {} 年级 {} 模板 {}", ctx, roll_no, grade, variant);

        Ok(RowOutcome {
            roll_no,
            grade,
            variant,
        })
    }
}
