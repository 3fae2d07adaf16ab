use crate::models::CellValue;

/// 工作表：名称 + 表头 + 数据行
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// 取某行某列的值，越界视为空
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }
}

/// 工作簿：按文件中的顺序排列的工作表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn page_count(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }
}

/// 一名学生的记录（字段已按列映射取出，未映射的字段为空）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentRecord {
    pub student_name: CellValue,
    pub school_name: CellValue,
    pub class: CellValue,
    pub division: CellValue,
    pub roll_no: CellValue,
}

