use crate::error::{AppError, AppResult, InputError};
use crate::models::{CellValue, Workbook, Worksheet};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// 读取表格文件并解析为工作簿
pub async fn load_workbook(path: &Path) -> AppResult<Workbook> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    info!(
        "📄 已读取表格文件: {} ({} 字节)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        bytes.len()
    );

    load_workbook_from_bytes(bytes)
}

/// 从内存中的表格数据解析工作簿（格式自动识别：xlsx / xlsm / xls / ods）
///
/// 每个工作表的第一行是表头，其余行是数据；整行为空的行会被跳过
pub fn load_workbook_from_bytes(bytes: Vec<u8>) -> AppResult<Workbook> {
    let mut reader =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(AppError::workbook_parse_failed)?;

    let mut sheets = Vec::new();
    for sheet_name in reader.sheet_names() {
        let range = reader.worksheet_range(&sheet_name).map_err(|e| {
            AppError::Input(InputError::WorksheetReadFailed {
                sheet: sheet_name.clone(),
                source: Box::new(e),
            })
        })?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|header_row| header_row.iter().map(header_text).collect())
            .unwrap_or_default();

        let data: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(CellValue::from).collect::<Vec<_>>())
            .filter(|row| !row.iter().all(CellValue::is_blank))
            .collect();

        debug!(
            "工作表 {}: {} 列, {} 行数据",
            sheet_name,
            headers.len(),
            data.len()
        );
        sheets.push(Worksheet::new(sheet_name, headers, data));
    }

    Ok(Workbook { sheets })
}

fn header_text(cell: &Data) -> String {
    CellValue::from(cell).display_text()
}
