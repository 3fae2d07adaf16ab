//! 压缩包写入 - 基础设施层
//!
//! 在内存中构建 zip，条目按写入顺序排列

use crate::error::{AppError, AppResult, ArchiveError};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 打包完成的压缩包
#[derive(Debug, Clone)]
pub struct OutputArchive {
    /// 条目名，按写入顺序
    pub entries: Vec<String>,
    pub bytes: Vec<u8>,
}

/// 压缩包写入器
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    entries: Vec<String>,
    taken: HashSet<String>,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: FileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: Vec::new(),
            taken: HashSet::new(),
        }
    }

    /// 为 `stem` + `ext` 分配一个尚未使用的条目名
    ///
    /// 清理后的工作表名可能重名（如 "A/B" 与 "A:B"），重名时依次追加 `_2`、`_3` …
    pub fn unique_name(&self, stem: &str, ext: &str) -> String {
        let first = format!("{}{}", stem, ext);
        if !self.taken.contains(&first) {
            return first;
        }
        (2..)
            .map(|n| format!("{}_{}{}", stem, n, ext))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or(first)
    }

    /// 写入一个条目
    pub fn add(&mut self, name: &str, data: &[u8]) -> AppResult<()> {
        self.zip
            .start_file(name, self.options)
            .map_err(|e| AppError::archive_entry_failed(name, e))?;
        self.zip
            .write_all(data)
            .map_err(|e| AppError::archive_entry_failed(name, e))?;

        self.taken.insert(name.to_string());
        self.entries.push(name.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 写入中央目录并取出字节
    pub fn finish(mut self) -> AppResult<OutputArchive> {
        let cursor = self.zip.finish().map_err(|e| {
            AppError::Archive(ArchiveError::FinishFailed {
                source: Box::new(e),
            })
        })?;
        Ok(OutputArchive {
            entries: self.entries,
            bytes: cursor.into_inner(),
        })
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}
