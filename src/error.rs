use crate::models::{CanonicalField, RollNumber, TemplateVariant};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 静态资源（模板图片）错误
    #[error("资源错误: {0}")]
    Asset(#[from] AssetError),
    /// 输入表格错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// PDF 渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 压缩包打包错误
    #[error("打包错误: {0}")]
    Archive(#[from] ArchiveError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// 模板 / Logo 资源错误
#[derive(Debug, Error)]
pub enum AssetError {
    /// 模板文件不存在（处理开始前的前置检查）
    #[error("OMR 模板文件缺失: {path}")]
    TemplateMissing { path: String },
    /// 渲染时加载模板图片失败
    #[error("无法加载 OMR 模板图片: {path} → {source}")]
    TemplateLoadFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
}

/// 输入表格错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// 无法识别 / 解析工作簿
    #[error("无法解析工作簿: {source}")]
    WorkbookParseFailed {
        #[source]
        source: BoxedSource,
    },
    /// 读取工作表失败
    #[error("读取工作表失败 ({sheet}): {source}")]
    WorksheetReadFailed {
        sheet: String,
        #[source]
        source: BoxedSource,
    },
}

/// PDF 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 内容流编码失败
    #[error("页面内容编码失败: {source}")]
    ContentEncodeFailed {
        #[source]
        source: BoxedSource,
    },
    /// 文档序列化失败
    #[error("PDF 序列化失败 ({sheet}): {source}")]
    SaveFailed {
        sheet: String,
        #[source]
        source: BoxedSource,
    },
    /// 引用了未注册的图片
    #[error("未注册的图片资源: {name}")]
    UnknownImage { name: String },
}

/// 压缩包错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 写入条目失败
    #[error("写入压缩包条目失败 ({entry}): {source}")]
    EntryWriteFailed {
        entry: String,
        #[source]
        source: BoxedSource,
    },
    /// 完成压缩包失败
    #[error("压缩包收尾失败: {source}")]
    FinishFailed {
        #[source]
        source: BoxedSource,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 校准文件读取失败
    #[error("读取校准文件失败 ({path}): {source}")]
    CalibrationReadFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// 校准文件 TOML 解析失败
    #[error("校准文件解析失败 ({path}): {source}")]
    CalibrationParseFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// 校准值非法
    #[error("校准值非法 ({field}): {reason}")]
    InvalidCalibration { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建模板加载失败错误
    pub fn template_load_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Asset(AssetError::TemplateLoadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Input(InputError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建工作簿解析错误
    pub fn workbook_parse_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Input(InputError::WorkbookParseFailed {
            source: Box::new(source),
        })
    }

    /// 创建 PDF 序列化错误
    pub fn pdf_save_failed(
        sheet: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Render(RenderError::SaveFailed {
            sheet: sheet.into(),
            source: Box::new(source),
        })
    }

    /// 创建压缩包条目写入错误
    pub fn archive_entry_failed(
        entry: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Archive(ArchiveError::EntryWriteFailed {
            entry: entry.into(),
            source: Box::new(source),
        })
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

// ========== 问题分级 ==========

/// 处理过程中遇到的异常情况
///
/// 只描述"发生了什么"，是否致命由 [`classify`] 统一决定
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// 模板文件不存在
    MissingTemplate { path: String },
    /// 模板图片加载失败
    TemplateLoad { path: String, reason: String },
    /// 某个标准字段在工作表中找不到对应列
    UnmappedColumn { field: CanonicalField },
    /// 学号为空
    BlankRollNumber,
    /// 年级无法识别
    UnknownGrade { raw: String },
    /// Logo 文件不存在
    MissingLogo { path: String },
}

/// 可恢复问题的默认值
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    /// 字段按空白处理
    BlankField,
    /// 使用默认学号
    RollNumber(RollNumber),
    /// 使用指定模板
    Variant(TemplateVariant),
    /// 使用占位 Logo
    PlaceholderLogo,
}

/// 问题的处理方式
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// 终止整个批次
    Fatal,
    /// 使用默认值继续
    Recovered(Fallback),
}

/// 统一的错误分级策略：模板缺失 / 加载失败终止批次，其余全部回退默认值
pub fn classify(issue: &Issue) -> Disposition {
    match issue {
        Issue::MissingTemplate { .. } | Issue::TemplateLoad { .. } => Disposition::Fatal,
        Issue::UnmappedColumn { .. } => Disposition::Recovered(Fallback::BlankField),
        Issue::BlankRollNumber => Disposition::Recovered(Fallback::RollNumber(RollNumber::zero())),
        Issue::UnknownGrade { .. } => {
            Disposition::Recovered(Fallback::Variant(TemplateVariant::Master))
        }
        Issue::MissingLogo { .. } => Disposition::Recovered(Fallback::PlaceholderLogo),
    }
}

impl Issue {
    /// 将致命问题转换为错误（非致命问题返回 None）
    pub fn into_error(self) -> Option<AppError> {
        if classify(&self) != Disposition::Fatal {
            return None;
        }
        match self {
            Issue::MissingTemplate { path } => {
                Some(AppError::Asset(AssetError::TemplateMissing { path }))
            }
            Issue::TemplateLoad { path, reason } => Some(AppError::Asset(
                AssetError::TemplateLoadFailed {
                    path,
                    source: reason.into(),
                },
            )),
            _ => None,
        }
    }
}
