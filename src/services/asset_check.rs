//! 资源前置检查服务 - 业务能力层
//!
//! 在处理开始前确认模板存在，并决定 Logo 用本地文件还是占位图

use crate::error::{classify, AppResult, Disposition, Fallback, Issue};
use crate::models::TemplateVariant;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Logo 缺失时使用的占位图
pub const PLACEHOLDER_LOGO_URL: &str =
    "https://placehold.co/150x50/3498db/ffffff?text=LOGO+Missing";

/// Logo 来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    File(PathBuf),
    Placeholder(&'static str),
}

/// 两个模板的路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub master: PathBuf,
    pub child: PathBuf,
}

impl TemplatePaths {
    pub fn new(master: impl Into<PathBuf>, child: impl Into<PathBuf>) -> Self {
        Self {
            master: master.into(),
            child: child.into(),
        }
    }

    pub fn for_variant(&self, variant: TemplateVariant) -> &Path {
        match variant {
            TemplateVariant::Master => &self.master,
            TemplateVariant::Child => &self.child,
        }
    }
}

/// 检查模板是否都存在，任何一个缺失都是致命错误
pub fn check_templates(paths: &TemplatePaths) -> AppResult<()> {
    for path in [&paths.child, &paths.master] {
        if path.is_file() {
            continue;
        }
        let issue = Issue::MissingTemplate {
            path: path.display().to_string(),
        };
        if let Some(err) = issue.into_error() {
            return Err(err);
        }
    }
    info!("✓ OMR 模板文件就绪");
    Ok(())
}

/// 解析 Logo 来源，缺失时回退到占位图并给出警告
pub fn resolve_logo(path: &Path) -> LogoSource {
    if path.is_file() {
        return LogoSource::File(path.to_path_buf());
    }

    let issue = Issue::MissingLogo {
        path: path.display().to_string(),
    };
    match classify(&issue) {
        Disposition::Recovered(Fallback::PlaceholderLogo) => warn!(
            "⚠️ 未找到本地 Logo 文件 '{}'，使用占位图: {}",
            path.display(),
            PLACEHOLDER_LOGO_URL
        ),
        other => warn!("⚠️ Logo 缺失 ({:?})，使用占位图", other),
    }
    LogoSource::Placeholder(PLACEHOLDER_LOGO_URL)
}
