use crate::models::Grade;

/// 模板类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateVariant {
    /// 通用 / 高年级模板
    Master,
    /// 低年级（1-3 年级）模板
    Child,
}

impl TemplateVariant {
    /// 按年级选择模板：只有 1、2、3 年级使用 Child，其余（含无法识别）使用 Master
    pub fn select(grade: Grade) -> Self {
        match grade.level() {
            Some(1..=3) => TemplateVariant::Child,
            _ => TemplateVariant::Master,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateVariant::Master => "master",
            TemplateVariant::Child => "child",
        }
    }
}

impl std::fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
