/// 解析后的年级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    /// 年级数字（1-12 及以上）
    Level(u32),
    /// 无法识别
    Unknown,
}

impl Grade {
    pub fn level(self) -> Option<u32> {
        match self {
            Grade::Level(n) => Some(n),
            Grade::Unknown => None,
        }
    }
}

impl From<Option<u32>> for Grade {
    fn from(level: Option<u32>) -> Self {
        level.map_or(Grade::Unknown, Grade::Level)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::Level(n) => write!(f, "{}", n),
            Grade::Unknown => write!(f, "unknown"),
        }
    }
}
