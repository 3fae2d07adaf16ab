/// 规范化学号
///
/// 恒为 3 个字符，构造时统一截断 / 补零
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RollNumber(String);

impl RollNumber {
    /// 固定宽度
    pub const WIDTH: usize = 3;

    /// 默认学号 "000"
    pub fn zero() -> Self {
        Self("0".repeat(Self::WIDTH))
    }

    /// 由任意文本构造：左侧补零到 3 位后取前 3 个字符
    pub fn from_padded(raw: &str) -> Self {
        let padded = zfill(raw, Self::WIDTH);
        Self(padded.chars().take(Self::WIDTH).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 逐位取出数字（非数字位为 None）
    pub fn digits(&self) -> impl Iterator<Item = Option<u32>> + '_ {
        self.0.chars().map(|c| c.to_digit(10))
    }
}

impl std::fmt::Display for RollNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 左侧补零，带正负号时补在符号之后
fn zfill(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let fill = "0".repeat(width - len);
    match s.chars().next() {
        Some(sign @ ('+' | '-')) => format!("{}{}{}", sign, fill, &s[1..]),
        _ => format!("{}{}", fill, s),
    }
}
