//! 取值规范化服务 - 业务能力层
//!
//! 学号规范化与文件名清理，均为纯函数

use crate::models::{CellValue, RollNumber};
use regex::Regex;
use std::sync::LazyLock;

static ILLEGAL_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("静态正则"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("静态正则"));

/// 文件名最大长度（字符）
pub const MAX_FILENAME_CHARS: usize = 200;

/// 规范化学号
///
/// - 空值 → "000"
/// - 可按数值解释 → 取整后左侧补零
/// - 否则 → 原文本左侧补零后取前 3 个字符
///
/// 结果恒为 3 个字符。超过三位的数字同样取前 3 个字符。
pub fn normalize_roll_number(raw: &CellValue) -> RollNumber {
    if raw.is_blank() {
        return RollNumber::zero();
    }

    match raw.as_number().filter(|n| n.is_finite()) {
        // 直接格式化浮点数，超出 i64 范围的大数同样保留前几位；+0.0 把 -0 归一为 0
        Some(n) => RollNumber::from_padded(&format!("{:.0}", n.trunc() + 0.0)),
        None => RollNumber::from_padded(&raw.to_string()),
    }
}

/// 工作表名 → 安全的文件名（不含扩展名）
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = ILLEGAL_FILENAME_CHARS.replace_all(name.trim(), "_");
    let collapsed = WHITESPACE_RUN.replace_all(&cleaned, "_");
    collapsed.chars().take(MAX_FILENAME_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_roll_number_examples() {
        assert_eq!(normalize_roll_number(&text("7")).as_str(), "007");
        assert_eq!(normalize_roll_number(&text("")).as_str(), "000");
        assert_eq!(normalize_roll_number(&text("12.0")).as_str(), "012");
        assert_eq!(normalize_roll_number(&text("abc")).as_str(), "abc");
        // 文本先去掉首尾空白再补零
        assert_eq!(normalize_roll_number(&text(" ab")).as_str(), "0ab");
        assert_eq!(normalize_roll_number(&CellValue::Empty).as_str(), "000");
    }

    #[test]
    fn test_roll_number_numeric_cells() {
        assert_eq!(normalize_roll_number(&CellValue::Number(5.0)).as_str(), "005");
        assert_eq!(normalize_roll_number(&CellValue::Number(42.9)).as_str(), "042");
        assert_eq!(normalize_roll_number(&CellValue::Number(f64::NAN)).as_str(), "000");
        assert_eq!(normalize_roll_number(&text(" 9 ")).as_str(), "009");
    }

    #[test]
    fn test_roll_number_always_three_chars() {
        let inputs = [
            text("1234"),
            CellValue::Number(98765.0),
            text("A1"),
            text("roll-07"),
            text("inf"),
            CellValue::Number(-3.0),
            CellValue::Bool(true),
        ];
        for input in inputs {
            let roll = normalize_roll_number(&input);
            assert_eq!(roll.as_str().chars().count(), 3, "输入: {:?}", input);
        }
        assert_eq!(normalize_roll_number(&text("A1")).as_str(), "0A1");
        assert_eq!(normalize_roll_number(&text("1234")).as_str(), "123");
        assert_eq!(normalize_roll_number(&CellValue::Number(1e19)).as_str(), "100");
        assert_eq!(normalize_roll_number(&CellValue::Number(1e300)).as_str(), "100");
        assert_eq!(normalize_roll_number(&CellValue::Number(-0.4)).as_str(), "000");
        assert_eq!(normalize_roll_number(&CellValue::Number(-3.0)).as_str(), "-03");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My/Sheet:1"), "My_Sheet_1");
        assert_eq!(sanitize_filename("Class 7   B"), "Class_7_B");
        assert_eq!(sanitize_filename(r#"a\b*c?d"e<f>g|h"#), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn test_sanitize_filename_limits() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_FILENAME_CHARS);

        let nasty = r#"\/*?:"<>|"#.repeat(40);
        let cleaned = sanitize_filename(&nasty);
        assert!(cleaned.chars().count() <= MAX_FILENAME_CHARS);
        assert!(!cleaned.contains(|c| r#"\/*?:"<>|"#.contains(c)));
    }
}
