//! 年级解析服务 - 业务能力层

use crate::models::{CellValue, Grade};
use phf::phf_map;
use regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("静态正则"));

static ROMAN_NUMERALS: phf::Map<&'static str, u32> = phf_map! {
    "i" => 1, "ii" => 2, "iii" => 3, "iv" => 4, "v" => 5, "vi" => 6,
    "vii" => 7, "viii" => 8, "ix" => 9, "x" => 10, "xi" => 11, "xii" => 12,
};

static ORDINAL_WORDS: phf::Map<&'static str, u32> = phf_map! {
    "first" => 1, "second" => 2, "third" => 3, "fourth" => 4,
    "fifth" => 5, "sixth" => 6, "seventh" => 7, "eighth" => 8,
    "ninth" => 9, "tenth" => 10, "eleventh" => 11, "twelfth" => 12,
};

/// 从单元格解析年级
pub fn parse_grade(raw: &CellValue) -> Grade {
    if raw.is_blank() {
        return Grade::Unknown;
    }
    parse_grade_str(&raw.to_string())
}

/// 从文本解析年级，按以下顺序取第一个命中的规则：
///
/// 1. 纯数字 → 直接解析
/// 2. 含数字 → 取第一段连续数字（"Class-7B" → 7）
/// 3. 罗马数字 i..xii
/// 4. 英文序数词 first..twelfth
/// 5. 其余 → 无法识别
pub fn parse_grade_str(raw: &str) -> Grade {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return Grade::Unknown;
    }

    if s.chars().all(|c| c.is_ascii_digit()) {
        return Grade::from(s.parse::<u32>().ok());
    }

    if let Some(run) = DIGIT_RUN.find(&s) {
        return Grade::from(run.as_str().parse::<u32>().ok());
    }

    let named = ROMAN_NUMERALS
        .get(s.as_str())
        .or_else(|| ORDINAL_WORDS.get(s.as_str()))
        .copied();
    Grade::from(named)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemplateVariant;

    #[test]
    fn test_plain_digits() {
        assert_eq!(parse_grade_str("7"), Grade::Level(7));
        assert_eq!(parse_grade_str(" 12 "), Grade::Level(12));
    }

    #[test]
    fn test_first_digit_run() {
        assert_eq!(parse_grade_str("Class 7B"), Grade::Level(7));
        assert_eq!(parse_grade_str("Class-7B"), Grade::Level(7));
        assert_eq!(parse_grade_str("Grade 4"), Grade::Level(4));
        assert_eq!(parse_grade_str("std 10 / sec 2"), Grade::Level(10));
    }

    #[test]
    fn test_roman_numerals_case_insensitive() {
        assert_eq!(parse_grade_str("VII"), Grade::Level(7));
        assert_eq!(parse_grade_str("iii"), Grade::Level(3));
        assert_eq!(parse_grade_str("XII"), Grade::Level(12));
        assert_eq!(parse_grade_str("Class VII"), Grade::Unknown);
    }

    #[test]
    fn test_ordinal_words() {
        assert_eq!(parse_grade_str("seventh"), Grade::Level(7));
        assert_eq!(parse_grade_str("First"), Grade::Level(1));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(parse_grade_str(""), Grade::Unknown);
        assert_eq!(parse_grade_str("nursery"), Grade::Unknown);
        assert_eq!(parse_grade(&CellValue::Empty), Grade::Unknown);
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(parse_grade_str("Class ７"), Grade::Unknown);
        assert_eq!(parse_grade_str("٣"), Grade::Unknown);
        assert_eq!(TemplateVariant::select(parse_grade_str("٣")), TemplateVariant::Master);
    }

    #[test]
    fn test_numeric_cells() {
        assert_eq!(parse_grade(&CellValue::Number(3.0)), Grade::Level(3));
        assert_eq!(parse_grade(&CellValue::Number(2.5)), Grade::Level(2));
    }
}
