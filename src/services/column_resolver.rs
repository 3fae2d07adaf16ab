//! 列名解析服务 - 业务能力层
//!
//! 只负责"表头 → 标准字段"的映射，不读取任何数据行

use crate::models::CanonicalField;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]").expect("静态正则"));

/// 表头规范化：转小写并去掉所有非字母数字字符
pub fn normalize_header(header: &str) -> String {
    NON_ALNUM
        .replace_all(&header.trim().to_lowercase(), "")
        .into_owned()
}

/// 匹配规则，按顺序尝试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// 规范化表头与别名完全相同
    Exact,
    /// 规范化表头包含别名
    Contains,
}

impl MatchRule {
    /// 规则优先级：先精确，后包含
    pub const ORDERED: [MatchRule; 2] = [MatchRule::Exact, MatchRule::Contains];

    fn matches(self, normalized: &str, alias: &str) -> bool {
        match self {
            MatchRule::Exact => normalized == alias,
            MatchRule::Contains => normalized.contains(alias),
        }
    }
}

/// 某个字段匹配到的列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// 列序号（从 0 开始）
    pub index: usize,
    /// 原始表头
    pub label: String,
    /// 命中的规则
    pub rule: MatchRule,
}

/// 一个工作表的列映射，构建后不再修改
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    columns: HashMap<CanonicalField, ResolvedColumn>,
}

impl ColumnMapping {
    pub fn get(&self, field: CanonicalField) -> Option<&ResolvedColumn> {
        self.columns.get(&field)
    }

    /// 字段对应的列序号
    pub fn index_of(&self, field: CanonicalField) -> Option<usize> {
        self.get(field).map(|c| c.index)
    }

    /// 未能匹配的字段（按固定顺序）
    pub fn unmapped(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|f| !self.columns.contains_key(f))
            .collect()
    }
}

/// 列名解析服务
pub struct ColumnResolver;

impl ColumnResolver {
    /// 根据表头构建列映射
    ///
    /// 对每个字段依次应用 [`MatchRule::ORDERED`]；同一规则下按表头顺序取第一个命中的列。
    /// 找不到的字段不报错，后续按空白处理。
    pub fn resolve(headers: &[String]) -> ColumnMapping {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let columns = CanonicalField::ALL
            .into_iter()
            .filter_map(|field| {
                Self::find_column(&normalized, field.aliases()).map(|(index, rule)| {
                    (
                        field,
                        ResolvedColumn {
                            index,
                            label: headers[index].clone(),
                            rule,
                        },
                    )
                })
            })
            .collect();

        ColumnMapping { columns }
    }

    fn find_column(normalized: &[String], aliases: &[&str]) -> Option<(usize, MatchRule)> {
        MatchRule::ORDERED.into_iter().find_map(|rule| {
            normalized
                .iter()
                .position(|header| aliases.iter().any(|alias| rule.matches(header, alias)))
                .map(|index| (index, rule))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Roll No."), "rollno");
        assert_eq!(normalize_header("ROLLNO"), "rollno");
        assert_eq!(normalize_header("roll_no"), "rollno");
        assert_eq!(normalize_header("  Name of the Student "), "nameofthestudent");
    }

    #[test]
    fn test_punctuation_and_case_insensitive() {
        for label in ["Roll No.", "ROLLNO", "roll_no"] {
            let mapping = ColumnResolver::resolve(&headers(&["Name", label]));
            let column = mapping.get(CanonicalField::RollNo).unwrap();
            assert_eq!(column.index, 1);
            assert_eq!(column.rule, MatchRule::Exact);
        }
    }

    #[test]
    fn test_exact_match_beats_earlier_substring_match() {
        // "School Name" 包含 "name"，但 "Student Name" 是精确匹配
        let mapping = ColumnResolver::resolve(&headers(&["School Name", "Student Name"]));
        assert_eq!(mapping.index_of(CanonicalField::StudentName), Some(1));
        assert_eq!(mapping.index_of(CanonicalField::SchoolName), Some(0));
    }

    #[test]
    fn test_substring_fallback_first_in_header_order() {
        let mapping =
            ColumnResolver::resolve(&headers(&["Student Roll Number", "Class / Grade", "Sec"]));
        let roll = mapping.get(CanonicalField::RollNo).unwrap();
        assert_eq!(roll.index, 0);
        assert_eq!(roll.rule, MatchRule::Contains);
        assert_eq!(mapping.index_of(CanonicalField::Class), Some(1));
        assert_eq!(mapping.index_of(CanonicalField::Division), None);
    }

    #[test]
    fn test_unmapped_fields() {
        let mapping = ColumnResolver::resolve(&headers(&["Roll", "Remarks", ""]));
        assert_eq!(
            mapping.unmapped(),
            vec![
                CanonicalField::SchoolName,
                CanonicalField::Class,
                CanonicalField::Division,
                CanonicalField::RollNo,
                CanonicalField::StudentName,
            ]
        );
    }

    #[test]
    fn test_same_column_may_serve_two_fields() {
        // 只有一列 "School Name" 时，学生姓名也会通过包含匹配落到这一列
        let mapping = ColumnResolver::resolve(&headers(&["School Name"]));
        assert_eq!(mapping.index_of(CanonicalField::SchoolName), Some(0));
        assert_eq!(mapping.index_of(CanonicalField::StudentName), Some(0));
    }
}
