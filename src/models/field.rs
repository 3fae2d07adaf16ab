/// 标准字段
///
/// 不论表头原文怎么写，最终只提取这五个字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    SchoolName,
    Class,
    Division,
    RollNo,
    StudentName,
}

impl CanonicalField {
    /// 全部字段（固定顺序）
    pub const ALL: [CanonicalField; 5] = [
        CanonicalField::SchoolName,
        CanonicalField::Class,
        CanonicalField::Division,
        CanonicalField::RollNo,
        CanonicalField::StudentName,
    ];

    /// 字段标识
    pub fn key(self) -> &'static str {
        match self {
            CanonicalField::SchoolName => "school_name",
            CanonicalField::Class => "class",
            CanonicalField::Division => "division",
            CanonicalField::RollNo => "roll_no",
            CanonicalField::StudentName => "student_name",
        }
    }

    /// 别名表（小写、仅字母数字）
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::SchoolName => &["schoolname", "scoolname", "school"],
            CanonicalField::Class => &["class", "grade", "standard"],
            CanonicalField::Division => &["division", "section"],
            CanonicalField::RollNo => &["rollno", "rollnumber"],
            CanonicalField::StudentName => &["nameofthestudent", "name", "studentname"],
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
