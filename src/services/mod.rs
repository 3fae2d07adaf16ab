pub mod asset_check;
pub mod bubble_geometry;
pub mod column_resolver;
pub mod grade_parser;
pub mod normalizer;
pub mod page_composer;

pub use asset_check::{check_templates, resolve_logo, LogoSource, TemplatePaths};
pub use bubble_geometry::{BubbleGeometry, BubbleMark, DigitLabel, RollStamp};
pub use column_resolver::{ColumnMapping, ColumnResolver, MatchRule};
pub use grade_parser::{parse_grade, parse_grade_str};
pub use normalizer::{normalize_roll_number, sanitize_filename};
pub use page_composer::{InfoBlock, PageComposer, PageContent};
