pub mod calibration;
pub mod cell;
pub mod field;
pub mod grade;
pub mod loaders;
pub mod roll_number;
pub mod roster;
pub mod template;

pub use calibration::{BubbleLayout, Calibration};
pub use cell::CellValue;
pub use field::CanonicalField;
pub use grade::Grade;
pub use loaders::{load_calibration, load_workbook, load_workbook_from_bytes};
pub use roll_number::RollNumber;
pub use roster::{StudentRecord, Workbook, Worksheet};
pub use template::TemplateVariant;
