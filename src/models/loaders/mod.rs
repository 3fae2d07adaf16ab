pub mod calibration_loader;
pub mod workbook_loader;

pub use calibration_loader::load_calibration;
pub use workbook_loader::{load_workbook, load_workbook_from_bytes};
