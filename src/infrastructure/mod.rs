//! 基础设施层（Infrastructure Layer）
//!
//! 持有稀缺资源（PDF 文档、模板图片、压缩包缓冲区），只暴露能力，不含业务判断

pub mod archive_writer;
pub mod pdf_canvas;
pub mod template_image;

pub use archive_writer::{ArchiveWriter, OutputArchive};
pub use pdf_canvas::PdfCanvas;
pub use template_image::{TemplateImage, TemplateStore};
