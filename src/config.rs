use std::path::PathBuf;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 输入表格文件
    pub input: PathBuf,
    /// 输出压缩包
    pub output: PathBuf,
    /// 模板 / Logo 所在目录
    pub assets_dir: PathBuf,
    /// Master 模板文件名
    pub master_template: String,
    /// Child 模板文件名
    pub child_template: String,
    /// Logo 文件名
    pub logo_file: String,
    /// 可选的校准文件（TOML）
    pub calibration_file: Option<PathBuf>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("Generated_OMRs.zip"),
            assets_dir: PathBuf::from("."),
            master_template: "master_omr.jpg".to_string(),
            child_template: "child_omr.jpg".to_string(),
            logo_file: "logo.webp".to_string(),
            calibration_file: None,
            verbose_logging: false,
            output_log_file: "omr_run.log".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input: std::env::var("OMR_INPUT").map(PathBuf::from).unwrap_or(default.input),
            output: std::env::var("OMR_OUTPUT").map(PathBuf::from).unwrap_or(default.output),
            assets_dir: std::env::var("OMR_ASSETS_DIR").map(PathBuf::from).unwrap_or(default.assets_dir),
            master_template: default.master_template,
            child_template: default.child_template,
            logo_file: default.logo_file,
            calibration_file: std::env::var("OMR_CALIBRATION").ok().map(PathBuf::from).or(default.calibration_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OMR_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// Master 模板完整路径
    pub fn master_template_path(&self) -> PathBuf {
        self.assets_dir.join(&self.master_template)
    }

    /// Child 模板完整路径
    pub fn child_template_path(&self) -> PathBuf {
        self.assets_dir.join(&self.child_template)
    }

    /// Logo 完整路径
    pub fn logo_path(&self) -> PathBuf {
        self.assets_dir.join(&self.logo_file)
    }
}
