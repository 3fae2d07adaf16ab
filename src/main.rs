use anyhow::{bail, Result};
use clap::Parser;
use omr_sheet_generator::services::LogoSource;
use omr_sheet_generator::utils::init_tracing;
use omr_sheet_generator::{App, Config};
use std::path::PathBuf;
use tracing::{error, info};

/// 根据学生名单表格批量生成 OMR 答题卡
#[derive(Parser, Debug)]
#[command(name = "omr-sheet-generator", version, about)]
struct Args {
    /// 学生名单表格（.xlsx / .xlsm / .xls / .ods）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出压缩包路径
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 模板和 Logo 所在目录
    #[arg(short, long)]
    assets_dir: Option<PathBuf>,

    /// 校准文件（TOML），覆盖内置坐标
    #[arg(short, long)]
    calibration: Option<PathBuf>,

    /// 运行日志文件
    #[arg(long)]
    log_file: Option<String>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// 命令行参数覆盖环境变量配置
    fn apply(self, mut config: Config) -> Config {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(assets_dir) = self.assets_dir {
            config.assets_dir = assets_dir;
        }
        if let Some(calibration) = self.calibration {
            config.calibration_file = Some(calibration);
        }
        if let Some(log_file) = self.log_file {
            config.output_log_file = log_file;
        }
        config.verbose_logging |= self.verbose;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Args::parse().apply(Config::from_env());

    // 初始化日志
    init_tracing(config.verbose_logging);

    if config.input.as_os_str().is_empty() {
        bail!("未指定输入表格，请使用 --input 或设置 OMR_INPUT");
    }

    // 初始化并运行应用
    let app = App::initialize(config).await.inspect_err(|e| {
        error!("❌ 初始化失败: {:#}", e);
    })?;
    if let LogoSource::File(path) = app.logo() {
        info!("🖼️ Logo: {}", path.display());
    }

    match app.run().await {
        Ok(output) => {
            info!("🎉 OMR 答题卡已生成: {}", output.display());
            Ok(())
        }
        Err(e) => {
            error!("❌ 生成失败，未写出压缩包: {:#}", e);
            Err(e)
        }
    }
}
