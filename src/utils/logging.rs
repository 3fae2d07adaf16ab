//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use crate::config::Config;
use crate::orchestrator::BatchStats;
use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化控制台日志
///
/// `RUST_LOG` 优先；未设置时 verbose 为 debug，否则为 info
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
///
/// # 返回
/// 返回是否成功初始化
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nOMR 答题卡生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一行
pub fn append_log_file(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - OMR 答题卡批量生成");
    info!("📄 输入表格: {}", config.input.display());
    info!("📦 输出压缩包: {}", config.output.display());
    info!("🖼️ 资源目录: {}", config.assets_dir.display());
    if let Some(path) = &config.calibration_file {
        info!("📐 校准文件: {}", path.display());
    }
    info!("{}", "=".repeat(60));
}

/// 记录工作簿加载信息
///
/// # 参数
/// - `sheets`: 工作表数量
/// - `pages`: 预计生成的页数（数据行总数）
pub fn log_workbook_loaded(sheets: usize, pages: usize) {
    info!("✓ 找到 {} 个工作表", sheets);
    info!("📋 共 {} 行学生数据，每行生成一页答题卡\n", pages);
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 批量统计
/// - `entries`: 压缩包条目名
/// - `config`: 程序配置
pub fn print_final_stats(stats: &BatchStats, entries: &[String], config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 工作表: {}", stats.sheets);
    info!(
        "✅ 答题卡: {} 页 (Master {}, Child {})",
        stats.pages, stats.master_pages, stats.child_pages
    );
    for entry in entries {
        info!("   📄 {}", truncate_text(entry, 60));
    }
    info!("{}", "=".repeat(60));
    info!("\n压缩包已保存至: {}", config.output.display());
    info!("日志已保存至: {}", config.output_log_file);
}

/// 将本次运行的统计写入日志文件
pub fn append_run_summary(
    log_file_path: &str,
    stats: &BatchStats,
    entries: &[String],
    output: &Path,
) -> Result<()> {
    append_log_file(
        log_file_path,
        &format!(
            "完成时间: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
    )?;
    append_log_file(
        log_file_path,
        &format!(
            "工作表 {} 个, 答题卡 {} 页 (Master {}, Child {})",
            stats.sheets, stats.pages, stats.master_pages, stats.child_pages
        ),
    )?;
    for entry in entries {
        append_log_file(log_file_path, &format!("  {}", entry))?;
    }
    append_log_file(log_file_path, &format!("输出: {}", output.display()))
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Class_7.pdf", 60), "Class_7.pdf");
        assert_eq!(truncate_text("七年级甲班", 3), "七年级...");
    }

    #[test]
    fn test_log_file_header_and_summary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");
        let path_str = path.to_str().unwrap();

        init_log_file(path_str).unwrap();
        let stats = BatchStats {
            sheets: 2,
            pages: 5,
            master_pages: 3,
            child_pages: 2,
        };
        append_run_summary(
            path_str,
            &stats,
            &["A.pdf".to_string(), "B.pdf".to_string()],
            Path::new("out.zip"),
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.contains("OMR 答题卡生成日志"));
        assert!(content.contains("工作表 2 个, 答题卡 5 页 (Master 3, Child 2)"));
        assert!(content.contains("  B.pdf"));
        assert!(content.trim_end().ends_with("输出: out.zip"));
    }
}
