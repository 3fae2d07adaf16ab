use crate::error::{AppResult, ConfigError};
use crate::models::Calibration;
use std::path::Path;
use tokio::fs;

/// 加载校准表：未指定文件时使用内置常量
pub async fn load_calibration(path: Option<&Path>) -> AppResult<Calibration> {
    let Some(path) = path else {
        return Ok(Calibration::default());
    };

    let content = fs::read_to_string(path).await.map_err(|e| {
        ConfigError::CalibrationReadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        }
    })?;

    let calibration = parse_calibration(&content, &path.display().to_string())?;
    tracing::info!("📐 已加载校准文件: {}", path.display());
    Ok(calibration)
}

/// 解析 TOML 格式的校准表并校验数值
pub fn parse_calibration(content: &str, origin: &str) -> AppResult<Calibration> {
    let calibration: Calibration =
        toml::from_str(content).map_err(|e| ConfigError::CalibrationParseFailed {
            path: origin.to_string(),
            source: Box::new(e),
        })?;

    for (name, layout) in [("master", &calibration.master), ("child", &calibration.child)] {
        layout
            .validate(name)
            .map_err(|(field, reason)| ConfigError::InvalidCalibration { field, reason })?;
    }

    Ok(calibration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use pretty_assertions::assert_eq;

    const DEFAULT_TOML: &str = r#"
[master]
column_x_cm = [10.1, 11.5, 12.9]
column_y_top_cm = [22.0, 22.0, 22.0]
row_spacing_cm = 0.62
radius_cm = 0.24
vertical_offset_cm = 2.6
fine_tune_cm = 0.03
x_scale_divisor = 2.2
text_offset_cm = 2.1
text_font_size = 14.0

[child]
column_x_cm = [15.9, 17.3, 18.6]
column_y_top_cm = [21.2, 21.2, 21.2]
row_spacing_cm = 0.61
radius_cm = 0.23
vertical_offset_cm = 2.6
fine_tune_cm = 0.2
x_scale_divisor = 2.2
text_offset_cm = 2.0
text_font_size = 14.0
"#;

    #[test]
    fn test_parse_matches_builtin_master() {
        let calibration = parse_calibration(DEFAULT_TOML, "inline").unwrap();
        assert_eq!(calibration.master, Calibration::default().master);
    }

    #[test]
    fn test_missing_key_is_error() {
        let broken = DEFAULT_TOML.replace("radius_cm = 0.24\n", "");
        let err = parse_calibration(&broken, "inline").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::CalibrationParseFailed { .. })
        ));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let broken = DEFAULT_TOML.replacen("x_scale_divisor = 2.2", "x_scale_divisor = 0.0", 1);
        let err = parse_calibration(&broken, "inline").unwrap_err();
        assert!(err.to_string().contains("master.x_scale_divisor"));
    }

    #[tokio::test]
    async fn test_no_file_uses_builtin() {
        let calibration = load_calibration(None).await.unwrap();
        assert_eq!(calibration, Calibration::default());
    }
}
