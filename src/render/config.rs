//! # 渲染配置
//!
//! 生成传递给 `mmdc -c` 的 JSON 配置，并计算输出画布尺寸。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `serde` / `serde_json` 序列化，`tempfile` 持有临时配置文件

use crate::error::{MmdBatchError, Result};

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// scale = 3 时的基准画布宽度
pub const BASE_WIDTH: f64 = 1024.0;
/// scale = 3 时的基准画布高度
pub const BASE_HEIGHT: f64 = 768.0;
/// 基准画布对应的缩放因子
pub const BASE_SCALE: f64 = 3.0;

/// 透明背景
pub const TRANSPARENT: &str = "transparent";

/// 输出画布尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// 由缩放因子计算画布尺寸: round(1024·scale/3) × round(768·scale/3)
    pub fn from_scale(scale: f64) -> Self {
        let factor = scale / BASE_SCALE;
        Self {
            width: (BASE_WIDTH * factor).round() as u32,
            height: (BASE_HEIGHT * factor).round() as u32,
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// mmdc 配置文件根对象
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub puppeteer_config: PuppeteerConfig,
    pub mermaid: MermaidConfig,
}

/// 浏览器截图参数
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuppeteerConfig {
    pub device_scale_factor: f64,
    pub background_color: String,
}

/// Mermaid 初始化参数
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MermaidConfig {
    pub font_size: u32,
    pub flowchart: FlowchartConfig,
    pub theme_variables: ThemeVariables,
}

/// flowchart 布局参数
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartConfig {
    pub html_labels: bool,
    pub padding: u32,
    pub rank_spacing: u32,
    pub node_spacing: u32,
    pub diagram_padding: u32,
    pub use_max_width: bool,
    pub wrap: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    pub font_size: String,
    pub font_family: String,
    pub line_height: u32,
}

impl RenderConfig {
    /// 按缩放因子构建默认配置
    pub fn new(scale: f64) -> Self {
        RenderConfig {
            puppeteer_config: PuppeteerConfig {
                device_scale_factor: scale,
                background_color: TRANSPARENT.to_string(),
            },
            mermaid: MermaidConfig {
                font_size: 14,
                flowchart: FlowchartConfig {
                    html_labels: true,
                    padding: 8,
                    rank_spacing: 20,
                    node_spacing: 30,
                    diagram_padding: 8,
                    use_max_width: true,
                    wrap: true,
                },
                theme_variables: ThemeVariables {
                    font_size: "14px".to_string(),
                    font_family: "arial".to_string(),
                    line_height: 1,
                },
            },
        }
    }

    /// 缩放因子
    pub fn scale(&self) -> f64 {
        self.puppeteer_config.device_scale_factor
    }

    /// 对应的输出画布尺寸
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_scale(self.scale())
    }

    /// 序列化为带缩进的 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 写入临时 .json 文件，文件随返回值 drop 而删除
    pub fn persist(&self, temp_dir: Option<&Path>) -> Result<NamedTempFile> {
        let json = self.to_json()?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("mmdbatch-config-").suffix(".json");
        let mut file = match temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| MmdBatchError::TempFileError {
            purpose: "config".to_string(),
            source: e,
        })?;

        let path = file.path().display().to_string();
        file.write_all(json.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| MmdBatchError::FileWriteError { path, source: e })?;

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_dimensions_from_scale() {
        assert_eq!(
            Dimensions::from_scale(3.0),
            Dimensions {
                width: 1024,
                height: 768
            }
        );
        assert_eq!(
            Dimensions::from_scale(6.0),
            Dimensions {
                width: 2048,
                height: 1536
            }
        );
        // 1024 * 0.5 = 512, 768 * 0.5 = 384
        assert_eq!(Dimensions::from_scale(1.5).to_string(), "512x384");
        // 1024 / 3 = 341.33.., 768 / 3 = 256
        assert_eq!(Dimensions::from_scale(1.0).to_string(), "341x256");
        // 2048 / 3 = 682.67.. rounds up
        assert_eq!(Dimensions::from_scale(2.0).width, 683);
    }

    #[test]
    fn test_config_json_keys() {
        let config = RenderConfig::new(4.0);
        let value: Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(value["puppeteerConfig"]["deviceScaleFactor"], 4.0);
        assert_eq!(value["puppeteerConfig"]["backgroundColor"], "transparent");
        assert_eq!(value["mermaid"]["fontSize"], 14);

        let flowchart = &value["mermaid"]["flowchart"];
        assert_eq!(flowchart["htmlLabels"], true);
        assert_eq!(flowchart["padding"], 8);
        assert_eq!(flowchart["rankSpacing"], 20);
        assert_eq!(flowchart["nodeSpacing"], 30);
        assert_eq!(flowchart["diagramPadding"], 8);
        assert_eq!(flowchart["useMaxWidth"], true);
        assert_eq!(flowchart["wrap"], true);

        let theme = &value["mermaid"]["themeVariables"];
        assert_eq!(theme["fontSize"], "14px");
        assert_eq!(theme["fontFamily"], "arial");
        assert_eq!(theme["lineHeight"], 1);
    }

    #[test]
    fn test_persist_removes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::new(3.0);

        let file = config.persist(Some(dir.path())).unwrap();
        let path = file.path().to_path_buf();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["puppeteerConfig"]["deviceScaleFactor"], 3.0);

        drop(file);
        assert!(!path.exists());
    }
}
