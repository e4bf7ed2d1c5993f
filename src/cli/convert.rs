//! # convert 参数定义
//!
//! 批量将 Mermaid 源文件 (.mmd) 渲染为高分辨率 PNG
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Mermaid 内置主题
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Theme {
    /// Mermaid default theme
    #[default]
    Default,
    /// Neutral (black and white) theme
    Neutral,
    /// Dark theme
    Dark,
    /// Forest (green) theme
    Forest,
    /// Base theme, meant for custom theme variables
    Base,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Default => write!(f, "default"),
            Theme::Neutral => write!(f, "neutral"),
            Theme::Dark => write!(f, "dark"),
            Theme::Forest => write!(f, "forest"),
            Theme::Base => write!(f, "base"),
        }
    }
}

/// convert 参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input directory containing .mmd files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for PNG files
    #[arg(short, long)]
    pub output: PathBuf,

    /// Scale factor for PNG resolution
    #[arg(short, long, default_value_t = 3.0, value_parser = parse_scale)]
    pub scale: f64,

    /// Mermaid CLI executable used for rendering
    #[arg(short, long, env = "MMDC", default_value = "mmdc")]
    pub renderer: PathBuf,

    /// Theme selected by the init directive prepended to each diagram
    #[arg(short, long, value_enum, default_value_t = Theme::Default)]
    pub theme: Theme,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Directory for temporary config and diagram files
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
}

/// 解析缩放因子（必须为有限正数）
fn parse_scale(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("scale must be a positive number, got {}", s));
    }
    Ok(value)
}
