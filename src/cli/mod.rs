//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 参数结构
//! - `-i/--input`, `-o/--output`, `-s/--scale` 等转换参数（见 `convert`）
//! - `-v/--verbose`: 日志级别
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert

pub mod convert;

use clap::{ArgAction, Parser};

/// mmdbatch - Mermaid 批量 PNG 转换器
#[derive(Parser, Debug)]
#[command(name = "mmdbatch")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Convert Mermaid diagram files to high-resolution PNG", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub convert: convert::ConvertArgs,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}
