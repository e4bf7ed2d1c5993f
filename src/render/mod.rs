//! # 渲染模块
//!
//! 准备外部渲染器所需的输入：共享 JSON 配置、单文件临时源、命令行参数。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 子模块: config, job, renderer

pub mod config;
pub mod job;
pub mod renderer;

pub use config::{Dimensions, RenderConfig};
pub use job::ConversionJob;
pub use renderer::{RenderOutcome, Renderer};
