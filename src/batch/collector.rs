//! # 文件收集器
//!
//! 在输入目录中收集待转换的 Mermaid 源文件。
//!
//! ## 功能
//! - 仅扫描目录顶层（不递归）
//! - glob 模式匹配文件名
//! - 结果按路径排序，保证处理顺序稳定
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `walkdir` 遍历目录, `glob` 匹配文件名

use crate::error::{MmdBatchError, Result};

use std::path::PathBuf;
use walkdir::WalkDir;

/// Mermaid 源文件默认匹配模式
pub const MERMAID_PATTERN: &str = "*.mmd";

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    input: PathBuf,
    /// 文件名匹配模式
    pattern: &'static str,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            pattern: MERMAID_PATTERN,
        }
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.input.is_dir() {
            return Err(MmdBatchError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let pattern = glob::Pattern::new(self.pattern).map_err(|e| {
            MmdBatchError::InvalidArgument(format!("Invalid pattern '{}': {}", self.pattern, e))
        })?;

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            // 模式只含 ASCII，lossy 转换不改变 ASCII 字节，非 UTF-8 文件名同样参与匹配
            .filter(|e| pattern.matches(&e.file_name().to_string_lossy()))
            .map(|e| e.into_path())
            .collect();

        files.sort();
        Ok(files)
    }
}
